use ashare_core::types::DailyRequest;
use ashare_core::{
    ChipDistributionProvider, FetchError, Fetcher, RealtimeQuoteProvider,
};
use ashare_eastmoney::EastmoneyFetcher;
use chrono::NaiveDate;
use httpmock::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn adapter_for(server: &MockServer) -> EastmoneyFetcher {
    EastmoneyFetcher::builder()
        .kline_base(server.base_url())
        .snapshot_base(server.base_url())
        .chip_base(server.base_url())
        .throttle_secs(0.0, 0.0)
        .build()
}

fn explicit_request() -> DailyRequest {
    DailyRequest::new("600519")
        .start(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .end(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
}

#[tokio::test]
async fn daily_history_parses_and_derives_kline_payloads() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/qt/stock/kline/get")
                .query_param("secid", "1.600519")
                .query_param("klt", "101");
            then.status(200).json_body(json!({
                "rc": 0,
                "data": {
                    "code": "600519",
                    "klines": [
                        "2024-01-02,9.90,10.00,10.10,9.80,100,1000.0,3.0,1.0,0.1,0.5",
                        "2024-01-03,10.00,12.00,12.10,9.90,110,1320.0,22.0,20.0,2.0,0.5",
                        "2024-01-04,12.00,14.00,14.20,11.90,120,1680.0,19.2,16.7,2.0,0.6",
                        "2024-01-05,14.00,16.00,16.10,13.90,130,2080.0,15.7,14.3,2.0,0.6",
                        "2024-01-08,16.00,18.00,18.10,15.90,140,2520.0,13.8,12.5,2.0,0.7",
                        "2024-01-09,18.00,20.00,20.10,17.90,150,3000.0,12.2,11.1,2.0,0.7"
                    ]
                }
            }));
        })
        .await;

    let bars = adapter_for(&server)
        .daily_history(&explicit_request())
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(bars.len(), 6);
    assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
    // EastMoney ships close before high/low; normalization restores order.
    assert_eq!(bars[0].close, dec("10.00"));
    assert_eq!(bars[0].high, Some(dec("10.10")));
    assert_eq!(bars[4].ma5, dec("14"));
    assert_eq!(bars[5].ma5, dec("16"));
    assert_eq!(bars[0].volume_ratio, Decimal::ONE);
}

#[tokio::test]
async fn null_data_surfaces_as_an_empty_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/qt/stock/kline/get");
            then.status(200).json_body(json!({ "rc": 0, "data": null }));
        })
        .await;

    let err = adapter_for(&server)
        .daily_history(&explicit_request())
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("eastmoney"), "missing source name: {msg}");
    assert!(msg.contains("600519"), "missing stock code: {msg}");
    assert!(matches!(err.root_cause(), FetchError::Empty { .. }));
}

#[tokio::test]
async fn throttling_status_maps_to_rate_limited() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/qt/stock/kline/get");
            then.status(429);
        })
        .await;

    let err = adapter_for(&server)
        .daily_history(&explicit_request())
        .await
        .unwrap_err();

    assert!(matches!(err.root_cause(), FetchError::RateLimited { .. }));
}

#[tokio::test]
async fn server_errors_map_to_source_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/qt/stock/kline/get");
            then.status(502);
        })
        .await;

    let err = adapter_for(&server)
        .daily_history(&explicit_request())
        .await
        .unwrap_err();

    assert!(matches!(
        err.root_cause(),
        FetchError::SourceUnavailable { .. }
    ));
}

#[tokio::test]
async fn realtime_quote_descales_snapshot_fields() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/qt/stock/get")
                .query_param("secid", "1.600519");
            then.status(200).json_body(json!({
                "data": {
                    "f43": 168_550,
                    "f50": 118,
                    "f58": "贵州茅台",
                    "f162": 1_860,
                    "f167": 210,
                    "f168": 245
                }
            }));
        })
        .await;

    let quote = adapter_for(&server)
        .realtime_quote("600519")
        .await
        .unwrap();

    assert_eq!(quote.name, "贵州茅台");
    assert_eq!(quote.price, dec("1685.50"));
    assert_eq!(quote.volume_ratio, Some(dec("1.18")));
    assert_eq!(quote.turnover_rate, Some(dec("2.45")));
    assert_eq!(quote.pe_ratio, Some(dec("18.60")));
    assert_eq!(quote.pb_ratio, Some(dec("2.10")));
}

#[tokio::test]
async fn snapshot_tolerates_missing_optional_fields() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/qt/stock/get");
            then.status(200).json_body(json!({
                "data": { "f43": 1_050, "f50": "-" }
            }));
        })
        .await;

    let quote = adapter_for(&server)
        .realtime_quote("000001")
        .await
        .unwrap();

    assert_eq!(quote.name, "000001");
    assert_eq!(quote.price, dec("10.50"));
    assert_eq!(quote.volume_ratio, None);
    assert_eq!(quote.pe_ratio, None);
}

#[tokio::test]
async fn chip_distribution_reads_the_latest_entry() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/qt/stock/cyq/get")
                .query_param("secid", "1.600519");
            then.status(200).json_body(json!({
                "data": {
                    "cyq": [
                        "2024-03-14,58.00,97.10,0.16,0.10",
                        "2024-03-15,62.15,98.75,0.14,0.09"
                    ]
                }
            }));
        })
        .await;

    let chip = adapter_for(&server)
        .chip_distribution("600519")
        .await
        .unwrap();

    assert_eq!(chip.profit_ratio, dec("0.6215"));
    assert_eq!(chip.avg_cost, dec("98.75"));
    assert_eq!(chip.concentration_90, dec("0.14"));
    assert_eq!(chip.concentration_70, Some(dec("0.09")));
}
