use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ashare::{DailyRequest, FailoverManager, FetchError};
use ashare_mock::{MockFetcher, fixtures};

#[tokio::test]
async fn failover_returns_the_first_source_that_delivers() {
    let manager = FailoverManager::builder()
        .with_fetcher(
            MockFetcher::builder()
                .name("primary")
                .priority(1)
                .fails_with("connection refused")
                .build(),
        )
        .with_fetcher(MockFetcher::builder().name("backup").priority(2).build())
        .build()
        .unwrap();

    let (bars, source) = manager
        .daily_history(&DailyRequest::new("600519"))
        .await
        .unwrap();

    assert_eq!(source, "backup");
    assert_eq!(bars.len(), fixtures::FIXTURE_DAYS);
}

#[tokio::test]
async fn priority_governs_order_not_registration_order() {
    let manager = FailoverManager::builder()
        .with_fetcher(MockFetcher::builder().name("second").priority(2).build())
        .with_fetcher(MockFetcher::builder().name("first").priority(1).build())
        .build()
        .unwrap();

    assert_eq!(
        manager.source_names().collect::<Vec<_>>(),
        vec!["first", "second"]
    );

    let (_, source) = manager
        .daily_history(&DailyRequest::new("600519"))
        .await
        .unwrap();
    assert_eq!(source, "first");
}

#[tokio::test]
async fn first_success_stops_the_scan() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();

    let manager = FailoverManager::builder()
        .with_fetcher(MockFetcher::builder().name("winner").priority(1).build())
        .with_fetcher(
            MockFetcher::builder()
                .name("never")
                .priority(2)
                .with_fetch_raw_fn(move |_, _, _| {
                    counted.fetch_add(1, Ordering::SeqCst);
                    Ok(fixtures::daily_raw())
                })
                .build(),
        )
        .build()
        .unwrap();

    let (_, source) = manager
        .daily_history(&DailyRequest::new("600519"))
        .await
        .unwrap();

    assert_eq!(source, "winner");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn total_failure_aggregates_every_diagnostic_in_priority_order() {
    let manager = FailoverManager::builder()
        .with_fetcher(
            MockFetcher::builder()
                .name("alpha")
                .priority(1)
                .fails_with("dns failure")
                .build(),
        )
        .with_fetcher(
            MockFetcher::builder()
                .name("beta")
                .priority(2)
                .fails_with("bad gateway")
                .build(),
        )
        .build()
        .unwrap();

    let err = manager
        .daily_history(&DailyRequest::new("600519"))
        .await
        .unwrap_err();

    let FetchError::AllSourcesFailed {
        stock_code,
        failures,
    } = &err
    else {
        panic!("expected AllSourcesFailed, got {err}");
    };
    assert_eq!(stock_code, "600519");
    assert_eq!(failures.len(), 2);
    assert!(failures[0].starts_with("[alpha]"));
    assert!(failures[1].starts_with("[beta]"));

    let msg = err.to_string();
    assert!(msg.contains("dns failure"));
    assert!(msg.contains("bad gateway"));
    assert!(msg.find("alpha").unwrap() < msg.find("beta").unwrap());
}

#[tokio::test]
async fn a_cleaned_out_table_falls_through_to_the_next_source() {
    // Raw rows whose close never parses clean down to an empty table; the
    // manager must keep scanning rather than hand back nothing.
    let mut unusable = ashare_mock::fixtures::daily_raw();
    for row in &mut unusable {
        row.insert("close".into(), serde_json::json!("suspended"));
    }

    let manager = FailoverManager::builder()
        .with_fetcher(
            MockFetcher::builder()
                .name("hollow")
                .priority(1)
                .returns_raw_ok(unusable)
                .build(),
        )
        .with_fetcher(MockFetcher::builder().name("solid").priority(2).build())
        .build()
        .unwrap();

    let (bars, source) = manager
        .daily_history(&DailyRequest::new("600519"))
        .await
        .unwrap();

    assert_eq!(source, "solid");
    assert!(!bars.is_empty());
}

#[tokio::test]
async fn side_lookups_are_optional_results() {
    let bare = FailoverManager::builder()
        .with_fetcher(MockFetcher::builder().name("bare").build())
        .build()
        .unwrap();
    assert!(bare.realtime_quote("600519").await.is_none());
    assert!(bare.chip_distribution("600519").await.is_none());

    let rich = FailoverManager::builder()
        .with_fetcher(
            MockFetcher::builder()
                .name("rich")
                .with_quote(fixtures::realtime_quote())
                .with_chip(fixtures::chip_distribution())
                .build(),
        )
        .build()
        .unwrap();

    let quote = rich.realtime_quote("600519").await.unwrap();
    assert_eq!(quote.name, "模拟股份");
    assert!(rich.chip_distribution("600519").await.is_some());
}

#[tokio::test]
async fn building_without_sources_is_rejected() {
    let err = FailoverManager::builder().build().unwrap_err();
    assert!(matches!(err, FetchError::InvalidArg(_)));
}
