use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};

use ashare_core::types::{RawBar, RawRow};
use ashare_core::{FetchError, Fetcher, random_sleep};

use crate::builder::EastmoneyBuilder;

/// Stable identifier of this source in priority lists and diagnostics.
pub const SOURCE_NAME: &str = "eastmoney";

/// Column order of one kline CSV line as the endpoint ships it. Note the
/// close-before-high/low ordering; normalization restores canonical order.
const KLINE_COLUMNS: [&str; 11] = [
    "date",
    "open",
    "close",
    "high",
    "low",
    "volume",
    "amount",
    "amplitude",
    "pct_chg",
    "change",
    "turnover",
];

/// Daily-data adapter for the EastMoney quote APIs.
pub struct EastmoneyFetcher {
    client: reqwest::Client,
    kline_base: String,
    snapshot_base: String,
    chip_base: String,
    throttle_secs: (f64, f64),
}

#[derive(Deserialize)]
struct KlineEnvelope {
    data: Option<KlinePayload>,
}

#[derive(Deserialize)]
struct KlinePayload {
    #[serde(default)]
    klines: Vec<String>,
}

impl EastmoneyFetcher {
    /// Build an adapter against the production endpoints with the default
    /// client and polite pause.
    ///
    /// # Panics
    /// Panics if constructing the underlying HTTP client fails, which is
    /// unexpected in normal environments.
    #[must_use]
    pub fn new_default() -> Self {
        EastmoneyBuilder::new().build()
    }

    /// Start a customized build.
    #[must_use]
    pub fn builder() -> EastmoneyBuilder {
        EastmoneyBuilder::new()
    }

    pub(crate) fn from_parts(
        client: reqwest::Client,
        kline_base: String,
        snapshot_base: String,
        chip_base: String,
        throttle_secs: (f64, f64),
    ) -> Self {
        Self {
            client,
            kline_base,
            snapshot_base,
            chip_base,
            throttle_secs,
        }
    }

    pub(crate) fn snapshot_url(&self) -> String {
        format!("{}/api/qt/stock/get", self.snapshot_base)
    }

    pub(crate) fn chip_url(&self) -> String {
        format!("{}/api/qt/stock/cyq/get", self.chip_base)
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Space out upstream calls so bursts of lookups stay under the
    /// source's throttling radar.
    pub(crate) async fn polite_pause(&self) {
        random_sleep(self.throttle_secs.0, self.throttle_secs.1).await;
    }
}

/// Market-prefixed security id: Shanghai listings (6xx/9xx equities, 5xx
/// funds) are market `1`, Shenzhen and Beijing are market `0`.
pub(crate) fn secid(stock_code: &str) -> String {
    match stock_code.chars().next() {
        Some('5' | '6' | '9') => format!("1.{stock_code}"),
        _ => format!("0.{stock_code}"),
    }
}

/// Split one kline CSV line into a raw row keyed by the endpoint's column
/// order. Cells stay strings; short lines simply omit trailing columns.
pub(crate) fn kline_row(line: &str) -> RawRow {
    let mut row = RawRow::new();
    for (key, cell) in KLINE_COLUMNS.iter().zip(line.split(',')) {
        row.insert((*key).to_string(), json!(cell));
    }
    row
}

pub(crate) fn transport_err(err: &reqwest::Error) -> FetchError {
    FetchError::unavailable(SOURCE_NAME, err.to_string())
}

/// Map HTTP status classes onto the error taxonomy before any body
/// parsing: 429 is the upstream's throttling signal, every other failure
/// status means the source is not usable right now.
pub(crate) fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::rate_limited(
            SOURCE_NAME,
            format!("http status {status}"),
        ));
    }
    if !status.is_success() {
        return Err(FetchError::unavailable(
            SOURCE_NAME,
            format!("http status {status}"),
        ));
    }
    Ok(resp)
}

#[async_trait]
impl Fetcher for EastmoneyFetcher {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn priority(&self) -> u8 {
        1
    }

    async fn fetch_raw(
        &self,
        stock_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawRow>, FetchError> {
        self.polite_pause().await;

        let url = format!("{}/api/qt/stock/kline/get", self.kline_base);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("secid", secid(stock_code)),
                // klt 101 = daily bars, fqt 1 = forward-adjusted prices.
                ("klt", "101".to_string()),
                ("fqt", "1".to_string()),
                ("beg", start.format("%Y%m%d").to_string()),
                ("end", end.format("%Y%m%d").to_string()),
                ("fields1", "f1,f2,f3,f4,f5,f6".to_string()),
                (
                    "fields2",
                    "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61".to_string(),
                ),
            ])
            .send()
            .await
            .map_err(|e| transport_err(&e))?;
        let resp = check_status(resp)?;

        let envelope: KlineEnvelope = resp.json().await.map_err(|e| transport_err(&e))?;
        let Some(payload) = envelope.data else {
            // The endpoint answers unknown codes with a null data field;
            // the shared pipeline turns zero rows into its empty error.
            return Ok(vec![]);
        };
        tracing::debug!(stock_code, lines = payload.klines.len(), "kline payload received");
        Ok(payload.klines.iter().map(|line| kline_row(line)).collect())
    }

    fn normalize(&self, raw: Vec<RawRow>, _stock_code: &str) -> Result<Vec<RawBar>, FetchError> {
        Ok(raw
            .into_iter()
            .map(|row| {
                let cell = |key: &str| row.get(key).cloned().unwrap_or(Value::Null);
                RawBar {
                    date: cell("date"),
                    open: cell("open"),
                    high: cell("high"),
                    low: cell("low"),
                    close: cell("close"),
                    volume: cell("volume"),
                    amount: cell("amount"),
                    pct_chg: cell("pct_chg"),
                }
            })
            .collect())
    }

    fn as_realtime_quote_provider(
        &self,
    ) -> Option<&dyn ashare_core::RealtimeQuoteProvider> {
        Some(self as &dyn ashare_core::RealtimeQuoteProvider)
    }

    fn as_chip_distribution_provider(
        &self,
    ) -> Option<&dyn ashare_core::ChipDistributionProvider> {
        Some(self as &dyn ashare_core::ChipDistributionProvider)
    }
}
