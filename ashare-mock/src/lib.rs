//! Mock fetcher for CI-safe tests and examples. Serves deterministic
//! fixture data by default and can be scripted per test via closures.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use ashare_core::types::{ChipDistribution, RawBar, RawRow, RealtimeQuote};
use ashare_core::{ChipDistributionProvider, FetchError, Fetcher, RealtimeQuoteProvider};

pub mod fixtures;

type FetchRawFn =
    Arc<dyn Fn(&str, NaiveDate, NaiveDate) -> Result<Vec<RawRow>, FetchError> + Send + Sync>;

/// Scriptable in-memory fetcher.
///
/// With no overrides it serves [`fixtures::daily_raw`] under the name
/// `"mock"` at priority 50. Tests tailor behavior through the builder.
pub struct MockFetcher {
    name: &'static str,
    priority: u8,
    fail_msg: Option<&'static str>,
    fetch_raw_fn: Option<FetchRawFn>,
    quote: Option<RealtimeQuote>,
    chip: Option<ChipDistribution>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self {
            name: "mock",
            priority: 50,
            fail_msg: None,
            fetch_raw_fn: None,
            quote: None,
            chip: None,
        }
    }
}

impl MockFetcher {
    /// Start building a scripted mock.
    #[must_use]
    pub fn builder() -> MockFetcherBuilder {
        MockFetcherBuilder::default()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    async fn fetch_raw(
        &self,
        stock_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawRow>, FetchError> {
        if let Some(msg) = self.fail_msg {
            return Err(FetchError::unavailable(self.name, msg));
        }
        match &self.fetch_raw_fn {
            Some(f) => f(stock_code, start, end),
            None => Ok(fixtures::daily_raw()),
        }
    }

    fn normalize(&self, raw: Vec<RawRow>, _stock_code: &str) -> Result<Vec<RawBar>, FetchError> {
        // Fixture rows already use canonical column names.
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

    fn as_realtime_quote_provider(&self) -> Option<&dyn RealtimeQuoteProvider> {
        if self.quote.is_some() {
            Some(self as &dyn RealtimeQuoteProvider)
        } else {
            None
        }
    }

    fn as_chip_distribution_provider(&self) -> Option<&dyn ChipDistributionProvider> {
        if self.chip.is_some() {
            Some(self as &dyn ChipDistributionProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl RealtimeQuoteProvider for MockFetcher {
    async fn realtime_quote(&self, stock_code: &str) -> Result<RealtimeQuote, FetchError> {
        self.quote
            .clone()
            .ok_or_else(|| FetchError::unavailable(self.name, format!("no quote for {stock_code}")))
    }
}

#[async_trait]
impl ChipDistributionProvider for MockFetcher {
    async fn chip_distribution(&self, stock_code: &str) -> Result<ChipDistribution, FetchError> {
        self.chip
            .clone()
            .ok_or_else(|| FetchError::unavailable(self.name, format!("no chip data for {stock_code}")))
    }
}

/// Builder for scripted [`MockFetcher`]s.
#[derive(Default)]
pub struct MockFetcherBuilder {
    inner: MockFetcher,
}

impl MockFetcherBuilder {
    /// Set the fetcher's name.
    #[must_use]
    pub fn name(mut self, name: &'static str) -> Self {
        self.inner.name = name;
        self
    }

    /// Set the failover priority (lower is tried first).
    #[must_use]
    pub fn priority(mut self, priority: u8) -> Self {
        self.inner.priority = priority;
        self
    }

    /// Script raw acquisition with an arbitrary closure.
    #[must_use]
    pub fn with_fetch_raw_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, NaiveDate, NaiveDate) -> Result<Vec<RawRow>, FetchError>
            + Send
            + Sync
            + 'static,
    {
        self.inner.fetch_raw_fn = Some(Arc::new(f));
        self
    }

    /// Always return these raw rows.
    #[must_use]
    pub fn returns_raw_ok(self, rows: Vec<RawRow>) -> Self {
        self.with_fetch_raw_fn(move |_, _, _| Ok(rows.clone()))
    }

    /// Always return zero raw rows.
    #[must_use]
    pub fn returns_empty(self) -> Self {
        self.with_fetch_raw_fn(|_, _, _| Ok(vec![]))
    }

    /// Always fail acquisition with an upstream-unavailable error carrying
    /// the fetcher's own name.
    #[must_use]
    pub fn fails_with(mut self, msg: &'static str) -> Self {
        self.inner.fail_msg = Some(msg);
        self
    }

    /// Serve this canned realtime quote.
    #[must_use]
    pub fn with_quote(mut self, quote: RealtimeQuote) -> Self {
        self.inner.quote = Some(quote);
        self
    }

    /// Serve this canned chip distribution.
    #[must_use]
    pub fn with_chip(mut self, chip: ChipDistribution) -> Self {
        self.inner.chip = Some(chip);
        self
    }

    /// Finish the build.
    #[must_use]
    pub fn build(self) -> Arc<MockFetcher> {
        Arc::new(self.inner)
    }
}
