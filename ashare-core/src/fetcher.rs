//! The fetcher contract and the shared daily-history pipeline.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};

use crate::clean;
use crate::error::FetchError;
use crate::indicators;
use crate::types::{ChipDistribution, DailyBar, DailyRequest, RawBar, RawRow, RealtimeQuote};

/// Multiplier applied to `days` when defaulting the start date. The extra
/// margin gives the 20-day rolling window warm-up history before the first
/// reported row; all rows in range are still returned.
pub const WINDOW_BUFFER_MULTIPLIER: u32 = 2;

/// Today's calendar date on the exchange's clock (Asia/Shanghai).
#[must_use]
pub fn today_shanghai() -> NaiveDate {
    Utc::now().with_timezone(&chrono_tz::Asia::Shanghai).date_naive()
}

/// Resolve the effective request window.
///
/// A missing end date becomes `today`; a missing start date becomes the end
/// date minus [`WINDOW_BUFFER_MULTIPLIER`]` × days` calendar days.
#[must_use]
pub fn resolve_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    days: u32,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let end = end.unwrap_or(today);
    let start = start.unwrap_or_else(|| {
        end - Duration::days(i64::from(days) * i64::from(WINDOW_BUFFER_MULTIPLIER))
    });
    (start, end)
}

/// Focused role trait for sources that serve point-in-time quotes.
#[async_trait]
pub trait RealtimeQuoteProvider: Send + Sync {
    /// Fetch the current quote for `stock_code`.
    async fn realtime_quote(&self, stock_code: &str) -> Result<RealtimeQuote, FetchError>;
}

/// Focused role trait for sources that serve chip-distribution statistics.
#[async_trait]
pub trait ChipDistributionProvider: Send + Sync {
    /// Fetch the latest chip distribution for `stock_code`.
    async fn chip_distribution(&self, stock_code: &str) -> Result<ChipDistribution, FetchError>;
}

/// One upstream daily-data source.
///
/// Concrete sources implement only raw acquisition and shape normalization;
/// the provided [`daily_history`](Fetcher::daily_history) template runs the
/// shared window-defaulting → fetch → normalize → clean → derive pipeline,
/// identically for every source.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Stable identifier used in priority lists, logs, and diagnostics.
    fn name(&self) -> &'static str;

    /// Failover rank; lower is tried first.
    fn priority(&self) -> u8 {
        99
    }

    /// Acquire raw rows from the upstream source for the resolved window,
    /// in whatever shape that source returns.
    async fn fetch_raw(
        &self,
        stock_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawRow>, FetchError>;

    /// Map the source's native shape onto the canonical base columns,
    /// without cleaning or derivation.
    fn normalize(&self, raw: Vec<RawRow>, stock_code: &str) -> Result<Vec<RawBar>, FetchError>;

    /// Advertise realtime-quote capability by returning a usable trait
    /// object reference when supported.
    fn as_realtime_quote_provider(&self) -> Option<&dyn RealtimeQuoteProvider> {
        None
    }

    /// Advertise chip-distribution capability by returning a usable trait
    /// object reference when supported.
    fn as_chip_distribution_provider(&self) -> Option<&dyn ChipDistributionProvider> {
        None
    }

    /// Fetch, normalize, clean, and derive one instrument's daily history.
    ///
    /// Any failure along the way is re-wrapped into a
    /// [`FetchError::Source`] carrying this fetcher's name, the stock code,
    /// and the original error as its cause.
    ///
    /// # Errors
    /// Returns an error when acquisition yields zero rows, or when any
    /// pipeline step fails.
    async fn daily_history(&self, req: &DailyRequest) -> Result<Vec<DailyBar>, FetchError> {
        let (start, end) = resolve_window(req.start, req.end, req.days, today_shanghai());
        tracing::info!(
            fetcher = self.name(),
            stock_code = %req.stock_code,
            %start,
            %end,
            "fetching daily history"
        );

        let result = async {
            let raw = self.fetch_raw(&req.stock_code, start, end).await?;
            if raw.is_empty() {
                return Err(FetchError::empty(self.name(), req.stock_code.as_str()));
            }
            let normalized = self.normalize(raw, &req.stock_code)?;
            let cleaned = clean::clean_bars(normalized)?;
            Ok(indicators::derive(cleaned))
        }
        .await;

        match result {
            Ok(bars) => {
                tracing::info!(
                    fetcher = self.name(),
                    stock_code = %req.stock_code,
                    rows = bars.len(),
                    "daily history ready"
                );
                Ok(bars)
            }
            Err(e) => {
                tracing::error!(
                    fetcher = self.name(),
                    stock_code = %req.stock_code,
                    error = %e,
                    "daily history failed"
                );
                Err(FetchError::wrap(self.name(), req.stock_code.as_str(), e))
            }
        }
    }
}
