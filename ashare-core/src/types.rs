//! Canonical data structures shared across the ashare workspace.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of a source's native response shape, prior to normalization.
///
/// Sources return whatever column names and cell encodings their upstream
/// uses; normalization maps these onto the canonical schema.
pub type RawRow = serde_json::Map<String, Value>;

/// The canonical base columns with loosely-typed cells, as produced by
/// [`Fetcher::normalize`](crate::Fetcher::normalize).
///
/// Cells stay untouched `serde_json::Value`s (strings or numbers, `Null`
/// when the source had no matching column); type coercion belongs to the
/// cleaning step, not to normalization.
#[derive(Debug, Clone, Default)]
pub struct RawBar {
    /// Trading day, typically a `YYYY-MM-DD` string.
    pub date: Value,
    /// Opening price.
    pub open: Value,
    /// Intraday high.
    pub high: Value,
    /// Intraday low.
    pub low: Value,
    /// Closing price.
    pub close: Value,
    /// Traded volume.
    pub volume: Value,
    /// Turnover value.
    pub amount: Value,
    /// Day-over-day percentage change.
    pub pct_chg: Value,
}

/// A typed canonical row after cleaning, before indicator derivation.
///
/// `close` and `volume` are guaranteed present; the remaining numeric
/// columns keep `None` where the source cell failed coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanBar {
    /// Trading day; unique and strictly ascending within a table.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Option<Decimal>,
    /// Intraday high.
    pub high: Option<Decimal>,
    /// Intraday low.
    pub low: Option<Decimal>,
    /// Closing price (required).
    pub close: Decimal,
    /// Traded volume (required).
    pub volume: Decimal,
    /// Turnover value.
    pub amount: Option<Decimal>,
    /// Day-over-day percentage change.
    pub pct_chg: Option<Decimal>,
}

/// One fully derived canonical row: the cleaned columns plus the
/// rolling-window indicators, all rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading day; unique and strictly ascending within a table.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Option<Decimal>,
    /// Intraday high.
    pub high: Option<Decimal>,
    /// Intraday low.
    pub low: Option<Decimal>,
    /// Closing price (required).
    pub close: Decimal,
    /// Traded volume (required).
    pub volume: Decimal,
    /// Turnover value.
    pub amount: Option<Decimal>,
    /// Day-over-day percentage change.
    pub pct_chg: Option<Decimal>,
    /// Trailing 5-day simple moving average of `close` (partial windows at
    /// series start).
    pub ma5: Decimal,
    /// Trailing 10-day simple moving average of `close`.
    pub ma10: Decimal,
    /// Trailing 20-day simple moving average of `close`.
    pub ma20: Decimal,
    /// Today's volume over yesterday's 5-day average volume; 1.0 for the
    /// earliest row and whenever no prior average exists.
    pub volume_ratio: Decimal,
}

/// Point-in-time quote for one instrument, served by adapters that
/// implement [`RealtimeQuoteProvider`](crate::RealtimeQuoteProvider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeQuote {
    /// Display name of the instrument.
    pub name: String,
    /// Latest traded price.
    pub price: Decimal,
    /// Current volume ratio.
    pub volume_ratio: Option<Decimal>,
    /// Turnover rate in percent.
    pub turnover_rate: Option<Decimal>,
    /// Price/earnings ratio, when the source publishes one.
    pub pe_ratio: Option<Decimal>,
    /// Price/book ratio, when the source publishes one.
    pub pb_ratio: Option<Decimal>,
}

/// Cost-basis and holder-concentration statistics for one instrument,
/// served by adapters that implement
/// [`ChipDistributionProvider`](crate::ChipDistributionProvider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipDistribution {
    /// Share of holders currently in profit, 0..=1.
    pub profit_ratio: Decimal,
    /// Average holder cost.
    pub avg_cost: Decimal,
    /// Concentration of the 90% cost band.
    pub concentration_90: Decimal,
    /// Concentration of the 70% cost band, when published.
    pub concentration_70: Option<Decimal>,
}

/// Number of trading days a request covers when the caller does not say
/// otherwise. Only used for default start-date computation; the pipeline
/// never trims output to this count.
pub const DEFAULT_DAYS: u32 = 30;

/// A daily-history request: which instrument, and optionally which window.
///
/// Omitted `end` defaults to today on the exchange calendar; omitted
/// `start` defaults to `end` minus twice `days`, so rolling windows have
/// warm-up history before the first reported row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRequest {
    /// Exchange-specific instrument identifier (e.g. a 6-digit code).
    pub stock_code: String,
    /// First trading day to include, inclusive.
    pub start: Option<NaiveDate>,
    /// Last trading day to include, inclusive.
    pub end: Option<NaiveDate>,
    /// Window length used for default start-date computation.
    pub days: u32,
}

impl DailyRequest {
    /// Request the default window for `stock_code`.
    pub fn new(stock_code: impl Into<String>) -> Self {
        Self {
            stock_code: stock_code.into(),
            start: None,
            end: None,
            days: DEFAULT_DAYS,
        }
    }

    /// Set an explicit start date.
    #[must_use]
    pub fn start(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    /// Set an explicit end date.
    #[must_use]
    pub fn end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    /// Override the default-window length.
    #[must_use]
    pub fn days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }
}
