//! ashare orchestrates daily-bar requests across multiple market-data
//! sources.
//!
//! Overview
//! - Routes a request to registered [`Fetcher`]s in ascending priority
//!   order until one yields a non-empty canonical table.
//! - A single source's failure is never fatal: it becomes a labeled
//!   diagnostic, and the next source is tried. Only when every source
//!   fails does an aggregated error reach the caller.
//! - Successful responses carry provenance: the name of the source that
//!   produced the table.
//! - Best-effort side lookups (realtime quote, chip distribution) are
//!   optional results and never abort the daily pipeline.
//!
//! Example
//! ```rust,ignore
//! use ashare::{DailyRequest, FailoverManager};
//!
//! let manager = FailoverManager::with_default_sources();
//! let (bars, source) = manager
//!     .daily_history(&DailyRequest::new("600519"))
//!     .await?;
//! println!("{} rows from {source}", bars.len());
//! ```
//!
//! See `ashare/examples/` for runnable demonstrations.
#![warn(missing_docs)]

pub mod config;
mod manager;

pub use manager::{FailoverManager, FailoverManagerBuilder};

// Re-export core types for convenience
pub use ashare_core::{
    ChipDistribution,
    ChipDistributionProvider,
    CleanBar,
    DEFAULT_DAYS,
    DailyBar,
    DailyRequest,
    FetchError,
    Fetcher,
    RawBar,
    RawRow,
    RealtimeQuote,
    RealtimeQuoteProvider,
    random_sleep,
};
