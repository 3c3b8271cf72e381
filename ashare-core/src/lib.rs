//! ashare-core
//!
//! Core types, the fetcher contract, and shared pipeline steps for the
//! ashare ecosystem.
//!
//! - `types`: the canonical daily-bar schema and request/auxiliary types.
//! - `fetcher`: the [`Fetcher`] trait with the provided `daily_history`
//!   template pipeline, plus the auxiliary capability traits.
//! - `clean`: coercion of normalized rows into typed canonical rows.
//! - `indicators`: rolling-window statistics derived after cleaning.
//! - `throttle`: the randomized pause adapters use between upstream calls.
//!
//! The pipeline shape is fixed: a concrete source implements only raw
//! acquisition and shape normalization; window defaulting, cleaning, and
//! indicator derivation are identical for every source and live here.
#![warn(missing_docs)]

pub mod clean;
pub mod error;
pub mod fetcher;
pub mod indicators;
pub mod throttle;
pub mod types;

pub use error::FetchError;
pub use fetcher::{
    ChipDistributionProvider, Fetcher, RealtimeQuoteProvider, resolve_window, today_shanghai,
};
pub use throttle::random_sleep;
pub use types::*;
