//! ashare-eastmoney
//!
//! The default [`Fetcher`](ashare_core::Fetcher) implementation, speaking
//! the EastMoney public quote APIs. Provides daily kline history plus the
//! auxiliary realtime-quote and chip-distribution lookups.
//!
//! The upstream protocol is treated as an opaque external dependency:
//! this crate knows only the three endpoints it calls and the cell layout
//! of their payloads. Endpoints are overridable through the builder so
//! tests can point the adapter at a local mock server.

mod builder;
mod fetcher;
mod quote;

pub use builder::EastmoneyBuilder;
pub use fetcher::{EastmoneyFetcher, SOURCE_NAME};
