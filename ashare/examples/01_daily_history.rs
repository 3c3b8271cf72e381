//! Resolve runtime settings, wire them into the default adapter, and
//! fetch one instrument's canonical daily table.
//!
//! Run with: `cargo run -p ashare --example 01_daily_history`

use std::sync::Arc;

use ashare::config::{self, RuntimeConfig};
use ashare::{DailyRequest, FailoverManager};
use ashare_eastmoney::EastmoneyFetcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = RuntimeConfig::from_env();
    for warning in cfg.validate() {
        tracing::warn!(%warning, "configuration");
    }
    config::init(cfg.clone());

    // Resolved settings flow into constructors explicitly; nothing reads
    // the process-scoped slot behind the caller's back.
    let (delay_min, delay_max) = cfg.fetch_delay_secs;
    let manager = FailoverManager::builder()
        .with_fetcher(Arc::new(
            EastmoneyFetcher::builder()
                .throttle_secs(delay_min, delay_max)
                .build(),
        ))
        .build()?;

    let code = cfg
        .stock_list
        .first()
        .cloned()
        .unwrap_or_else(|| "600519".to_string());
    let (bars, source) = manager.daily_history(&DailyRequest::new(code)).await?;

    println!("{} rows from {source}", bars.len());
    if let Some(latest) = bars.last() {
        println!(
            "{}  close={}  ma5={}  ma20={}  volume_ratio={}",
            latest.date, latest.close, latest.ma5, latest.ma20, latest.volume_ratio
        );
    }
    Ok(())
}
