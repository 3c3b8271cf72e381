//! Demonstrate priority-ordered failover with scripted mock sources: the
//! preferred source fails, the backup delivers, and the caller sees only
//! the successful table plus its provenance.
//!
//! Run with: `cargo run -p ashare --example 02_failover`

use ashare::{DailyRequest, FailoverManager};
use ashare_mock::MockFetcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let manager = FailoverManager::builder()
        .with_fetcher(
            MockFetcher::builder()
                .name("flaky-primary")
                .priority(1)
                .fails_with("upstream maintenance window")
                .build(),
        )
        .with_fetcher(
            MockFetcher::builder()
                .name("steady-backup")
                .priority(2)
                .build(),
        )
        .build()?;

    let (bars, source) = manager.daily_history(&DailyRequest::new("600519")).await?;
    println!("served {} rows via {source}", bars.len());
    Ok(())
}
