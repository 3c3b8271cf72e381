//! Best-effort side lookups: realtime quote and chip distribution are
//! optional results and never interfere with the daily pipeline.
//!
//! Run with: `cargo run -p ashare --example 03_side_lookups`

use ashare::FailoverManager;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let manager = FailoverManager::with_default_sources();

    match manager.realtime_quote("600519").await {
        Some(quote) => println!("{} trades at {}", quote.name, quote.price),
        None => println!("no source could serve a realtime quote"),
    }

    match manager.chip_distribution("600519").await {
        Some(chip) => println!(
            "avg cost {}  profit ratio {}",
            chip.avg_cost, chip.profit_ratio
        ),
        None => println!("no source could serve chip data"),
    }
}
