//! Randomized pause used by adapters to respect upstream rate limits.

use std::time::Duration;

use rand::Rng;

/// Pause the current task for a uniformly random duration in
/// `[min_secs, max_secs]` seconds.
///
/// Not part of the pipeline's control flow; polite adapters call this
/// between successive network requests so bursts of lookups do not trip
/// upstream throttling. Bounds are swapped if given in the wrong order.
pub async fn random_sleep(min_secs: f64, max_secs: f64) {
    let (lo, hi) = if min_secs <= max_secs {
        (min_secs, max_secs)
    } else {
        (max_secs, min_secs)
    };
    let secs = rand::rng().random_range(lo..=hi).max(0.0);
    tokio::time::sleep(Duration::from_secs_f64(secs)).await;
}
