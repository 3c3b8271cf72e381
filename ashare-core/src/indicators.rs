//! Rolling-window statistics derived after cleaning.
//!
//! All derived columns are rounded to 2 decimal places with the default
//! midpoint-nearest-even strategy, so identical input always yields
//! identical output.

use rust_decimal::Decimal;

use crate::types::{CleanBar, DailyBar};

/// Moving-average windows derived for every table, in column order.
pub const MA_WINDOWS: [usize; 3] = [5, 10, 20];

/// Window length of the prior-volume average behind `volume_ratio`.
pub const VOLUME_RATIO_WINDOW: usize = 5;

const ROUND_DP: u32 = 2;

/// Mean of `values[start..end]`, rounded. Callers guarantee the slice is
/// non-empty.
fn window_mean(values: &[Decimal], start: usize, end: usize) -> Decimal {
    let window = &values[start..end];
    let sum: Decimal = window.iter().copied().sum();
    (sum / Decimal::from(window.len())).round_dp(ROUND_DP)
}

/// Trailing mean of up to `window` values ending at index `i`, inclusive.
/// Partial windows at the start of the series use whatever history exists.
#[must_use]
pub fn trailing_mean(values: &[Decimal], i: usize, window: usize) -> Decimal {
    let start = (i + 1).saturating_sub(window);
    window_mean(values, start, i + 1)
}

/// Volume ratio at index `i`: today's volume over the mean of up to
/// [`VOLUME_RATIO_WINDOW`] prior volumes. The earliest row has no prior
/// average and defaults to 1.0, as does any division that cannot produce a
/// value.
#[must_use]
pub fn volume_ratio(volumes: &[Decimal], i: usize) -> Decimal {
    if i == 0 {
        return Decimal::ONE;
    }
    let start = i.saturating_sub(VOLUME_RATIO_WINDOW);
    let prior_avg = window_mean(volumes, start, i);
    volumes[i]
        .checked_div(prior_avg)
        .map_or(Decimal::ONE, |r| r.round_dp(ROUND_DP))
}

/// Derive the indicator columns over a cleaned table.
#[must_use]
pub fn derive(bars: Vec<CleanBar>) -> Vec<DailyBar> {
    let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<Decimal> = bars.iter().map(|b| b.volume).collect();

    bars.into_iter()
        .enumerate()
        .map(|(i, b)| DailyBar {
            date: b.date,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            volume: b.volume,
            amount: b.amount,
            pct_chg: b.pct_chg,
            ma5: trailing_mean(&closes, i, MA_WINDOWS[0]),
            ma10: trailing_mean(&closes, i, MA_WINDOWS[1]),
            ma20: trailing_mean(&closes, i, MA_WINDOWS[2]),
            volume_ratio: volume_ratio(&volumes, i),
        })
        .collect()
}
