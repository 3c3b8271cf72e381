//! Deterministic fixture data.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde_json::json;

use ashare_core::types::{ChipDistribution, RawRow, RealtimeQuote};

/// Trading days served by [`daily_raw`].
pub const FIXTURE_DAYS: usize = 30;

fn next_trading_day(mut date: NaiveDate) -> NaiveDate {
    loop {
        date = date + Duration::days(1);
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return date;
        }
    }
}

/// Thirty deterministic daily rows in canonical column names, cells kept
/// as strings the way a real upstream would ship them. Weekends are
/// skipped; prices wiggle around 100 so every indicator column has
/// non-trivial values.
#[must_use]
pub fn daily_raw() -> Vec<RawRow> {
    let mut rows = Vec::with_capacity(FIXTURE_DAYS);
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut prev_close = 100.0_f64;

    for i in 0..FIXTURE_DAYS {
        date = next_trading_day(date);
        // A fixed sawtooth: rises for four days, dips on the fifth.
        let step = if i % 5 == 4 { -1.2 } else { 0.6 };
        let close = prev_close + step;
        let open = prev_close;
        let high = close.max(open) + 0.4;
        let low = close.min(open) - 0.5;
        let volume = 120_000 + 1_500 * i as i64;
        let amount = close * volume as f64;
        let pct_chg = (close - prev_close) / prev_close * 100.0;

        let mut row = RawRow::new();
        row.insert("date".into(), json!(date.format("%Y-%m-%d").to_string()));
        row.insert("open".into(), json!(format!("{open:.2}")));
        row.insert("high".into(), json!(format!("{high:.2}")));
        row.insert("low".into(), json!(format!("{low:.2}")));
        row.insert("close".into(), json!(format!("{close:.2}")));
        row.insert("volume".into(), json!(volume.to_string()));
        row.insert("amount".into(), json!(format!("{amount:.2}")));
        row.insert("pct_chg".into(), json!(format!("{pct_chg:.2}")));
        rows.push(row);

        prev_close = close;
    }
    rows
}

/// A canned realtime quote matching the fixture instrument.
#[must_use]
pub fn realtime_quote() -> RealtimeQuote {
    RealtimeQuote {
        name: "模拟股份".to_string(),
        price: "103.20".parse().unwrap(),
        volume_ratio: Some("1.18".parse().unwrap()),
        turnover_rate: Some("2.45".parse().unwrap()),
        pe_ratio: Some("18.60".parse().unwrap()),
        pb_ratio: Some("2.10".parse().unwrap()),
    }
}

/// A canned chip distribution matching the fixture instrument.
#[must_use]
pub fn chip_distribution() -> ChipDistribution {
    ChipDistribution {
        profit_ratio: "0.62".parse().unwrap(),
        avg_cost: "98.75".parse().unwrap(),
        concentration_90: "0.14".parse().unwrap(),
        concentration_70: Some("0.09".parse().unwrap()),
    }
}
