//! Coercion of normalized rows into typed canonical rows.
//!
//! Cleaning is identical for every source: dates are parsed strictly,
//! numeric cells that fail coercion become missing values, rows without a
//! usable `close` or `volume` are dropped, and the result is re-indexed in
//! strictly ascending date order with duplicate dates resolved keep-last.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::FetchError;
use crate::types::{CleanBar, RawBar};

/// Coerce one loosely-typed cell into a decimal, treating non-parseable
/// values as missing.
#[must_use]
pub fn coerce_decimal(cell: &Value) -> Option<Decimal> {
    match cell {
        // Going through the number's string form avoids a lossy f64 hop.
        Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == "-" {
                return None;
            }
            trimmed.parse::<Decimal>().ok()
        }
        _ => None,
    }
}

/// Coerce one date cell. Unlike the numeric columns, an unparseable date is
/// an error: without a valid date the row cannot be ordered at all.
pub fn coerce_date(cell: &Value) -> Result<NaiveDate, FetchError> {
    let Value::String(s) = cell else {
        return Err(FetchError::Parse(format!("unusable date cell: {cell}")));
    };
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y%m%d"))
        .map_err(Into::into)
}

/// Clean a normalized table into typed canonical rows.
///
/// Rows missing `close` or `volume` after coercion are dropped; everything
/// else keeps per-cell `None`s. The output is strictly ascending by date
/// with no duplicates (last occurrence wins).
///
/// # Errors
/// Returns an error if any surviving row carries an unparseable date.
pub fn clean_bars(bars: Vec<RawBar>) -> Result<Vec<CleanBar>, FetchError> {
    let mut by_date: BTreeMap<NaiveDate, CleanBar> = BTreeMap::new();

    for bar in bars {
        // Dates are coerced for every row, even ones dropped below: a row
        // that cannot be dated at all means the source shape is broken.
        let date = coerce_date(&bar.date)?;
        let (Some(close), Some(volume)) = (coerce_decimal(&bar.close), coerce_decimal(&bar.volume))
        else {
            continue;
        };
        by_date.insert(
            date,
            CleanBar {
                date,
                open: coerce_decimal(&bar.open),
                high: coerce_decimal(&bar.high),
                low: coerce_decimal(&bar.low),
                close,
                volume,
                amount: coerce_decimal(&bar.amount),
                pct_chg: coerce_decimal(&bar.pct_chg),
            },
        );
    }

    Ok(by_date.into_values().collect())
}
