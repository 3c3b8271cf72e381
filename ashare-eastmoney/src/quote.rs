//! Auxiliary lookups: realtime snapshot and chip distribution.
//!
//! Both are independent black-box calls with their own failure modes; the
//! daily pipeline never depends on them succeeding.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use ashare_core::types::{ChipDistribution, RealtimeQuote};
use ashare_core::{ChipDistributionProvider, FetchError, RealtimeQuoteProvider};

use crate::fetcher::{EastmoneyFetcher, SOURCE_NAME, check_status, secid, transport_err};

#[derive(Deserialize)]
struct SnapshotEnvelope {
    data: Option<serde_json::Map<String, Value>>,
}

#[derive(Deserialize)]
struct ChipEnvelope {
    data: Option<ChipPayload>,
}

#[derive(Deserialize)]
struct ChipPayload {
    #[serde(default)]
    cyq: Vec<String>,
}

const SCALE: Decimal = Decimal::ONE_HUNDRED;

/// The snapshot endpoint ships prices and ratios as integers scaled by
/// 100; missing values arrive as `"-"` or are absent entirely.
fn scaled_field(data: &serde_json::Map<String, Value>, key: &str) -> Option<Decimal> {
    let raw = match data.get(key)? {
        Value::Number(n) => n.to_string().parse::<Decimal>().ok()?,
        Value::String(s) => s.trim().parse::<Decimal>().ok()?,
        _ => return None,
    };
    Some((raw / SCALE).round_dp(2))
}

fn parse_cell(cell: Option<&str>, what: &str) -> Result<Decimal, FetchError> {
    cell.and_then(|c| c.trim().parse::<Decimal>().ok())
        .ok_or_else(|| FetchError::Parse(format!("chip payload missing {what}")))
}

#[async_trait]
impl RealtimeQuoteProvider for EastmoneyFetcher {
    async fn realtime_quote(&self, stock_code: &str) -> Result<RealtimeQuote, FetchError> {
        self.polite_pause().await;

        let resp = self
            .client()
            .get(self.snapshot_url())
            .query(&[
                ("secid", secid(stock_code)),
                ("invt", "2".to_string()),
                ("fields", "f43,f50,f58,f162,f167,f168".to_string()),
            ])
            .send()
            .await
            .map_err(|e| transport_err(&e))?;
        let resp = check_status(resp)?;

        let envelope: SnapshotEnvelope = resp.json().await.map_err(|e| transport_err(&e))?;
        let data = envelope.data.ok_or_else(|| {
            FetchError::unavailable(SOURCE_NAME, format!("no snapshot for {stock_code}"))
        })?;

        let price = scaled_field(&data, "f43")
            .ok_or_else(|| FetchError::Parse(format!("snapshot missing price for {stock_code}")))?;
        let name = data
            .get("f58")
            .and_then(Value::as_str)
            .map_or_else(|| stock_code.to_string(), str::to_string);

        Ok(RealtimeQuote {
            name,
            price,
            volume_ratio: scaled_field(&data, "f50"),
            turnover_rate: scaled_field(&data, "f168"),
            pe_ratio: scaled_field(&data, "f162"),
            pb_ratio: scaled_field(&data, "f167"),
        })
    }
}

#[async_trait]
impl ChipDistributionProvider for EastmoneyFetcher {
    async fn chip_distribution(&self, stock_code: &str) -> Result<ChipDistribution, FetchError> {
        self.polite_pause().await;

        let resp = self
            .client()
            .get(self.chip_url())
            .query(&[
                ("secid", secid(stock_code)),
                ("fields1", "f1,f2,f3".to_string()),
                ("fields2", "f51,f52,f53,f54,f55".to_string()),
            ])
            .send()
            .await
            .map_err(|e| transport_err(&e))?;
        let resp = check_status(resp)?;

        let envelope: ChipEnvelope = resp.json().await.map_err(|e| transport_err(&e))?;
        let latest = envelope
            .data
            .and_then(|payload| payload.cyq.into_iter().next_back())
            .ok_or_else(|| {
                FetchError::unavailable(SOURCE_NAME, format!("no chip data for {stock_code}"))
            })?;

        // Columns: date, profit ratio (%), average cost, 90% band
        // concentration, optional 70% band concentration.
        let mut cells = latest.split(',');
        let _date = cells.next();
        let profit_ratio = parse_cell(cells.next(), "profit ratio")? / SCALE;
        let avg_cost = parse_cell(cells.next(), "average cost")?;
        let concentration_90 = parse_cell(cells.next(), "90% concentration")?;
        let concentration_70 = cells.next().and_then(|c| c.trim().parse::<Decimal>().ok());

        Ok(ChipDistribution {
            profit_ratio,
            avg_cost,
            concentration_90,
            concentration_70,
        })
    }
}
