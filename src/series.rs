use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::WattbotError;

/// One row of the raw hourly price series, before indicator enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub timestamp: NaiveDateTime,
    pub price: f64,
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Load a two-column `timestamp,price` CSV (header row expected).
///
/// Rows are expected to be chronological with strictly increasing
/// timestamps; this is the upstream contract, not re-validated here.
pub fn load_csv(path: &Path) -> Result<Vec<PriceRecord>, WattbotError> {
    if !path.exists() {
        return Err(WattbotError::MissingSeries(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    let mut records = Vec::new();
    for (idx, line) in contents.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = parse_row(line).ok_or_else(|| WattbotError::MalformedRow {
            line: idx + 1,
            reason: format!("expected `timestamp,price`, got `{line}`"),
        })?;
        records.push(record);
    }
    Ok(records)
}

fn parse_row(line: &str) -> Option<PriceRecord> {
    let (timestamp, price) = line.split_once(',')?;
    Some(PriceRecord {
        timestamp: parse_timestamp(timestamp.trim())?,
        price: price.trim().parse().ok()?,
    })
}
