use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::series::PriceRecord;

/// A price row augmented with the technical indicators the agent observes:
/// trailing rolling mean, price-to-mean ratio, first-difference momentum and
/// rolling dispersion, plus calendar fields pulled from the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub timestamp: NaiveDateTime,
    pub price: f64,
    pub hour: u32,
    pub day_of_week: u32,
    pub month: u32,
    pub rolling_mean: f64,
    pub price_ratio: f64,
    pub momentum: f64,
    pub volatility: f64,
}

/// Enrich a raw chronological series with indicators over a trailing
/// `window` of rows. Rows in the series prefix where the window is not yet
/// fully populated are dropped, so the output is `window - 1` rows shorter
/// than the input (empty if the input is too short).
pub fn enrich(records: &[PriceRecord], window: usize) -> Vec<EnrichedRecord> {
    assert!(window >= 2, "indicator window must cover at least two rows");
    if records.len() < window {
        return Vec::new();
    }
    (window - 1..records.len())
        .map(|i| {
            let trailing = &records[i + 1 - window..=i];
            let record = &records[i];
            let rolling_mean = mean(trailing);
            EnrichedRecord {
                timestamp: record.timestamp,
                price: record.price,
                hour: record.timestamp.hour(),
                // Monday = 0, matching the upstream calendar convention.
                day_of_week: record.timestamp.weekday().num_days_from_monday(),
                month: record.timestamp.month(),
                rolling_mean,
                price_ratio: record.price / rolling_mean,
                momentum: record.price - records[i - 1].price,
                volatility: std_dev(trailing, rolling_mean),
            }
        })
        .collect()
}

fn mean(records: &[PriceRecord]) -> f64 {
    records.iter().map(|r| r.price).sum::<f64>() / records.len() as f64
}

/// Sample standard deviation over the trailing window.
fn std_dev(records: &[PriceRecord], mean: f64) -> f64 {
    let sum_sq = records
        .iter()
        .map(|r| (r.price - mean).powi(2))
        .sum::<f64>();
    (sum_sq / (records.len() - 1) as f64).sqrt()
}
