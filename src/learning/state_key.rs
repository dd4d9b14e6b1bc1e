use serde::{Deserialize, Serialize};

use crate::market::Observation;

/// Price level relative to the trailing rolling mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceStatus {
    Cheap,
    Normal,
    Expensive,
}

/// Sign of the first-difference momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    FlatOrDown,
    Up,
}

/// A deliberately lossy projection of an [`Observation`] onto a small
/// categorical tuple, so the value store stays an exact lookup table
/// instead of a function approximator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub hour: u32,
    pub inventory: u32,
    pub price_status: PriceStatus,
    pub trend: Trend,
    pub profitable: bool,
}

/// Maps observations to table keys. The key space must stay small enough
/// for exhaustive tabular coverage within the training episode budget.
pub trait Discretizer {
    fn state_key(&self, obs: &Observation) -> StateKey;
}

/// The default projection: fixed thresholds on the price ratio, momentum
/// sign for the trend, and the raw hour / inventory / profitability fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdDiscretizer {
    pub cheap_below: f64,
    pub expensive_above: f64,
}

impl Default for ThresholdDiscretizer {
    fn default() -> Self {
        ThresholdDiscretizer {
            cheap_below: 0.90,
            expensive_above: 1.10,
        }
    }
}

impl Discretizer for ThresholdDiscretizer {
    fn state_key(&self, obs: &Observation) -> StateKey {
        let price_status = if obs.price_ratio < self.cheap_below {
            PriceStatus::Cheap
        } else if obs.price_ratio > self.expensive_above {
            PriceStatus::Expensive
        } else {
            PriceStatus::Normal
        };
        let trend = if obs.momentum > 0.0 {
            Trend::Up
        } else {
            Trend::FlatOrDown
        };
        StateKey {
            hour: obs.hour,
            inventory: obs.inventory,
            price_status,
            trend,
            profitable: obs.profitable,
        }
    }
}
