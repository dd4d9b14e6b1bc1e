use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use crate::error::WattbotError;
use crate::learning::action::Action;
use crate::learning::serde_utils;
use crate::learning::state_key::StateKey;

/// One action-value vector per visited state key.
pub type ValueVector = [f64; Action::COUNT];

/// The tabular value store. Entries are created lazily on first visit and
/// never removed, so the table grows monotonically over a training run.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct QTable {
    #[serde(with = "serde_utils")]
    tab: HashMap<StateKey, ValueVector>,
}

impl QTable {
    pub fn new() -> Self {
        QTable::default()
    }

    pub fn values(&self, key: &StateKey) -> Option<&ValueVector> {
        self.tab.get(key)
    }

    /// Value vector for `key`, zero-initialized on first visit.
    pub fn values_or_init(&mut self, key: StateKey) -> &mut ValueVector {
        self.tab.entry(key).or_insert([0.0; Action::COUNT])
    }

    /// Greedy action for a visited key, ties broken by the first maximal
    /// action in declaration order. `None` for an unseen key.
    pub fn best_action(&self, key: &StateKey) -> Option<Action> {
        let values = self.tab.get(key)?;
        let mut best = Action::Hold;
        for action in Action::iter() {
            if values[action.index()] > values[best.index()] {
                best = action;
            }
        }
        Some(best)
    }

    /// Max action-value for `key`, or 0 for an unseen key.
    pub fn max_value(&self, key: &StateKey) -> f64 {
        match self.tab.get(key) {
            Some(values) => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            None => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.tab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tab.is_empty()
    }

    /// Serialize the whole table to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), WattbotError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    /// Deserialize a table previously written by [`QTable::save`].
    pub fn load(path: &Path) -> Result<Self, WattbotError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
