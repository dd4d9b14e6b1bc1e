use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WattbotError;
use crate::market::RewardWeights;

/// Q-learning hyperparameters. `seed` fixes the agent's random source for
/// reproducible runs; leave it unset to seed from the OS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RlConfig {
    pub learning_rate: f64,
    pub discount: f64,
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub epsilon_min: f64,
    pub seed: Option<u64>,
}

impl Default for RlConfig {
    fn default() -> Self {
        RlConfig {
            learning_rate: 0.1,
            discount: 0.99,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            epsilon_min: 0.01,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub episodes: u32,
    pub initial_balance: f64,
    pub max_inventory: u32,
    /// Trailing number of enriched rows to train on, weighting learning
    /// toward recent market regimes.
    pub training_window: usize,
    /// Trailing rows per rolling-indicator computation.
    pub indicator_window: usize,
    /// Log a progress line every this many episodes.
    pub report_every: u32,
    pub model_path: PathBuf,
    pub scores_path: PathBuf,
    pub rl: RlConfig,
    pub rewards: RewardWeights,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            episodes: 500,
            initial_balance: 10_000.0,
            max_inventory: 10,
            training_window: 15_000,
            indicator_window: 24,
            report_every: 50,
            model_path: PathBuf::from("models/q_table.json"),
            scores_path: PathBuf::from("models/scores.json"),
            rl: RlConfig::default(),
            rewards: RewardWeights::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, WattbotError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("episodes = 25\n[rl]\nseed = 7\n").unwrap();
        assert_eq!(config.episodes, 25);
        assert_eq!(config.rl.seed, Some(7));
        assert_eq!(config.rl.discount, 0.99);
        assert_eq!(config.max_inventory, 10);
    }

    #[test]
    fn test_read_from_file() {
        let config = Config::from_file(Path::new("./wattbot.toml")).unwrap();
        assert!(config.episodes > 0);
    }
}
