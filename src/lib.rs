use crate::learning::{agent::QLearningAgent, state_key::ThresholdDiscretizer};

pub mod config;
pub mod error;
pub mod features;
pub mod learning;
pub mod market;
pub mod portfolio;
pub mod series;
pub mod training;

pub use error::WattbotError;

/// The default agent: tabular Q-learner over the threshold discretization.
pub type Bot = QLearningAgent<ThresholdDiscretizer>;
