use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the trading bot.
#[derive(Error, Debug)]
pub enum WattbotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("price series file not found: {0}")]
    MissingSeries(PathBuf),

    #[error("malformed price row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("not enough enriched rows to train on ({rows} survived indicator computation, window is {window})")]
    EmptySeries { rows: usize, window: usize },
}
