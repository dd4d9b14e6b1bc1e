use std::path::{Path, PathBuf};

use itertools::{Itertools, MinMaxResult};
use log::info;
use wattbot::{WattbotError, config::Config, features, series, training::Trainer};

const CONFIG_PATH: &str = "wattbot.toml";
const DEFAULT_DATA_PATH: &str = "data/prices.csv";

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), WattbotError> {
    let data_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
    let config = if Path::new(CONFIG_PATH).exists() {
        Config::from_file(Path::new(CONFIG_PATH))?
    } else {
        Config::default()
    };

    let records = series::load_csv(&data_path)?;
    info!("Loaded {} price records from {}", records.len(), data_path.display());

    let enriched = features::enrich(&records, config.indicator_window);
    if enriched.is_empty() {
        return Err(WattbotError::EmptySeries {
            rows: records.len(),
            window: config.indicator_window,
        });
    }
    info!("Computed indicators: {} enriched rows", enriched.len());

    let mut trainer = Trainer::new(enriched, &config)?;
    info!("Starting training ({} episodes)", config.episodes);
    let scores = trainer.run();

    trainer.save_model(&config.model_path)?;
    if let Some(parent) = config.scores_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.scores_path, serde_json::to_string(&scores)?)?;
    if let MinMaxResult::MinMax(worst, best) = scores.iter().copied().minmax_by(f64::total_cmp) {
        info!("Net worth across episodes: min {worst:.2}, max {best:.2}");
    }
    info!(
        "Training complete | final net worth: {:.2} | curve written to {}",
        scores.last().copied().unwrap_or(config.initial_balance),
        config.scores_path.display()
    );
    Ok(())
}
