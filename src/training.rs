use std::path::Path;

use log::info;

use crate::Bot;
use crate::config::Config;
use crate::error::WattbotError;
use crate::features::EnrichedRecord;
use crate::learning::agent::QLearningAgent;
use crate::learning::state_key::ThresholdDiscretizer;
use crate::market::{MarketEnv, Step};

/// Drives repeated episodes of agent/environment interaction over a fixed
/// enriched series and records the net worth each episode ends with.
#[derive(Debug)]
pub struct Trainer {
    env: MarketEnv,
    agent: Bot,
    episodes: u32,
    report_every: u32,
}

impl Trainer {
    /// Truncates the series to the trailing `training_window` rows before
    /// training. An empty series is a precondition failure, not a no-op.
    pub fn new(mut series: Vec<EnrichedRecord>, config: &Config) -> Result<Self, WattbotError> {
        if series.len() < 2 {
            return Err(WattbotError::EmptySeries {
                rows: series.len(),
                window: config.indicator_window,
            });
        }
        if series.len() > config.training_window {
            series.drain(..series.len() - config.training_window);
        }
        info!("Training on the trailing {} rows", series.len());

        let env = MarketEnv::new(
            series,
            config.initial_balance,
            config.max_inventory,
            config.rewards,
        );
        let agent = QLearningAgent::new(&config.rl, ThresholdDiscretizer::default());
        Ok(Trainer {
            env,
            agent,
            episodes: config.episodes,
            report_every: config.report_every.max(1),
        })
    }

    /// Run every episode to completion and return the per-episode net worths.
    pub fn run(&mut self) -> Vec<f64> {
        let mut scores = Vec::with_capacity(self.episodes as usize);
        for episode in 0..self.episodes {
            let mut obs = self.env.reset();
            loop {
                let action = self.agent.act(&obs);
                let Step {
                    observation: next,
                    reward,
                    done,
                } = self.env.step(action);
                self.agent.learn(&obs, action, reward, &next, done);
                obs = next;
                if done {
                    break;
                }
            }
            scores.push(self.env.net_worth());

            if (episode + 1) % self.report_every == 0 {
                info!(
                    "Episode {}/{} | net worth: {:.2} | exploration: {:.1}%",
                    episode + 1,
                    self.episodes,
                    self.env.net_worth(),
                    self.agent.epsilon() * 100.0
                );
            }
        }
        scores
    }

    /// Persist the learned table.
    pub fn save_model(&self, path: &Path) -> Result<(), WattbotError> {
        self.agent.save(path)
    }

    pub fn agent(&self) -> &Bot {
        &self.agent
    }
}
