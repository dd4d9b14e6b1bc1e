use serde::{Deserialize, Serialize};

use crate::features::EnrichedRecord;
use crate::learning::action::Action;
use crate::portfolio::Portfolio;

/// What the agent sees at one time step: the enriched market row plus the
/// portfolio fields that condition its decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub price: f64,
    pub hour: u32,
    pub day_of_week: u32,
    pub month: u32,
    pub balance: f64,
    pub inventory: u32,
    pub price_ratio: f64,
    pub momentum: f64,
    /// True iff inventory is held and the current price exceeds its cost basis.
    pub profitable: bool,
}

/// Asymmetric shaping applied to realized profit on SELL: gains are scaled
/// by `gain`, losses by `loss` (losses weighted more heavily by default).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    pub gain: f64,
    pub loss: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        RewardWeights {
            gain: 1.5,
            loss: 2.0,
        }
    }
}

/// Result of one environment transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
}

/// Deterministic replay of a fixed enriched price series against a single
/// bounded-inventory portfolio.
#[derive(Debug)]
pub struct MarketEnv {
    series: Vec<EnrichedRecord>,
    current_step: usize,
    /// Last valid index into the series; reaching it terminates the episode.
    max_steps: usize,
    initial_balance: f64,
    max_inventory: u32,
    rewards: RewardWeights,
    portfolio: Portfolio,
    net_worth: f64,
}

impl MarketEnv {
    /// The series must be chronologically ordered and hold at least two
    /// rows, so every episode has at least one transition.
    pub fn new(
        series: Vec<EnrichedRecord>,
        initial_balance: f64,
        max_inventory: u32,
        rewards: RewardWeights,
    ) -> Self {
        assert!(series.len() >= 2, "market environment needs at least two price rows");
        let max_steps = series.len() - 1;
        MarketEnv {
            series,
            current_step: 0,
            max_steps,
            initial_balance,
            max_inventory,
            rewards,
            portfolio: Portfolio::new(initial_balance),
            net_worth: initial_balance,
        }
    }

    /// Restore the portfolio and rewind to the first row of the series.
    pub fn reset(&mut self) -> Observation {
        self.current_step = 0;
        self.portfolio = Portfolio::new(self.initial_balance);
        self.net_worth = self.initial_balance;
        self.observation()
    }

    /// Apply `action` at the current row and advance one step.
    ///
    /// Infeasible BUY/SELL requests degrade to a no-op HOLD outcome rather
    /// than erroring. Callers must stop stepping once `done` is reported.
    pub fn step(&mut self, action: Action) -> Step {
        let price = self.series[self.current_step].price;
        let reward = match action {
            Action::Buy if self.portfolio.can_buy(price, self.max_inventory) => {
                // Acquisition is not directly rewarded.
                self.portfolio.buy(price);
                0.0
            }
            Action::Sell if self.portfolio.can_sell() => {
                let profit = self.portfolio.sell(price);
                if profit > 0.0 {
                    profit * self.rewards.gain
                } else {
                    profit * self.rewards.loss
                }
            }
            _ => 0.0,
        };

        self.current_step += 1;
        let done = self.current_step >= self.max_steps;
        self.net_worth = self.portfolio.net_worth(price);

        Step {
            observation: self.observation(),
            reward,
            done,
        }
    }

    fn observation(&self) -> Observation {
        let row = &self.series[self.current_step];
        Observation {
            price: row.price,
            hour: row.hour,
            day_of_week: row.day_of_week,
            month: row.month,
            balance: self.portfolio.balance,
            inventory: self.portfolio.inventory,
            price_ratio: row.price_ratio,
            momentum: row.momentum,
            profitable: self.portfolio.inventory > 0 && row.price > self.portfolio.cost_basis,
        }
    }

    /// Net worth as of the last processed step.
    pub fn net_worth(&self) -> f64 {
        self.net_worth
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }
}
