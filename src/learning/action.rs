use rand::Rng;
use rand::distr::Distribution;
use rand::distr::StandardUniform as Standard;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount, EnumIter};

/// The full action space: hold, buy one unit, sell one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount)]
pub enum Action {
    Hold,
    Buy,
    Sell,
}

impl Action {
    /// Position of this action in the per-state value vector.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Distribution<Action> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        match rng.random_range(0..=2) {
            0 => Action::Hold,
            1 => Action::Buy,
            _ => Action::Sell,
        }
    }
}
