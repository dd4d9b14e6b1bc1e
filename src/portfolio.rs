use serde::{Deserialize, Serialize};

/// Cash balance plus the inventory currently held and its weighted-average
/// acquisition cost. `cost_basis` is 0 exactly when the inventory is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub balance: f64,
    pub inventory: u32,
    pub cost_basis: f64,
}

impl Portfolio {
    pub fn new(balance: f64) -> Self {
        Portfolio {
            balance,
            inventory: 0,
            cost_basis: 0.0,
        }
    }

    pub fn can_buy(&self, price: f64, max_inventory: u32) -> bool {
        self.inventory < max_inventory && self.balance >= price
    }

    pub fn can_sell(&self) -> bool {
        self.inventory > 0
    }

    /// Buy one unit at `price`, folding it into the running weighted-average
    /// cost basis. The caller checks `can_buy` first.
    pub fn buy(&mut self, price: f64) {
        self.balance -= price;
        let total_cost = self.inventory as f64 * self.cost_basis + price;
        self.inventory += 1;
        self.cost_basis = total_cost / self.inventory as f64;
    }

    /// Sell one unit at `price` and return the realized profit against the
    /// cost basis. The caller checks `can_sell` first.
    pub fn sell(&mut self, price: f64) -> f64 {
        self.balance += price;
        self.inventory -= 1;
        let profit = price - self.cost_basis;
        if self.inventory == 0 {
            self.cost_basis = 0.0;
        }
        profit
    }

    /// Balance plus the mark-to-market value of held inventory.
    pub fn net_worth(&self, price: f64) -> f64 {
        self.balance + self.inventory as f64 * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_updates_weighted_cost_basis() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio.buy(100.0);
        assert_eq!(portfolio.cost_basis, 100.0);
        portfolio.buy(200.0);
        assert_eq!(portfolio.cost_basis, 150.0);
        assert_eq!(portfolio.inventory, 2);
        assert_eq!(portfolio.balance, 700.0);
    }

    #[test]
    fn test_sell_realizes_profit_against_cost_basis() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio.buy(100.0);
        let profit = portfolio.sell(150.0);
        assert_eq!(profit, 50.0);
        assert_eq!(portfolio.balance, 1050.0);
    }

    #[test]
    fn test_cost_basis_zero_iff_inventory_empty() {
        let mut portfolio = Portfolio::new(1000.0);
        assert_eq!(portfolio.cost_basis, 0.0);
        portfolio.buy(100.0);
        portfolio.buy(120.0);
        assert!(portfolio.cost_basis > 0.0);
        portfolio.sell(90.0);
        assert!(portfolio.cost_basis > 0.0);
        portfolio.sell(90.0);
        assert_eq!(portfolio.inventory, 0);
        assert_eq!(portfolio.cost_basis, 0.0);
    }

    #[test]
    fn test_preconditions() {
        let mut portfolio = Portfolio::new(50.0);
        assert!(!portfolio.can_buy(100.0, 10));
        assert!(portfolio.can_buy(50.0, 10));
        assert!(!portfolio.can_sell());
        portfolio.buy(50.0);
        assert!(!portfolio.can_buy(10.0, 1));
        assert!(portfolio.can_sell());
    }

    #[test]
    fn test_net_worth_marks_to_market() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio.buy(100.0);
        portfolio.buy(100.0);
        assert_eq!(portfolio.net_worth(130.0), 800.0 + 260.0);
    }
}
