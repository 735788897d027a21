use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A sized position proposed by an external portfolio optimizer.
///
/// `allocation_percentage` and `sustainability_score` are in percentage
/// points (0-100). `predicted_yield` is a fraction like every other yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHolding {
    pub symbol: String,
    pub allocation_amount: Decimal,
    pub allocation_percentage: Decimal,
    #[serde(default = "default_predicted_yield")]
    pub predicted_yield: Decimal,
    #[serde(default = "default_sustainability_score")]
    pub sustainability_score: Decimal,
}

fn default_predicted_yield() -> Decimal {
    dec!(0.04)
}

fn default_sustainability_score() -> Decimal {
    dec!(70)
}

impl PortfolioHolding {
    /// Creates a holding with a 4% predicted yield and a sustainability
    /// score of 70.
    pub fn new(
        symbol: impl Into<String>,
        allocation_amount: Decimal,
        allocation_percentage: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            allocation_amount,
            allocation_percentage,
            predicted_yield: default_predicted_yield(),
            sustainability_score: default_sustainability_score(),
        }
    }

    #[must_use]
    pub fn with_predicted_yield(mut self, predicted_yield: Decimal) -> Self {
        self.predicted_yield = predicted_yield;
        self
    }

    #[must_use]
    pub fn with_sustainability_score(mut self, score: Decimal) -> Self {
        self.sustainability_score = score;
        self
    }
}
