//! Trailing-yield threshold selection.

use super::{Quote, SelectionContext, SelectionStrategy};
use rust_decimal::Decimal;

/// Holds every symbol whose trailing dividend yield is at least
/// `min_yield`.
#[derive(Debug, Clone)]
pub struct YieldThreshold {
    /// Minimum trailing yield as a fraction (0.03 = 3%).
    pub min_yield: Decimal,
}

impl YieldThreshold {
    #[must_use]
    pub fn new(min_yield: Decimal) -> Self {
        Self { min_yield }
    }
}

impl SelectionStrategy for YieldThreshold {
    fn select<'a>(&self, context: &SelectionContext<'a>) -> Vec<Quote<'a>> {
        context
            .quotes
            .iter()
            .filter(|quote| quote.bar.dividend_yield >= self.min_yield)
            .copied()
            .collect()
    }

    fn name(&self) -> &'static str {
        "Yield Threshold"
    }
}
