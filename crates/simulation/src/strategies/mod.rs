//! Symbol selection strategies evaluated at each rebalance date.

mod yield_threshold;

pub use yield_threshold::YieldThreshold;

use crate::market_data::DailyBar;
use chrono::NaiveDate;

/// Latest known bar of one symbol as of a rebalance date.
#[derive(Debug, Clone, Copy)]
pub struct Quote<'a> {
    pub symbol: &'a str,
    pub bar: &'a DailyBar,
}

/// Market view handed to a strategy.
#[derive(Debug, Clone)]
pub struct SelectionContext<'a> {
    pub date: NaiveDate,
    /// One quote per symbol that has traded on or before `date`, in
    /// universe order.
    pub quotes: Vec<Quote<'a>>,
}

/// Decides which symbols to hold until the next rebalance.
pub trait SelectionStrategy {
    /// Returns the quotes to buy with equal weight. An empty selection skips
    /// the rebalance.
    fn select<'a>(&self, context: &SelectionContext<'a>) -> Vec<Quote<'a>>;

    /// Returns the name of the strategy.
    fn name(&self) -> &'static str;
}
