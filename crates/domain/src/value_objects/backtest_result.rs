use crate::enums::TransactionAction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A simulated trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub symbol: String,
    pub action: TransactionAction,
    pub shares: u64,
    pub price: Decimal,
}

impl Transaction {
    pub fn buy(date: NaiveDate, symbol: impl Into<String>, shares: u64, price: Decimal) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            action: TransactionAction::Buy,
            shares,
            price,
        }
    }

    pub fn sell(date: NaiveDate, symbol: impl Into<String>, shares: u64, price: Decimal) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            action: TransactionAction::Sell,
            shares,
            price,
        }
    }

    /// Cash moved by the trade.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        Decimal::from(self.shares) * self.price
    }
}

/// Portfolio state recorded right after a rebalance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuePoint {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
    pub cash: Decimal,
    pub invested: Decimal,
}

/// Outcome of a strategy backtest. Returns and drawdown are fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub initial_capital: Decimal,
    pub final_value: Decimal,
    pub total_dividends: Decimal,
    pub total_return: Decimal,
    pub annualized_return: Decimal,
    pub sharpe_ratio: Option<Decimal>,
    pub max_drawdown: Decimal,
    /// Dividends received relative to the initial capital.
    pub dividend_yield_on_cost: Decimal,
    pub rebalance_count: u32,
    pub skipped_rebalances: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub transactions: Vec<Transaction>,
    pub portfolio_history: Vec<PortfolioValuePoint>,
}

impl BacktestResult {
    /// Absolute gain including dividends.
    #[must_use]
    pub fn total_return_amount(&self) -> Decimal {
        self.final_value + self.total_dividends - self.initial_capital
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
