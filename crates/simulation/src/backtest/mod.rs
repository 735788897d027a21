//! Periodic-rebalance dividend strategy backtesting.
//!
//! At every rebalance date the portfolio is marked to market, fully
//! liquidated and re-bought with equal weight across the symbols the
//! selection strategy picks. Dividends are attributed to the purchases
//! after the run.

mod config;
mod engine;
mod ledger;

pub use config::{DividendAttribution, StrategyConfig};
pub use engine::{Backtester, backtest, rebalance_dates};
pub use ledger::TransactionLog;
