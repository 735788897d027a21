//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use divscan_simulation::prelude::*;
//! ```

// Backtesting
pub use crate::backtest::{
    Backtester, DividendAttribution, StrategyConfig, TransactionLog, backtest, rebalance_dates,
};

// Errors
pub use crate::error::{BacktestError, RiskError};

// Market data
pub use crate::market_data::{
    DailyBar, HistoricalMarketData, MarketSeries, MarketSeriesGenerator, SyntheticMarketConfig,
    SyntheticMarketGenerator,
};

// Monte Carlo
pub use crate::monte_carlo::{MonteCarloConfig, VarSimulator};

// Risk assessment
pub use crate::risk::{RiskAssessor, assess_risk};

// Strategies
pub use crate::strategies::{Quote, SelectionContext, SelectionStrategy, YieldThreshold};
