//! Portfolio risk and strategy backtesting.
//!
//! This crate provides the stochastic side of the screener:
//! - Monte Carlo Value-at-Risk over proposed portfolio holdings
//! - Rule-based portfolio risk assessment with recommendations
//! - Synthetic and supplied daily market series
//! - Periodic-rebalance dividend strategy backtesting

/// Prelude module for convenient imports.
pub mod prelude;

/// Backtest configuration, engine and transaction ledger.
pub mod backtest;
/// Error types.
pub mod error;
/// Daily market series and their generators.
pub mod market_data;
/// Monte Carlo Value-at-Risk simulator.
pub mod monte_carlo;
/// Portfolio risk assessment.
pub mod risk;
/// Symbol selection strategies used at each rebalance.
pub mod strategies;
