use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while assessing portfolio risk.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("Portfolio has no holdings")]
    EmptyPortfolio,
    #[error("Portfolio total allocation must be positive, got {0}")]
    NonPositiveAllocation(Decimal),
    #[error("Monte Carlo trial count must be positive")]
    NoTrials,
    #[error("Invalid return distribution for {symbol}: {source}")]
    Distribution {
        symbol: String,
        #[source]
        source: rand_distr::NormalError,
    },
}

/// Errors raised while running a backtest.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BacktestError {
    #[error("Strategy universe is empty")]
    EmptyUniverse,
    #[error("Initial capital must be positive, got {0}")]
    NonPositiveCapital(Decimal),
    #[error("Rebalance interval must be at least one month")]
    ZeroInterval,
    #[error("Backtest horizon must be at least one year")]
    ZeroHorizon,
    #[error("No market data for symbol {0}")]
    MissingSeries(String),
    #[error("No rebalance could be executed over {start} to {end}")]
    NoRebalanceExecuted {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("Invalid market distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),
}
