use crate::error::BacktestError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default backtest universe.
pub const DEFAULT_SYMBOLS: [&str; 5] = ["RELIANCE", "TCS", "INFY", "HDFCBANK", "ITC"];

/// Which dividend payments a purchase is credited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividendAttribution {
    /// Every payment after the purchase date until the end of the data,
    /// even after the shares were sold.
    #[default]
    AllSubsequent,
    /// Payments after the purchase date up to and including the date the
    /// shares were sold.
    OwnershipWindow,
}

/// Parameters of a yield-threshold rebalancing strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub symbols: Vec<String>,
    /// Minimum trailing yield (fraction) a symbol needs to be bought.
    pub min_yield: Decimal,
    pub rebalance_interval_months: u32,
    /// Length of generated market history.
    pub horizon_years: u32,
    /// Periods per year used to annualize the Sharpe ratio.
    pub annualization_factor: f64,
    pub attribution: DividendAttribution,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            min_yield: dec!(0.03),
            rebalance_interval_months: 6,
            horizon_years: 3,
            annualization_factor: 252.0,
            attribution: DividendAttribution::default(),
        }
    }
}

impl StrategyConfig {
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_min_yield(mut self, min_yield: Decimal) -> Self {
        self.min_yield = min_yield;
        self
    }

    #[must_use]
    pub fn with_rebalance_interval(mut self, months: u32) -> Self {
        self.rebalance_interval_months = months;
        self
    }

    #[must_use]
    pub fn with_horizon_years(mut self, years: u32) -> Self {
        self.horizon_years = years;
        self
    }

    #[must_use]
    pub fn with_annualization_factor(mut self, factor: f64) -> Self {
        self.annualization_factor = factor;
        self
    }

    #[must_use]
    pub fn with_attribution(mut self, attribution: DividendAttribution) -> Self {
        self.attribution = attribution;
        self
    }

    /// Checks the configuration before any data is generated.
    ///
    /// # Errors
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), BacktestError> {
        if self.symbols.is_empty() {
            return Err(BacktestError::EmptyUniverse);
        }
        if self.rebalance_interval_months == 0 {
            return Err(BacktestError::ZeroInterval);
        }
        if self.horizon_years == 0 {
            return Err(BacktestError::ZeroHorizon);
        }
        Ok(())
    }
}
