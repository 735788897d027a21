//! Monte Carlo Value-at-Risk.
//!
//! Each trial draws one daily return per holding from `N(0, σ)` where the
//! volatility grows with the predicted yield and shrinks with the
//! sustainability score:
//!
//! ```text
//! σ = base × (1 + predicted_yield) × (1.5 − 0.5 × sustainability / 100)
//! ```
//!
//! The portfolio return is the allocation-weighted sum of the draws. Both
//! confidence levels are read from the same sorted sample.

use crate::error::RiskError;
use divscan_domain::entities::PortfolioHolding;
use divscan_domain::value_objects::ValueAtRisk;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default number of trials.
pub const DEFAULT_TRIALS: usize = 10_000;

/// Default daily volatility before yield and sustainability adjustments.
pub const DEFAULT_BASE_VOLATILITY: f64 = 0.02;

/// Monte Carlo parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of simulated trading days.
    pub trials: usize,
    /// Daily volatility of a holding with zero yield and full sustainability
    /// weighting.
    pub base_volatility: f64,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            base_volatility: DEFAULT_BASE_VOLATILITY,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    #[must_use]
    pub fn with_base_volatility(mut self, base_volatility: f64) -> Self {
        self.base_volatility = base_volatility;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Value-at-Risk simulator owning its random source.
pub struct VarSimulator {
    config: MonteCarloConfig,
    rng: StdRng,
}

impl VarSimulator {
    pub fn new(config: MonteCarloConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Daily volatility assigned to one holding.
    #[must_use]
    pub fn holding_volatility(&self, holding: &PortfolioHolding) -> f64 {
        let predicted_yield = holding.predicted_yield.to_f64().unwrap_or(0.0);
        let sustainability = holding.sustainability_score.to_f64().unwrap_or(0.0) / 100.0;
        self.config.base_volatility * (1.0 + predicted_yield) * (1.5 - sustainability * 0.5)
    }

    /// Simulates one-day portfolio values and reads VaR at 95% and 99%.
    ///
    /// # Arguments
    ///
    /// * `holdings` - Non-empty portfolio with a positive total allocation
    ///
    /// # Returns
    ///
    /// * `Result<ValueAtRisk, RiskError>` - Losses at both confidence levels, floored at zero
    pub fn simulate(&mut self, holdings: &[PortfolioHolding]) -> Result<ValueAtRisk, RiskError> {
        if holdings.is_empty() {
            return Err(RiskError::EmptyPortfolio);
        }
        if self.config.trials == 0 {
            return Err(RiskError::NoTrials);
        }
        let total_allocation: Decimal = holdings.iter().map(|h| h.allocation_amount).sum();
        if total_allocation <= Decimal::ZERO {
            return Err(RiskError::NonPositiveAllocation(total_allocation));
        }

        let legs = holdings
            .iter()
            .map(|holding| {
                let weight = (holding.allocation_percentage / Decimal::ONE_HUNDRED)
                    .to_f64()
                    .unwrap_or(0.0);
                Normal::new(0.0, self.holding_volatility(holding))
                    .map(|normal| (weight, normal))
                    .map_err(|source| RiskError::Distribution {
                        symbol: holding.symbol.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = total_allocation.to_f64().unwrap_or(0.0);
        let mut values: Vec<f64> = (0..self.config.trials)
            .map(|_| {
                let portfolio_return: f64 = legs
                    .iter()
                    .map(|(weight, normal)| weight * normal.sample(&mut self.rng))
                    .sum();
                total * (1.0 + portfolio_return)
            })
            .collect();
        values.sort_by(f64::total_cmp);

        let var_95 = loss_at(&values, dec!(0.95), total_allocation);
        let var_99 = loss_at(&values, dec!(0.99), total_allocation);

        Ok(ValueAtRisk {
            var_95,
            var_99,
            max_loss_95: var_95 / total_allocation,
            max_loss_99: var_99 / total_allocation,
            total_allocation,
            trials: values.len(),
        })
    }
}

/// Index of the `confidence` quantile in a sample of `trials` values sorted
/// ascending: `⌊(1 − confidence) × trials⌋`.
#[must_use]
pub fn quantile_index(trials: usize, confidence: Decimal) -> usize {
    let index = ((Decimal::ONE - confidence) * Decimal::from(trials))
        .floor()
        .to_usize()
        .unwrap_or(0);
    index.min(trials.saturating_sub(1))
}

fn loss_at(sorted_values: &[f64], confidence: Decimal, total_allocation: Decimal) -> Decimal {
    let value = sorted_values[quantile_index(sorted_values.len(), confidence)];
    let value = Decimal::from_f64(value).unwrap_or(total_allocation);
    (total_allocation - value).max(Decimal::ZERO).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio() -> Vec<PortfolioHolding> {
        vec![
            PortfolioHolding::new("ITC", dec!(40000), dec!(40))
                .with_predicted_yield(dec!(0.05))
                .with_sustainability_score(dec!(80)),
            PortfolioHolding::new("COALINDIA", dec!(30000), dec!(30))
                .with_predicted_yield(dec!(0.09))
                .with_sustainability_score(dec!(45)),
            PortfolioHolding::new("HDFCBANK", dec!(30000), dec!(30)),
        ]
    }

    #[test]
    fn test_quantile_index() {
        assert_eq!(quantile_index(10_000, dec!(0.95)), 500);
        assert_eq!(quantile_index(10_000, dec!(0.99)), 100);
        assert_eq!(quantile_index(10, dec!(0.99)), 0);
        assert_eq!(quantile_index(1, dec!(0.5)), 0);
    }

    #[test]
    fn test_holding_volatility() {
        let simulator = VarSimulator::new(MonteCarloConfig::default().with_seed(1));
        let holding = PortfolioHolding::new("X", dec!(100), dec!(100))
            .with_predicted_yield(dec!(0.10))
            .with_sustainability_score(dec!(100));
        // 0.02 × 1.10 × 1.0
        assert!((simulator.holding_volatility(&holding) - 0.022).abs() < 1e-12);

        let fragile = holding.with_sustainability_score(dec!(0));
        assert!((simulator.holding_volatility(&fragile) - 0.033).abs() < 1e-12);
    }

    #[test]
    fn test_var_99_never_below_var_95() {
        for seed in 0..20 {
            let mut simulator =
                VarSimulator::new(MonteCarloConfig::default().with_trials(2_000).with_seed(seed));
            let var = simulator.simulate(&portfolio()).unwrap();
            assert!(var.var_99 >= var.var_95, "seed {seed}: {var:?}");
            assert!(var.var_95 >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = MonteCarloConfig::default().with_trials(1_000).with_seed(42);
        let first = VarSimulator::new(config.clone()).simulate(&portfolio()).unwrap();
        let second = VarSimulator::new(config).simulate(&portfolio()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_var_magnitude_matches_normal_quantile() {
        // Single holding, σ = 0.02 × 1.04 × (1.5 − 0.35) = 0.02392.
        // One-sided 95% quantile of N(0, σ) is 1.645σ ≈ 3.93% of capital.
        let holdings = vec![PortfolioHolding::new("ONE", dec!(100000), dec!(100))];
        let mut simulator = VarSimulator::new(MonteCarloConfig::default().with_seed(7));
        let var = simulator.simulate(&holdings).unwrap();

        let loss_95 = var.max_loss_95.to_f64().unwrap();
        let loss_99 = var.max_loss_99.to_f64().unwrap();
        assert!((loss_95 - 0.0393).abs() < 0.003, "{loss_95}");
        assert!((loss_99 - 0.0556).abs() < 0.005, "{loss_99}");
        assert_eq!(var.trials, DEFAULT_TRIALS);
    }

    #[test]
    fn test_zero_volatility_has_no_loss() {
        let holdings = vec![PortfolioHolding::new("CASH", dec!(5000), dec!(100))];
        let mut simulator = VarSimulator::new(
            MonteCarloConfig::default().with_base_volatility(0.0).with_seed(3),
        );
        let var = simulator.simulate(&holdings).unwrap();
        assert_eq!(var.var_95, Decimal::ZERO);
        assert_eq!(var.var_99, Decimal::ZERO);
    }

    #[test]
    fn test_rejects_degenerate_portfolios() {
        let mut simulator = VarSimulator::new(MonteCarloConfig::default().with_seed(0));
        assert_eq!(simulator.simulate(&[]), Err(RiskError::EmptyPortfolio));

        let unfunded = vec![PortfolioHolding::new("X", Decimal::ZERO, dec!(100))];
        assert_eq!(
            simulator.simulate(&unfunded),
            Err(RiskError::NonPositiveAllocation(Decimal::ZERO))
        );

        let mut idle = VarSimulator::new(MonteCarloConfig::default().with_trials(0));
        assert_eq!(
            idle.simulate(&[PortfolioHolding::new("X", dec!(1), dec!(100))]),
            Err(RiskError::NoTrials)
        );
    }
}
