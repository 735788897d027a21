use super::recommendations::generate_recommendations;
use crate::error::RiskError;
use crate::monte_carlo::{MonteCarloConfig, VarSimulator};
use divscan_domain::entities::PortfolioHolding;
use divscan_domain::enums::RiskLevel;
use divscan_domain::value_objects::{Percentage, RiskAssessment, RiskBreakdown, RiskFactorScores};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

/// Holding count at which diversification is scored 100.
const FULL_DIVERSIFICATION_HOLDINGS: Decimal = dec!(15);

/// Assesses portfolios with a reusable Monte Carlo simulator.
pub struct RiskAssessor {
    simulator: VarSimulator,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new(MonteCarloConfig::default())
    }
}

impl RiskAssessor {
    pub fn new(config: MonteCarloConfig) -> Self {
        Self {
            simulator: VarSimulator::new(config),
        }
    }

    /// Produces the full risk report for `holdings`.
    ///
    /// # Errors
    /// Rejects an empty portfolio or one whose total allocation is not
    /// positive.
    pub fn assess(&mut self, holdings: &[PortfolioHolding]) -> Result<RiskAssessment, RiskError> {
        let breakdown = build_breakdown(holdings)?;
        let value_at_risk = self.simulator.simulate(holdings)?;

        let risk_score = breakdown.factor_scores.total();
        let overall_risk = classify_overall(risk_score);
        let recommendations = generate_recommendations(&breakdown.factor_scores, holdings);

        info!(
            holdings = holdings.len(),
            risk_score = %risk_score,
            overall = %overall_risk,
            var_95 = %value_at_risk.var_95,
            var_99 = %value_at_risk.var_99,
            "Portfolio risk assessed"
        );

        Ok(RiskAssessment {
            overall_risk,
            risk_score,
            breakdown,
            value_at_risk,
            recommendations,
        })
    }
}

/// Assesses a portfolio with the default simulation settings.
///
/// # Errors
/// See [`RiskAssessor::assess`].
pub fn assess_risk(holdings: &[PortfolioHolding]) -> Result<RiskAssessment, RiskError> {
    RiskAssessor::default().assess(holdings)
}

fn build_breakdown(holdings: &[PortfolioHolding]) -> Result<RiskBreakdown, RiskError> {
    if holdings.is_empty() {
        return Err(RiskError::EmptyPortfolio);
    }
    let total_allocation: Decimal = holdings.iter().map(|h| h.allocation_amount).sum();
    if total_allocation <= Decimal::ZERO {
        return Err(RiskError::NonPositiveAllocation(total_allocation));
    }

    let count = Decimal::from(holdings.len());
    let max_of = |field: fn(&PortfolioHolding) -> Decimal| {
        holdings.iter().map(field).max().unwrap_or(Decimal::ZERO)
    };
    let mean_of = |field: fn(&PortfolioHolding) -> Decimal| {
        holdings.iter().map(field).sum::<Decimal>() / count
    };

    let max_concentration = max_of(|h| h.allocation_percentage);
    let min_sustainability = holdings
        .iter()
        .map(|h| h.sustainability_score)
        .min()
        .unwrap_or(Decimal::ZERO);
    let avg_sustainability = mean_of(|h| h.sustainability_score);
    let max_yield = max_of(|h| h.predicted_yield);
    let avg_yield = mean_of(|h| h.predicted_yield);
    let weighted_avg_yield = holdings
        .iter()
        .map(|h| h.predicted_yield * h.allocation_amount)
        .sum::<Decimal>()
        / total_allocation;

    let concentration_risk = classify_concentration(max_concentration);
    let diversification = diversification_score(holdings.len());
    let sustainability_risk = classify_sustainability(min_sustainability);
    let yield_risk = classify_yield(max_yield, weighted_avg_yield);
    let factor_scores = factor_scores(
        concentration_risk,
        diversification,
        sustainability_risk,
        yield_risk,
    );

    debug!(
        concentration = %concentration_risk,
        diversification = %diversification,
        sustainability = %sustainability_risk,
        yield_risk = %yield_risk,
        "Risk dimensions classified"
    );

    Ok(RiskBreakdown {
        concentration_risk,
        max_concentration: Percentage::from_points(max_concentration),
        diversification_score: diversification,
        sustainability_risk,
        min_sustainability,
        avg_sustainability,
        yield_risk,
        avg_yield,
        weighted_avg_yield,
        max_yield,
        factor_scores,
    })
}

/// HIGH above 25% in one holding, MEDIUM above 15%.
#[must_use]
pub fn classify_concentration(max_allocation_points: Decimal) -> RiskLevel {
    if max_allocation_points > dec!(25) {
        RiskLevel::High
    } else if max_allocation_points > dec!(15) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// `min(100, holdings / 15 × 100)`.
#[must_use]
pub fn diversification_score(holding_count: usize) -> Decimal {
    (Decimal::from(holding_count) / FULL_DIVERSIFICATION_HOLDINGS * Decimal::ONE_HUNDRED)
        .min(Decimal::ONE_HUNDRED)
}

/// Classifies the weakest sustainability score: HIGH below 50, MEDIUM below
/// 70.
#[must_use]
pub fn classify_sustainability(min_sustainability: Decimal) -> RiskLevel {
    if min_sustainability < dec!(50) {
        RiskLevel::High
    } else if min_sustainability < dec!(70) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// HIGH when any predicted yield exceeds 12%, MEDIUM when the weighted
/// average exceeds 8%.
#[must_use]
pub fn classify_yield(max_yield: Decimal, weighted_avg_yield: Decimal) -> RiskLevel {
    if max_yield > dec!(0.12) {
        RiskLevel::High
    } else if weighted_avg_yield > dec!(0.08) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Converts classified dimensions into weighted scores.
#[must_use]
pub fn factor_scores(
    concentration: RiskLevel,
    diversification: Decimal,
    sustainability: RiskLevel,
    yield_risk: RiskLevel,
) -> RiskFactorScores {
    let weight = |level: RiskLevel, high: Decimal, medium: Decimal, low: Decimal| match level {
        RiskLevel::High => high,
        RiskLevel::Medium => medium,
        RiskLevel::Low => low,
    };

    RiskFactorScores {
        concentration: weight(concentration, dec!(40), dec!(20), dec!(10)),
        diversification: (dec!(40) - diversification / dec!(2)).max(Decimal::ZERO),
        sustainability: weight(sustainability, dec!(30), dec!(15), dec!(5)),
        yield_risk: weight(yield_risk, dec!(25), dec!(12), dec!(5)),
    }
}

/// HIGH above 80, MEDIUM above 50.
#[must_use]
pub fn classify_overall(risk_score: Decimal) -> RiskLevel {
    if risk_score > dec!(80) {
        RiskLevel::High
    } else if risk_score > dec!(50) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
