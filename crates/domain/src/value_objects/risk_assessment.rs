use crate::enums::RiskLevel;
use crate::value_objects::percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weighted contribution of each risk dimension to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorScores {
    pub concentration: Decimal,
    pub diversification: Decimal,
    pub sustainability: Decimal,
    pub yield_risk: Decimal,
}

impl RiskFactorScores {
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.concentration + self.diversification + self.sustainability + self.yield_risk
    }
}

/// Per-dimension view of a portfolio's risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub concentration_risk: RiskLevel,
    /// Largest single allocation.
    pub max_concentration: Percentage,
    /// 0-100, saturating at 15 holdings.
    pub diversification_score: Decimal,
    pub sustainability_risk: RiskLevel,
    pub min_sustainability: Decimal,
    pub avg_sustainability: Decimal,
    pub yield_risk: RiskLevel,
    /// Simple mean of predicted yields (fraction).
    pub avg_yield: Decimal,
    /// Allocation-weighted mean of predicted yields (fraction).
    pub weighted_avg_yield: Decimal,
    pub max_yield: Decimal,
    pub factor_scores: RiskFactorScores,
}

/// Simulated one-day loss thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAtRisk {
    pub var_95: Decimal,
    pub var_99: Decimal,
    /// `var_95` as a fraction of the total allocation.
    pub max_loss_95: Decimal,
    /// `var_99` as a fraction of the total allocation.
    pub max_loss_99: Decimal,
    pub total_allocation: Decimal,
    pub trials: usize,
}

/// Actionable finding, ordered by the dimension that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RiskRecommendation {
    ReduceConcentration { symbol: String, allocation: Percentage },
    AddHoldings { current_count: usize },
    ReviewSustainability { symbol: String, sustainability_score: Decimal },
    InvestigateYield { symbol: String, predicted_yield: Percentage },
    Balanced,
}

impl fmt::Display for RiskRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReduceConcentration { symbol, allocation } => {
                write!(f, "Reduce concentration in {} ({})", symbol, allocation)
            }
            Self::AddHoldings { current_count } => write!(
                f,
                "Add more holdings - currently {} stocks (target: 10-15)",
                current_count
            ),
            Self::ReviewSustainability {
                symbol,
                sustainability_score,
            } => write!(
                f,
                "Review {} - low sustainability ({:.1}%)",
                symbol,
                sustainability_score.round_dp(1)
            ),
            Self::InvestigateYield {
                symbol,
                predicted_yield,
            } => write!(f, "Investigate {} - very high yield ({})", symbol, predicted_yield),
            Self::Balanced => f.write_str("Portfolio risk profile is well-balanced"),
        }
    }
}

/// Complete risk report for one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall_risk: RiskLevel,
    pub risk_score: Decimal,
    pub breakdown: RiskBreakdown,
    pub value_at_risk: ValueAtRisk,
    pub recommendations: Vec<RiskRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_factor_total() {
        let scores = RiskFactorScores {
            concentration: dec!(40),
            diversification: dec!(36.66),
            sustainability: dec!(5),
            yield_risk: dec!(5),
        };
        assert_eq!(scores.total(), dec!(86.66));
    }

    #[test]
    fn test_recommendation_text() {
        let rec = RiskRecommendation::ReduceConcentration {
            symbol: "ITC".to_string(),
            allocation: Percentage::from_points(dec!(30)),
        };
        assert_eq!(rec.to_string(), "Reduce concentration in ITC (30.0%)");
        assert_eq!(
            RiskRecommendation::Balanced.to_string(),
            "Portfolio risk profile is well-balanced"
        );
    }
}
