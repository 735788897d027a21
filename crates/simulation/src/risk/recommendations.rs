use divscan_domain::entities::PortfolioHolding;
use divscan_domain::value_objects::{Percentage, RiskFactorScores, RiskRecommendation};
use rust_decimal_macros::dec;

/// Maximum holdings listed per sustainability or yield finding.
const MAX_LISTED: usize = 2;

/// Derives recommendations from the weighted factor scores.
///
/// Thresholds: concentration above 30, diversification above 20,
/// sustainability above 20, yield above 20. With no finding the result is a
/// single [`RiskRecommendation::Balanced`].
pub fn generate_recommendations(
    scores: &RiskFactorScores,
    holdings: &[PortfolioHolding],
) -> Vec<RiskRecommendation> {
    let mut recommendations = Vec::new();

    // First holding wins ties.
    if scores.concentration > dec!(30) {
        if let Some(largest) = holdings.iter().rev().max_by_key(|h| h.allocation_percentage) {
            recommendations.push(RiskRecommendation::ReduceConcentration {
                symbol: largest.symbol.clone(),
                allocation: Percentage::from_points(largest.allocation_percentage),
            });
        }
    }

    if scores.diversification > dec!(20) {
        recommendations.push(RiskRecommendation::AddHoldings {
            current_count: holdings.len(),
        });
    }

    if scores.sustainability > dec!(20) {
        recommendations.extend(
            holdings
                .iter()
                .filter(|h| h.sustainability_score < dec!(60))
                .take(MAX_LISTED)
                .map(|h| RiskRecommendation::ReviewSustainability {
                    symbol: h.symbol.clone(),
                    sustainability_score: h.sustainability_score,
                }),
        );
    }

    if scores.yield_risk > dec!(20) {
        recommendations.extend(
            holdings
                .iter()
                .filter(|h| h.predicted_yield > dec!(0.10))
                .take(MAX_LISTED)
                .map(|h| RiskRecommendation::InvestigateYield {
                    symbol: h.symbol.clone(),
                    predicted_yield: Percentage::from_fraction(h.predicted_yield),
                }),
        );
    }

    if recommendations.is_empty() {
        recommendations.push(RiskRecommendation::Balanced);
    }
    recommendations
}
