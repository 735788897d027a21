//! Portfolio risk assessment.
//!
//! Four rule-based dimensions (concentration, diversification,
//! sustainability, yield) are classified into [`RiskLevel`]s and weighted
//! into a composite score. A Monte Carlo simulation adds one-day
//! Value-at-Risk, and the weighted scores drive the recommendations.
//!
//! [`RiskLevel`]: divscan_domain::enums::RiskLevel

mod assessor;
mod recommendations;

pub use assessor::{
    RiskAssessor, assess_risk, classify_concentration, classify_overall, classify_sustainability,
    classify_yield, diversification_score, factor_scores,
};
pub use recommendations::generate_recommendations;
