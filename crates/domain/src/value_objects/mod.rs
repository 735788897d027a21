pub mod backtest_result;
pub mod percentage;
pub mod risk_assessment;
pub mod scan_result;

pub use backtest_result::{BacktestResult, PortfolioValuePoint, Transaction};
pub use percentage::Percentage;
pub use risk_assessment::{
    RiskAssessment, RiskBreakdown, RiskFactorScores, RiskRecommendation, ValueAtRisk,
};
pub use scan_result::ScanResult;
