pub mod dividend_analysis;
pub mod dividend_stats;
pub mod health_score;
pub mod performance;

pub use dividend_stats::DividendStats;
pub use health_score::{ScoreBreakdown, calculate_health_score, calculate_score_breakdown};
