//! Prelude module for convenient imports.
//!
//! ```rust
//! use divscan_domain::prelude::*;
//! ```

pub use crate::entities::{
    DividendHistoryRecord, FinancialMetrics, PortfolioHolding, StockSnapshot,
};
pub use crate::enums::{
    ForecastConfidence, RiskLevel, SafetyRating, SortOrder, TransactionAction,
};
pub use crate::metrics::dividend_analysis::{
    DividendForecast, SafetyAssessment, SeasonalityProfile, analyze_seasonality,
    calculate_safety_score, predict_next_dividend,
};
pub use crate::metrics::{
    DividendStats, ScoreBreakdown, calculate_health_score, calculate_score_breakdown,
};
pub use crate::value_objects::{
    BacktestResult, Percentage, PortfolioValuePoint, RiskAssessment, RiskBreakdown,
    RiskFactorScores, RiskRecommendation, ScanResult, Transaction, ValueAtRisk,
};
