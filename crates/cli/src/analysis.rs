//! Single-stock dividend analysis.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use divscan_domain::entities::StockSnapshot;
use divscan_domain::metrics::dividend_analysis::{
    DividendForecast, SafetyAssessment, SeasonalityProfile, analyze_seasonality,
    calculate_safety_score, predict_next_dividend,
};
use divscan_domain::metrics::{DividendStats, ScoreBreakdown, calculate_score_breakdown};
use divscan_scanner::provider::DividendDataProvider;
use serde::Serialize;

/// Everything the `analyze` command reports about one stock.
#[derive(Debug, Clone, Serialize)]
pub struct StockAnalysis {
    pub snapshot: StockSnapshot,
    pub score: ScoreBreakdown,
    pub stats: DividendStats,
    pub safety: SafetyAssessment,
    pub forecast: Option<DividendForecast>,
    pub seasonality: Option<SeasonalityProfile>,
}

/// Pulls one symbol from `provider` and runs every per-stock metric on it.
pub fn analyze_stock<P: DividendDataProvider>(
    provider: &P,
    symbol: &str,
    as_of: NaiveDate,
) -> Result<StockAnalysis> {
    let snapshot = provider
        .get_stock_snapshot(symbol)?
        .with_context(|| format!("no snapshot for {symbol}"))?;
    let metrics = provider.get_financial_metrics(symbol)?;
    let history = provider.get_dividend_history(symbol)?;

    Ok(StockAnalysis {
        score: calculate_score_breakdown(&snapshot, &metrics, &history),
        stats: DividendStats::from_history(&history, as_of),
        safety: calculate_safety_score(&snapshot, &metrics, &history),
        forecast: predict_next_dividend(&history),
        seasonality: analyze_seasonality(&history),
        snapshot,
    })
}
