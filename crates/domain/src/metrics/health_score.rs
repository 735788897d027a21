//! Dividend health score.
//!
//! A deterministic 0-100 score made of five independently capped components:
//!
//! | Component          | Cap |
//! |--------------------|-----|
//! | Dividend yield     | 20  |
//! | Payout ratio       | 25  |
//! | Growth consistency | 20  |
//! | Financial health   | 20  |
//! | Coverage ratio     | 15  |
//!
//! Missing inputs contribute zero to their component; they never penalize
//! the score below zero.

use crate::entities::{DividendHistoryRecord, FinancialMetrics, StockSnapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Minimum number of defined growth rates before consistency is scored.
pub const MIN_GROWTH_OBSERVATIONS: usize = 3;

/// Upper bound of the composite score.
pub const MAX_HEALTH_SCORE: Decimal = Decimal::ONE_HUNDRED;

/// Contribution of each component to a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub yield_points: Decimal,
    pub payout_points: Decimal,
    pub growth_points: Decimal,
    pub financial_points: Decimal,
    pub coverage_points: Decimal,
}

impl ScoreBreakdown {
    /// Sum of all components clamped to `[0, 100]`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        let sum = self.yield_points
            + self.payout_points
            + self.growth_points
            + self.financial_points
            + self.coverage_points;
        sum.clamp(Decimal::ZERO, MAX_HEALTH_SCORE)
    }
}

/// Calculates the composite health score of a stock.
///
/// # Arguments
///
/// * `snapshot` - Market data; supplies yield and payout ratio
/// * `metrics` - Fundamentals; supplies PE, debt/equity, ROE and coverage
/// * `history` - Dividend history; supplies growth rates
///
/// # Returns
///
/// * `Decimal` - Score in `[0, 100]`
pub fn calculate_health_score(
    snapshot: &StockSnapshot,
    metrics: &FinancialMetrics,
    history: &[DividendHistoryRecord],
) -> Decimal {
    calculate_score_breakdown(snapshot, metrics, history).total()
}

/// Calculates every component of the health score.
pub fn calculate_score_breakdown(
    snapshot: &StockSnapshot,
    metrics: &FinancialMetrics,
    history: &[DividendHistoryRecord],
) -> ScoreBreakdown {
    ScoreBreakdown {
        yield_points: yield_points(snapshot.dividend_yield),
        payout_points: payout_points(snapshot.payout_ratio),
        growth_points: growth_points(history),
        financial_points: financial_points(metrics),
        coverage_points: coverage_points(metrics.dividend_coverage_ratio),
    }
}

fn yield_points(dividend_yield: Option<Decimal>) -> Decimal {
    let Some(y) = dividend_yield else {
        return Decimal::ZERO;
    };

    if (dec!(0.02)..=dec!(0.06)).contains(&y) {
        dec!(20)
    } else if (dec!(0.01)..dec!(0.02)).contains(&y) || (y > dec!(0.06) && y <= dec!(0.08)) {
        dec!(15)
    } else if y > dec!(0.08) {
        // Very high yields tend to precede cuts
        dec!(5)
    } else {
        Decimal::ZERO
    }
}

fn payout_points(payout_ratio: Option<Decimal>) -> Decimal {
    let Some(p) = payout_ratio else {
        return Decimal::ZERO;
    };

    if (dec!(0.3)..=dec!(0.6)).contains(&p) {
        dec!(25)
    } else if (dec!(0.2)..dec!(0.3)).contains(&p) {
        dec!(20)
    } else if p > dec!(0.6) && p <= dec!(0.8) {
        dec!(15)
    } else if p > dec!(0.8) {
        dec!(5)
    } else {
        Decimal::ZERO
    }
}

fn growth_points(history: &[DividendHistoryRecord]) -> Decimal {
    let rates: Vec<Decimal> = history
        .iter()
        .filter_map(|record| record.dividend_growth_rate)
        .collect();

    if rates.len() < MIN_GROWTH_OBSERVATIONS {
        return Decimal::ZERO;
    }

    let positive = rates.iter().filter(|rate| **rate > Decimal::ZERO).count();
    dec!(20) * Decimal::from(positive) / Decimal::from(rates.len())
}

fn financial_points(metrics: &FinancialMetrics) -> Decimal {
    let mut points = Decimal::ZERO;

    if metrics
        .pe_ratio
        .is_some_and(|pe| (dec!(10)..=dec!(25)).contains(&pe))
    {
        points += dec!(7);
    }
    if metrics.debt_to_equity.is_some_and(|de| de <= dec!(0.5)) {
        points += dec!(7);
    }
    if metrics.return_on_equity.is_some_and(|roe| roe >= dec!(0.15)) {
        points += dec!(6);
    }

    points
}

fn coverage_points(coverage: Option<Decimal>) -> Decimal {
    match coverage {
        None => Decimal::ZERO,
        Some(c) if c >= dec!(2.0) => dec!(15),
        Some(c) if c >= dec!(1.5) => dec!(12),
        Some(c) if c >= dec!(1.2) => dec!(8),
        Some(_) => dec!(3),
    }
}
