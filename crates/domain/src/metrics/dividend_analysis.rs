//! Supplementary dividend analytics: seasonality, next-payment forecast and
//! a payout-centric safety score.

use crate::entities::{DividendHistoryRecord, FinancialMetrics, StockSnapshot};
use crate::enums::{ForecastConfidence, SafetyRating};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of most recent payments used by the forecast.
const FORECAST_WINDOW: usize = 4;

/// Assumed spacing between payments when forecasting the next date.
const FORECAST_INTERVAL_DAYS: i64 = 90;

/// Average payout per calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityProfile {
    /// Month (1-12) to mean dividend amount.
    pub monthly_average: BTreeMap<u32, Decimal>,
    /// Up to three months with the highest average, best first.
    pub best_months: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendForecast {
    pub predicted_amount: Decimal,
    pub predicted_date: NaiveDate,
    pub confidence: ForecastConfidence,
    /// Number of payments the forecast was fitted on.
    pub basis: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub score: u32,
    pub payout_points: u32,
    pub consistency_points: u32,
    pub financial_points: u32,
    pub rating: SafetyRating,
}

/// Groups payments by calendar month. `None` for an empty history.
pub fn analyze_seasonality(history: &[DividendHistoryRecord]) -> Option<SeasonalityProfile> {
    if history.is_empty() {
        return None;
    }

    let mut buckets: BTreeMap<u32, Vec<Decimal>> = BTreeMap::new();
    for record in history {
        buckets
            .entry(record.ex_dividend_date.month())
            .or_default()
            .push(record.dividend_amount);
    }

    let monthly_average: BTreeMap<u32, Decimal> = buckets
        .into_iter()
        .map(|(month, amounts)| {
            let total: Decimal = amounts.iter().sum();
            (month, total / Decimal::from(amounts.len()))
        })
        .collect();

    let mut ranked: Vec<(u32, Decimal)> = monthly_average.iter().map(|(m, a)| (*m, *a)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let best_months = ranked.into_iter().take(3).map(|(month, _)| month).collect();

    Some(SeasonalityProfile {
        monthly_average,
        best_months,
    })
}

/// Extrapolates the next payment from the trend of the last four.
///
/// Requires at least two payments.
pub fn predict_next_dividend(history: &[DividendHistoryRecord]) -> Option<DividendForecast> {
    if history.len() < 2 {
        return None;
    }

    let mut ordered: Vec<&DividendHistoryRecord> = history.iter().collect();
    ordered.sort_by_key(|record| record.ex_dividend_date);

    let recent = &ordered[ordered.len().saturating_sub(FORECAST_WINDOW)..];
    let first = recent.first()?;
    let last = recent.last()?;

    let step = (last.dividend_amount - first.dividend_amount) / Decimal::from(recent.len());
    let predicted_amount = (last.dividend_amount + step).round_dp(2);
    let predicted_date = last.ex_dividend_date + Duration::days(FORECAST_INTERVAL_DAYS);

    let confidence = if recent.len() >= 3 {
        ForecastConfidence::Medium
    } else {
        ForecastConfidence::Low
    };

    Some(DividendForecast {
        predicted_amount,
        predicted_date,
        confidence,
        basis: recent.len(),
    })
}

/// Scores how safe the current dividend looks (0-100).
pub fn calculate_safety_score(
    snapshot: &StockSnapshot,
    metrics: &FinancialMetrics,
    history: &[DividendHistoryRecord],
) -> SafetyAssessment {
    let payout_points = match snapshot.payout_ratio {
        None => 0,
        Some(p) if p <= dec!(0.5) => 40,
        Some(p) if p <= dec!(0.7) => 30,
        Some(p) if p <= dec!(0.8) => 20,
        Some(_) => 5,
    };

    let consistency_points = match history.len() {
        n if n >= 5 => 30,
        n if n >= 3 => 20,
        _ => 5,
    };

    let mut financial_points = 0;
    if metrics
        .pe_ratio
        .is_some_and(|pe| (dec!(10)..=dec!(25)).contains(&pe))
    {
        financial_points += 10;
    }
    if metrics.debt_to_equity.is_some_and(|de| de <= dec!(0.5)) {
        financial_points += 10;
    }
    if metrics.return_on_equity.is_some_and(|roe| roe >= dec!(0.15)) {
        financial_points += 10;
    }

    let score = payout_points + consistency_points + financial_points;
    SafetyAssessment {
        score,
        payout_points,
        consistency_points,
        financial_points,
        rating: SafetyRating::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payments(entries: &[(NaiveDate, Decimal)]) -> Vec<DividendHistoryRecord> {
        DividendHistoryRecord::series_from_payments(entries.iter().copied())
    }

    #[test]
    fn test_seasonality_best_months() {
        let history = payments(&[
            (date(2022, 3, 15), dec!(1.0)),
            (date(2022, 9, 15), dec!(3.0)),
            (date(2023, 3, 15), dec!(2.0)),
            (date(2023, 6, 15), dec!(0.5)),
            (date(2023, 12, 15), dec!(1.0)),
        ]);
        let profile = analyze_seasonality(&history).unwrap();

        assert_eq!(profile.monthly_average[&3], dec!(1.5));
        assert_eq!(profile.best_months, vec![9, 3, 12]);
        assert!(analyze_seasonality(&[]).is_none());
    }

    #[test]
    fn test_forecast_linear_step() {
        let history = payments(&[
            (date(2023, 1, 10), dec!(1.00)),
            (date(2023, 4, 10), dec!(1.10)),
            (date(2023, 7, 10), dec!(1.20)),
            (date(2023, 10, 10), dec!(1.40)),
        ]);
        let forecast = predict_next_dividend(&history).unwrap();

        // (1.40 - 1.00) / 4 = 0.10
        assert_eq!(forecast.predicted_amount, dec!(1.50));
        assert_eq!(forecast.predicted_date, date(2024, 1, 8));
        assert_eq!(forecast.confidence, ForecastConfidence::Medium);
        assert_eq!(forecast.basis, 4);
    }

    #[test]
    fn test_forecast_needs_two_payments() {
        let history = payments(&[(date(2023, 1, 10), dec!(1.00))]);
        assert!(predict_next_dividend(&history).is_none());
    }

    #[test]
    fn test_safety_score() {
        let snapshot = StockSnapshot::new("KO", "Coca-Cola").with_payout_ratio(dec!(0.45));
        let metrics = FinancialMetrics::default()
            .with_pe_ratio(dec!(22))
            .with_return_on_equity(dec!(0.4))
            .with_debt_to_equity(dec!(1.6));
        let history = payments(&[
            (date(2019, 1, 1), dec!(1)),
            (date(2020, 1, 1), dec!(1)),
            (date(2021, 1, 1), dec!(1)),
            (date(2022, 1, 1), dec!(1)),
            (date(2023, 1, 1), dec!(1)),
        ]);
        let assessment = calculate_safety_score(&snapshot, &metrics, &history);

        assert_eq!(assessment.payout_points, 40);
        assert_eq!(assessment.consistency_points, 30);
        assert_eq!(assessment.financial_points, 20);
        assert_eq!(assessment.score, 90);
        assert_eq!(assessment.rating, SafetyRating::VerySafe);
    }
}
