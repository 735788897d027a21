//! Fields derived from a dividend history at scan time.

use crate::entities::DividendHistoryRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summary statistics of one stock's dividend history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendStats {
    pub last_dividend_amount: Option<Decimal>,
    pub avg_growth_rate: Option<Decimal>,
    pub consecutive_growth_years: u32,
    pub estimated_next_ex_dividend_date: Option<NaiveDate>,
}

impl DividendStats {
    /// Derives all statistics. `as_of` is the date the next ex-dividend
    /// estimate must be strictly after.
    pub fn from_history(history: &[DividendHistoryRecord], as_of: NaiveDate) -> Self {
        let ordered = sorted_by_date(history);
        Self {
            last_dividend_amount: ordered.last().map(|r| r.dividend_amount),
            avg_growth_rate: average_growth_rate(history),
            consecutive_growth_years: count_trailing_growth(&ordered),
            estimated_next_ex_dividend_date: project_next_ex_date(&ordered, as_of),
        }
    }
}

/// Amount of the most recent record by ex-dividend date.
pub fn last_dividend_amount(history: &[DividendHistoryRecord]) -> Option<Decimal> {
    history
        .iter()
        .max_by_key(|record| record.ex_dividend_date)
        .map(|record| record.dividend_amount)
}

/// Mean of every defined growth rate.
pub fn average_growth_rate(history: &[DividendHistoryRecord]) -> Option<Decimal> {
    let rates: Vec<Decimal> = history
        .iter()
        .filter_map(|record| record.dividend_growth_rate)
        .collect();

    if rates.is_empty() {
        return None;
    }
    let total: Decimal = rates.iter().sum();
    Some(total / Decimal::from(rates.len()))
}

/// Number of consecutive strictly positive growth rates, counted from the
/// most recent record backwards. A missing rate ends the streak.
pub fn consecutive_growth_years(history: &[DividendHistoryRecord]) -> u32 {
    count_trailing_growth(&sorted_by_date(history))
}

/// Projects the next ex-dividend date from the spacing of the last two
/// records. Returns `None` with fewer than two records or when the projection
/// is not after `as_of`.
pub fn estimate_next_ex_dividend_date(
    history: &[DividendHistoryRecord],
    as_of: NaiveDate,
) -> Option<NaiveDate> {
    project_next_ex_date(&sorted_by_date(history), as_of)
}

fn sorted_by_date(history: &[DividendHistoryRecord]) -> Vec<&DividendHistoryRecord> {
    let mut ordered: Vec<&DividendHistoryRecord> = history.iter().collect();
    ordered.sort_by_key(|record| record.ex_dividend_date);
    ordered
}

fn count_trailing_growth(ordered: &[&DividendHistoryRecord]) -> u32 {
    let streak = ordered
        .iter()
        .rev()
        .take_while(|record| {
            record
                .dividend_growth_rate
                .is_some_and(|rate| rate > Decimal::ZERO)
        })
        .count();
    u32::try_from(streak).unwrap_or(u32::MAX)
}

fn project_next_ex_date(
    ordered: &[&DividendHistoryRecord],
    as_of: NaiveDate,
) -> Option<NaiveDate> {
    let [.., previous, last] = ordered else {
        return None;
    };
    let interval = last.ex_dividend_date - previous.ex_dividend_date;
    let estimated = last.ex_dividend_date.checked_add_signed(interval)?;
    (estimated > as_of).then_some(estimated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(d: NaiveDate, amount: Decimal, rate: Option<Decimal>) -> DividendHistoryRecord {
        DividendHistoryRecord {
            ex_dividend_date: d,
            dividend_amount: amount,
            dividend_growth_rate: rate,
        }
    }

    #[test]
    fn test_single_record_has_no_streak_or_projection() {
        let history = vec![record(date(2024, 3, 1), dec!(0.5), None)];
        let stats = DividendStats::from_history(&history, date(2024, 1, 1));

        assert_eq!(stats.consecutive_growth_years, 0);
        assert_eq!(stats.estimated_next_ex_dividend_date, None);
        assert_eq!(stats.last_dividend_amount, Some(dec!(0.5)));
        assert_eq!(stats.avg_growth_rate, None);
    }

    #[test]
    fn test_empty_history() {
        let stats = DividendStats::from_history(&[], date(2024, 1, 1));
        assert_eq!(stats, DividendStats::default());
    }

    #[test]
    fn test_streak_stops_at_first_non_positive() {
        let history = vec![
            record(date(2019, 1, 1), dec!(1.00), None),
            record(date(2020, 1, 1), dec!(1.10), Some(dec!(0.10))),
            record(date(2021, 1, 1), dec!(1.05), Some(dec!(-0.045))),
            record(date(2022, 1, 1), dec!(1.10), Some(dec!(0.047))),
            record(date(2023, 1, 1), dec!(1.20), Some(dec!(0.09))),
        ];
        assert_eq!(consecutive_growth_years(&history), 2);
    }

    #[test]
    fn test_streak_uses_date_order_not_input_order() {
        let history = vec![
            record(date(2023, 1, 1), dec!(1.20), Some(dec!(0.09))),
            record(date(2021, 1, 1), dec!(1.00), None),
            record(date(2022, 1, 1), dec!(1.10), Some(dec!(0.10))),
        ];
        assert_eq!(consecutive_growth_years(&history), 2);
        assert_eq!(last_dividend_amount(&history), Some(dec!(1.20)));
    }

    #[test]
    fn test_average_growth_ignores_missing() {
        let history = vec![
            record(date(2021, 1, 1), dec!(1), None),
            record(date(2022, 1, 1), dec!(1), Some(dec!(0.02))),
            record(date(2023, 1, 1), dec!(1), Some(dec!(0.04))),
        ];
        assert_eq!(average_growth_rate(&history), Some(dec!(0.03)));
    }

    #[test]
    fn test_next_ex_date_projection() {
        let history = vec![
            record(date(2024, 3, 1), dec!(0.5), None),
            record(date(2024, 6, 1), dec!(0.5), Some(dec!(0))),
        ];
        // 92 day interval
        assert_eq!(
            estimate_next_ex_dividend_date(&history, date(2024, 7, 1)),
            Some(date(2024, 9, 1))
        );
        // Projection must be strictly in the future
        assert_eq!(estimate_next_ex_dividend_date(&history, date(2024, 9, 1)), None);
    }
}
