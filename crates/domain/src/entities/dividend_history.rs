use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One declared dividend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendHistoryRecord {
    pub ex_dividend_date: NaiveDate,
    pub dividend_amount: Decimal,
    /// Fractional change from the previous record; `None` for the earliest one.
    pub dividend_growth_rate: Option<Decimal>,
}

impl DividendHistoryRecord {
    pub fn new(ex_dividend_date: NaiveDate, dividend_amount: Decimal) -> Self {
        Self {
            ex_dividend_date,
            dividend_amount,
            dividend_growth_rate: None,
        }
    }

    #[must_use]
    pub fn with_growth_rate(mut self, rate: Decimal) -> Self {
        self.dividend_growth_rate = Some(rate);
        self
    }

    /// Builds a date-ordered history from raw payments, deriving each growth
    /// rate from the preceding payment.
    ///
    /// A preceding amount of zero leaves the rate undefined.
    pub fn series_from_payments<I>(payments: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (NaiveDate, Decimal)>,
    {
        let mut payments: Vec<(NaiveDate, Decimal)> = payments.into_iter().collect();
        payments.sort_by_key(|(date, _)| *date);

        let mut previous: Option<Decimal> = None;
        payments
            .into_iter()
            .map(|(date, amount)| {
                let growth = previous
                    .filter(|prior| !prior.is_zero())
                    .map(|prior| (amount - prior) / prior);
                previous = Some(amount);
                Self {
                    ex_dividend_date: date,
                    dividend_amount: amount,
                    dividend_growth_rate: growth,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_series_from_payments_sorts_and_computes_growth() {
        let history = DividendHistoryRecord::series_from_payments(vec![
            (date(2022, 6, 1), dec!(1.10)),
            (date(2021, 6, 1), dec!(1.00)),
            (date(2023, 6, 1), dec!(1.10)),
        ]);

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].ex_dividend_date, date(2021, 6, 1));
        assert_eq!(history[0].dividend_growth_rate, None);
        assert_eq!(history[1].dividend_growth_rate, Some(dec!(0.1)));
        assert_eq!(history[2].dividend_growth_rate, Some(Decimal::ZERO));
    }

    #[test]
    fn test_zero_prior_amount_leaves_rate_undefined() {
        let history = DividendHistoryRecord::series_from_payments(vec![
            (date(2021, 1, 1), Decimal::ZERO),
            (date(2021, 4, 1), dec!(0.5)),
        ]);
        assert_eq!(history[1].dividend_growth_rate, None);
    }
}
