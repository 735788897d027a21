//! Daily market series consumed by the backtester.

use crate::error::BacktestError;
use chrono::{Datelike, Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trading days per year used to scale annual volatility to daily.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// One symbol on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub price: Decimal,
    /// Trailing annual dividend over price.
    pub dividend_yield: Decimal,
    /// Dividend paid on this day, zero on non-payment days.
    #[serde(default)]
    pub dividend_amount: Decimal,
    pub annual_dividend: Decimal,
}

/// Chronological daily bars of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSeries {
    pub symbol: String,
    pub bars: Vec<DailyBar>,
}

impl MarketSeries {
    /// Creates a series, sorting bars by date.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|bar| bar.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Latest bar dated on or before `date`.
    pub fn latest_on_or_before(&self, date: NaiveDate) -> Option<&DailyBar> {
        let end = self.bars.partition_point(|bar| bar.date <= date);
        end.checked_sub(1).map(|index| &self.bars[index])
    }

    /// Dividend payments as `(date, amount per share)`.
    pub fn payments(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.bars
            .iter()
            .filter(|bar| bar.dividend_amount > Decimal::ZERO)
            .map(|bar| (bar.date, bar.dividend_amount))
    }
}

/// Source of daily series for a backtest universe.
pub trait MarketSeriesGenerator {
    /// Produces one series per symbol covering roughly `horizon_years`.
    fn generate(
        &mut self,
        symbols: &[String],
        horizon_years: u32,
    ) -> Result<Vec<MarketSeries>, BacktestError>;
}

/// Parameters of the synthetic market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticMarketConfig {
    /// Last day of every generated series.
    pub end_date: NaiveDate,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Mean daily return.
    pub daily_drift: f64,
}

impl Default for SyntheticMarketConfig {
    fn default() -> Self {
        Self {
            end_date: Utc::now().date_naive(),
            seed: None,
            daily_drift: 0.0008,
        }
    }
}

impl SyntheticMarketConfig {
    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_daily_drift(mut self, daily_drift: f64) -> Self {
        self.daily_drift = daily_drift;
        self
    }
}

/// Random-walk prices with quarterly dividends.
///
/// Per symbol a base price in `[500, 3000)`, a base yield in `[2%, 8%)` and
/// an annual volatility in `[15%, 35%)` are drawn. Each day the price moves
/// by a normal return; every day of March, June, September and December it
/// takes an extra shock in `[0.98, 1.05)`. On the 15th of those months a
/// quarter of the annual dividend is paid and the annual dividend grows by
/// 2% to 8%.
pub struct SyntheticMarketGenerator {
    config: SyntheticMarketConfig,
    rng: StdRng,
}

impl SyntheticMarketGenerator {
    pub fn new(config: SyntheticMarketConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }

    fn generate_symbol(
        &mut self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<MarketSeries, BacktestError> {
        let mut price: f64 = self.rng.random_range(500.0..3000.0);
        let base_yield: f64 = self.rng.random_range(0.02..0.08);
        let volatility: f64 = self.rng.random_range(0.15..0.35);
        let daily = Normal::new(
            self.config.daily_drift,
            volatility / TRADING_DAYS_PER_YEAR.sqrt(),
        )?;
        let mut annual_dividend = price * base_yield;

        let end = self.config.end_date;
        let mut bars = Vec::new();
        for date in start.iter_days().take_while(|d| *d <= end) {
            price *= 1.0 + daily.sample(&mut self.rng);

            let results_season = is_quarter_month(date);
            if results_season {
                price *= self.rng.random_range(0.98..1.05);
            }
            let dividend_yield = annual_dividend / price;

            let mut dividend_amount = 0.0;
            if results_season && date.day() == 15 {
                dividend_amount = annual_dividend / 4.0;
                annual_dividend *= self.rng.random_range(1.02..1.08);
            }

            bars.push(DailyBar {
                date,
                price: to_decimal(price, 2),
                dividend_yield: to_decimal(dividend_yield, 6),
                dividend_amount: to_decimal(dividend_amount, 4),
                annual_dividend: to_decimal(annual_dividend, 4),
            });
        }

        debug!(
            symbol = %symbol,
            bars = bars.len(),
            volatility,
            base_yield,
            "Synthetic series generated"
        );
        Ok(MarketSeries::new(symbol, bars))
    }
}

impl MarketSeriesGenerator for SyntheticMarketGenerator {
    fn generate(
        &mut self,
        symbols: &[String],
        horizon_years: u32,
    ) -> Result<Vec<MarketSeries>, BacktestError> {
        let days = u64::from(horizon_years) * 365;
        let start = self
            .config
            .end_date
            .checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDate::MIN);

        symbols
            .iter()
            .map(|symbol| self.generate_symbol(symbol, start))
            .collect()
    }
}

/// Caller-supplied series, for instance loaded from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoricalMarketData {
    pub series: Vec<MarketSeries>,
}

impl HistoricalMarketData {
    pub fn new(series: Vec<MarketSeries>) -> Self {
        Self { series }
    }
}

impl MarketSeriesGenerator for HistoricalMarketData {
    /// Returns the stored series of each requested symbol; the horizon is
    /// whatever the data covers.
    fn generate(
        &mut self,
        symbols: &[String],
        _horizon_years: u32,
    ) -> Result<Vec<MarketSeries>, BacktestError> {
        symbols
            .iter()
            .map(|symbol| {
                self.series
                    .iter()
                    .find(|series| &series.symbol == symbol)
                    .cloned()
                    .ok_or_else(|| BacktestError::MissingSeries(symbol.clone()))
            })
            .collect()
    }
}

fn is_quarter_month(date: NaiveDate) -> bool {
    matches!(date.month(), 3 | 6 | 9 | 12)
}

fn to_decimal(value: f64, dp: u32) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO).round_dp(dp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn generator(seed: u64) -> SyntheticMarketGenerator {
        SyntheticMarketGenerator::new(
            SyntheticMarketConfig::default()
                .with_end_date(date(2024, 12, 31))
                .with_seed(seed),
        )
    }

    fn bar(d: NaiveDate, price: Decimal, dividend: Decimal) -> DailyBar {
        DailyBar {
            date: d,
            price,
            dividend_yield: dec!(0.04),
            dividend_amount: dividend,
            annual_dividend: dec!(4),
        }
    }

    #[test]
    fn test_synthetic_span_and_payments() {
        let symbols = vec!["TCS".to_string(), "ITC".to_string()];
        let series = generator(9).generate(&symbols, 3).unwrap();

        assert_eq!(series.len(), 2);
        for s in &series {
            assert_eq!(s.bars.len(), 3 * 365 + 1);
            assert_eq!(s.first_date(), Some(date(2022, 1, 1)));
            assert_eq!(s.last_date(), Some(date(2024, 12, 31)));

            let payments: Vec<_> = s.payments().collect();
            assert_eq!(payments.len(), 12);
            assert!(payments.iter().all(|(d, _)| d.day() == 15 && is_quarter_month(*d)));
            // Dividends grow after every payment.
            assert!(payments.windows(2).all(|pair| pair[1].1 > pair[0].1));
            assert!(s.bars.iter().all(|b| b.price > Decimal::ZERO));
        }
    }

    #[test]
    fn test_synthetic_is_reproducible_per_seed() {
        let symbols = vec!["INFY".to_string()];
        let first = generator(5).generate(&symbols, 1).unwrap();
        let second = generator(5).generate(&symbols, 1).unwrap();
        let other = generator(6).generate(&symbols, 1).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_latest_on_or_before() {
        let series = MarketSeries::new(
            "X",
            vec![
                bar(date(2024, 1, 3), dec!(102), Decimal::ZERO),
                bar(date(2024, 1, 1), dec!(100), Decimal::ZERO),
            ],
        );

        assert_eq!(series.latest_on_or_before(date(2023, 12, 31)), None);
        assert_eq!(
            series.latest_on_or_before(date(2024, 1, 2)).map(|b| b.price),
            Some(dec!(100))
        );
        assert_eq!(
            series.latest_on_or_before(date(2024, 2, 1)).map(|b| b.price),
            Some(dec!(102))
        );
    }

    #[test]
    fn test_historical_lookup() {
        let mut data = HistoricalMarketData::new(vec![MarketSeries::new(
            "KO",
            vec![bar(date(2024, 1, 1), dec!(60), dec!(0.46))],
        )]);

        let found = data.generate(&["KO".to_string()], 3).unwrap();
        assert_eq!(found[0].payments().count(), 1);

        assert_eq!(
            data.generate(&["PEP".to_string()], 3),
            Err(BacktestError::MissingSeries("PEP".to_string()))
        );
    }
}
