use super::config::StrategyConfig;
use super::ledger::TransactionLog;
use crate::error::BacktestError;
use crate::market_data::{
    MarketSeries, MarketSeriesGenerator, SyntheticMarketConfig, SyntheticMarketGenerator,
};
use crate::strategies::{Quote, SelectionContext, SelectionStrategy, YieldThreshold};
use chrono::{Months, NaiveDate};
use divscan_domain::metrics::performance::{
    annualized_return, max_drawdown, period_returns, sharpe_ratio,
};
use divscan_domain::value_objects::{BacktestResult, PortfolioValuePoint, Transaction};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Runs strategy backtests over series from a [`MarketSeriesGenerator`].
pub struct Backtester<G> {
    generator: G,
}

impl<G: MarketSeriesGenerator> Backtester<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Backtests the yield-threshold strategy described by `config`.
    ///
    /// # Errors
    /// See [`Backtester::run_with_strategy`].
    pub fn run(
        &mut self,
        config: &StrategyConfig,
        initial_capital: Decimal,
    ) -> Result<BacktestResult, BacktestError> {
        let strategy = YieldThreshold::new(config.min_yield);
        self.run_with_strategy(config, initial_capital, &strategy)
    }

    /// Backtests an arbitrary selection strategy.
    ///
    /// # Arguments
    ///
    /// * `config` - Universe, rebalance interval, horizon and reporting options
    /// * `initial_capital` - Starting cash
    /// * `strategy` - Picks the symbols to hold at each rebalance
    ///
    /// # Returns
    ///
    /// * `Result<BacktestResult, BacktestError>` - Performance, trades and value history
    ///
    /// # Errors
    /// Fails on invalid configuration, non-positive capital, missing market
    /// data, or when no rebalance date selects any symbol.
    pub fn run_with_strategy<S: SelectionStrategy>(
        &mut self,
        config: &StrategyConfig,
        initial_capital: Decimal,
        strategy: &S,
    ) -> Result<BacktestResult, BacktestError> {
        config.validate()?;
        if initial_capital <= Decimal::ZERO {
            return Err(BacktestError::NonPositiveCapital(initial_capital));
        }

        let series = self
            .generator
            .generate(&config.symbols, config.horizon_years)?;
        let (start, end) = series_span(&series).ok_or(BacktestError::EmptyUniverse)?;

        info!(
            strategy = strategy.name(),
            symbols = series.len(),
            start = %start,
            end = %end,
            interval_months = config.rebalance_interval_months,
            capital = %initial_capital,
            "Starting backtest"
        );

        let mut portfolio = Portfolio::new(initial_capital);
        let mut log = TransactionLog::new();
        let mut history: Vec<PortfolioValuePoint> = Vec::new();
        let mut skipped: u32 = 0;

        for date in rebalance_dates(start, end, config.rebalance_interval_months) {
            let context = SelectionContext {
                date,
                quotes: quotes_at(&series, date),
            };
            let selected = strategy.select(&context);
            if selected.is_empty() {
                debug!(date = %date, "No symbol qualifies, skipping rebalance");
                skipped += 1;
                continue;
            }

            let point = portfolio.rebalance(date, &context.quotes, &selected, &mut log);
            debug!(
                date = %date,
                selected = selected.len(),
                value = %point.portfolio_value,
                cash = %point.cash,
                "Rebalanced"
            );
            history.push(point);
        }

        let Some(last) = history.last() else {
            return Err(BacktestError::NoRebalanceExecuted { start, end });
        };
        let final_value = last.portfolio_value;

        let total_dividends = log.attribute_dividends(&series, config.attribution);
        let total_return = (final_value + total_dividends - initial_capital) / initial_capital;
        let years = (end - start).num_days() as f64 / 365.0;
        let annualized = annualized_return(total_return, years).unwrap_or(total_return);

        let values: Vec<Decimal> = history.iter().map(|p| p.portfolio_value).collect();
        let sharpe = sharpe_ratio(&period_returns(&values), config.annualization_factor);
        let drawdown = max_drawdown(&values);
        let rebalance_count = u32::try_from(history.len()).unwrap_or(u32::MAX);

        info!(
            final_value = %final_value,
            dividends = %total_dividends,
            total_return = %total_return,
            rebalances = rebalance_count,
            skipped,
            "Backtest completed"
        );

        Ok(BacktestResult {
            initial_capital,
            final_value,
            total_dividends,
            total_return,
            annualized_return: annualized,
            sharpe_ratio: sharpe,
            max_drawdown: drawdown,
            dividend_yield_on_cost: total_dividends / initial_capital,
            rebalance_count,
            skipped_rebalances: skipped,
            start_date: start,
            end_date: end,
            transactions: log.into_transactions(),
            portfolio_history: history,
        })
    }
}

/// Backtests `config` on a freshly generated synthetic market ending today.
///
/// # Errors
/// See [`Backtester::run_with_strategy`].
pub fn backtest(
    config: &StrategyConfig,
    initial_capital: Decimal,
) -> Result<BacktestResult, BacktestError> {
    let generator = SyntheticMarketGenerator::new(SyntheticMarketConfig::default());
    Backtester::new(generator).run(config, initial_capital)
}

/// Dates `start`, `start + n` months, `start + 2n` months, ... up to `end`.
pub fn rebalance_dates(start: NaiveDate, end: NaiveDate, interval_months: u32) -> Vec<NaiveDate> {
    if interval_months == 0 {
        return vec![start];
    }
    (0u32..)
        .map_while(|k| {
            k.checked_mul(interval_months)
                .and_then(|months| start.checked_add_months(Months::new(months)))
        })
        .take_while(|date| *date <= end)
        .collect()
}

/// Cash plus whole-share positions.
struct Portfolio {
    cash: Decimal,
    holdings: BTreeMap<String, u64>,
}

impl Portfolio {
    fn new(cash: Decimal) -> Self {
        Self {
            cash,
            holdings: BTreeMap::new(),
        }
    }

    fn market_value(&self, quotes: &[Quote<'_>]) -> Decimal {
        self.holdings
            .iter()
            .map(|(symbol, shares)| Decimal::from(*shares) * price_of(quotes, symbol))
            .sum()
    }

    /// Sells everything, then buys `selected` with equal weight.
    fn rebalance(
        &mut self,
        date: NaiveDate,
        quotes: &[Quote<'_>],
        selected: &[Quote<'_>],
        log: &mut TransactionLog,
    ) -> PortfolioValuePoint {
        let portfolio_value = self.cash + self.market_value(quotes);

        for (symbol, shares) in std::mem::take(&mut self.holdings) {
            let price = price_of(quotes, &symbol);
            self.cash += Decimal::from(shares) * price;
            log.record(Transaction::sell(date, symbol, shares, price));
        }

        let target = portfolio_value / Decimal::from(selected.len());
        for quote in selected {
            let price = quote.bar.price;
            if price <= Decimal::ZERO {
                continue;
            }
            let affordable = whole_shares(self.cash, price);
            let shares = whole_shares(target, price).min(affordable);
            if shares == 0 {
                continue;
            }
            self.cash -= Decimal::from(shares) * price;
            *self.holdings.entry(quote.symbol.to_string()).or_insert(0) += shares;
            log.record(Transaction::buy(date, quote.symbol, shares, price));
        }

        let invested = self.market_value(quotes);
        PortfolioValuePoint {
            date,
            portfolio_value: self.cash + invested,
            cash: self.cash,
            invested,
        }
    }
}

fn whole_shares(amount: Decimal, price: Decimal) -> u64 {
    (amount / price).floor().to_u64().unwrap_or(0)
}

fn price_of(quotes: &[Quote<'_>], symbol: &str) -> Decimal {
    quotes
        .iter()
        .find(|q| q.symbol == symbol)
        .map(|q| q.bar.price)
        .unwrap_or(Decimal::ZERO)
}

fn quotes_at(series: &[MarketSeries], date: NaiveDate) -> Vec<Quote<'_>> {
    series
        .iter()
        .filter_map(|s| {
            s.latest_on_or_before(date).map(|bar| Quote {
                symbol: &s.symbol,
                bar,
            })
        })
        .collect()
}

fn series_span(series: &[MarketSeries]) -> Option<(NaiveDate, NaiveDate)> {
    let start = series.iter().filter_map(MarketSeries::first_date).min()?;
    let end = series.iter().filter_map(MarketSeries::last_date).max()?;
    Some((start, end))
}
