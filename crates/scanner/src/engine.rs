//! Scan engine: filter, score, sort, truncate.

use crate::config::ScanConfiguration;
use crate::criterion::StockContext;
use crate::error::ScanError;
use crate::provider::DividendDataProvider;
use chrono::{DateTime, Utc};
use divscan_domain::metrics::{DividendStats, calculate_health_score};
use divscan_domain::value_objects::ScanResult;
use tracing::{debug, info, warn};

/// Runs scan configurations against a data provider.
pub struct ScanEngine<P> {
    provider: P,
}

impl<P: DividendDataProvider> ScanEngine<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Scans `symbols` as of the current UTC time.
    ///
    /// # Errors
    /// Returns a [`ScanError`] when the configuration is malformed.
    pub fn scan<S: AsRef<str>>(
        &self,
        symbols: &[S],
        config: &ScanConfiguration,
    ) -> Result<Vec<ScanResult>, ScanError> {
        self.scan_at(symbols, config, Utc::now())
    }

    /// Scans `symbols` with an explicit clock.
    ///
    /// `now` stamps every result and its date is the reference for the
    /// next ex-dividend estimate and the within-days criterion.
    ///
    /// # Arguments
    ///
    /// * `symbols` - Universe to scan, in the order they are fetched
    /// * `config` - Filters, sort key and limit
    /// * `now` - Scan timestamp
    ///
    /// # Returns
    ///
    /// * `Result<Vec<ScanResult>, ScanError>` - Qualifying stocks, sorted and truncated
    ///
    /// # Errors
    /// Fails before any symbol is fetched if the configuration is malformed.
    /// Symbols whose data cannot be retrieved are logged and skipped.
    pub fn scan_at<S: AsRef<str>>(
        &self,
        symbols: &[S],
        config: &ScanConfiguration,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScanResult>, ScanError> {
        config.validate()?;

        info!(
            scan = %config.name,
            symbols = symbols.len(),
            filters = config.filters.len(),
            "Starting scan"
        );

        let mut results: Vec<ScanResult> = symbols
            .iter()
            .filter_map(|symbol| self.evaluate(symbol.as_ref(), config, now))
            .collect();

        config.order(&mut results);

        info!(scan = %config.name, matches = results.len(), "Scan completed");
        Ok(results)
    }

    fn evaluate(
        &self,
        symbol: &str,
        config: &ScanConfiguration,
        now: DateTime<Utc>,
    ) -> Option<ScanResult> {
        match self.try_evaluate(symbol, config, now) {
            Ok(result) => result,
            Err(err) => {
                warn!(symbol = %symbol, error = %err, "Skipping symbol after retrieval failure");
                None
            }
        }
    }

    fn try_evaluate(
        &self,
        symbol: &str,
        config: &ScanConfiguration,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<ScanResult>> {
        let Some(snapshot) = self.provider.get_stock_snapshot(symbol)? else {
            debug!(symbol = %symbol, "No snapshot available");
            return Ok(None);
        };
        let metrics = self.provider.get_financial_metrics(symbol)?;
        let history = self.provider.get_dividend_history(symbol)?;

        let as_of = now.date_naive();
        let stats = DividendStats::from_history(&history, as_of);
        let ctx = StockContext {
            snapshot: &snapshot,
            metrics: &metrics,
            stats: &stats,
            as_of,
        };

        if let Some(failed) = config.filters.iter().find(|f| !f.matches(&ctx)) {
            debug!(symbol = %symbol, criterion = %failed.criterion, "Filtered out");
            return Ok(None);
        }

        let health_score = calculate_health_score(&snapshot, &metrics, &history);
        debug!(symbol = %symbol, health_score = %health_score, "Qualified");

        Ok(Some(ScanResult {
            snapshot,
            metrics,
            health_score,
            last_dividend_amount: stats.last_dividend_amount,
            avg_growth_rate: stats.avg_growth_rate,
            consecutive_growth_years: stats.consecutive_growth_years,
            estimated_next_ex_dividend_date: stats.estimated_next_ex_dividend_date,
            scanned_at: now,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortField;
    use crate::criterion::ScanCriterion;
    use crate::filter::ScanFilter;
    use crate::presets;
    use crate::provider::{InMemoryProvider, StockRecord};
    use anyhow::bail;
    use chrono::{NaiveDate, TimeZone};
    use divscan_domain::entities::{DividendHistoryRecord, FinancialMetrics, StockSnapshot};
    use divscan_domain::enums::SortOrder;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stock(symbol: &str, sector: &str, dividend_yield: Decimal, payout: Decimal) -> StockRecord {
        StockRecord::new(
            StockSnapshot::new(symbol, symbol)
                .with_sector(sector)
                .with_market_cap(dec!(50000000000))
                .with_price(dec!(100))
                .with_dividend_yield(dividend_yield)
                .with_payout_ratio(payout),
        )
    }

    fn universe() -> InMemoryProvider {
        let growing = DividendHistoryRecord::series_from_payments(vec![
            (date(2023, 3, 15), dec!(1.00)),
            (date(2023, 6, 15), dec!(1.02)),
            (date(2023, 9, 15), dec!(1.05)),
            (date(2023, 12, 15), dec!(1.08)),
            (date(2024, 3, 15), dec!(1.10)),
        ]);

        InMemoryProvider::from_records([
            stock("KO", "Consumer Staples", dec!(0.031), dec!(0.72))
                .with_history(growing.clone())
                .with_metrics(
                    FinancialMetrics::default()
                        .with_pe_ratio(dec!(24))
                        .with_return_on_equity(dec!(0.40))
                        .with_debt_to_equity(dec!(1.6)),
                ),
            stock("DUK", "Utilities", dec!(0.042), dec!(0.78)),
            stock("MO", "Consumer Staples", dec!(0.085), dec!(0.95)),
            stock("NEE", "Utilities", dec!(0.027), dec!(0.55)).with_history(growing),
            StockRecord::new(StockSnapshot::new("IPO", "No Dividend")),
        ])
    }

    fn symbols(results: &[ScanResult]) -> Vec<&str> {
        results.iter().map(ScanResult::symbol).collect()
    }

    #[test]
    fn test_empty_filter_list_returns_every_retrievable_symbol() {
        let engine = ScanEngine::new(universe());
        let universe = ["KO", "DUK", "MO", "NEE", "IPO", "GHOST"];
        let results = engine
            .scan_at(&universe, &ScanConfiguration::new("all"), now())
            .unwrap();

        // Yield descending, the stock without a yield last.
        assert_eq!(symbols(&results), vec!["MO", "DUK", "KO", "NEE", "IPO"]);
    }

    #[test]
    fn test_every_result_satisfies_every_filter() {
        let provider = universe();
        let engine = ScanEngine::new(&provider);
        let config = ScanConfiguration::new("income")
            .with_filter(ScanFilter::gte(ScanCriterion::DividendYield, dec!(0.03)))
            .with_filter(ScanFilter::lte(ScanCriterion::PayoutRatio, dec!(0.8)));

        let results = engine.scan_at(&provider.symbols(), &config, now()).unwrap();
        assert_eq!(symbols(&results), vec!["DUK", "KO"]);

        for result in &results {
            let stats = DividendStats {
                consecutive_growth_years: result.consecutive_growth_years,
                ..DividendStats::default()
            };
            let ctx = StockContext {
                snapshot: &result.snapshot,
                metrics: &result.metrics,
                stats: &stats,
                as_of: now().date_naive(),
            };
            assert!(config.filters.iter().all(|f| f.matches(&ctx)));
        }
    }

    #[test]
    fn test_derived_fields_and_timestamp() {
        let engine = ScanEngine::new(universe());
        let results = engine
            .scan_at(&["NEE"], &ScanConfiguration::new("one"), now())
            .unwrap();
        let nee = &results[0];

        assert_eq!(nee.last_dividend_amount, Some(dec!(1.10)));
        assert_eq!(nee.consecutive_growth_years, 4);
        assert_eq!(nee.estimated_next_ex_dividend_date, Some(date(2024, 6, 14)));
        assert_eq!(nee.scanned_at, now());
        assert!(nee.health_score > Decimal::ZERO);
    }

    #[test]
    fn test_growth_years_filter() {
        let engine = ScanEngine::new(universe());
        let config = ScanConfiguration::new("growers")
            .with_filter(ScanFilter::gte(ScanCriterion::YearsOfDividendGrowth, 4u32))
            .with_sort(SortField::Symbol, SortOrder::Asc);
        let results = engine
            .scan_at(&["MO", "NEE", "KO", "DUK"], &config, now())
            .unwrap();
        assert_eq!(symbols(&results), vec!["KO", "NEE"]);
    }

    #[test]
    fn test_ex_dividend_within_days() {
        let engine = ScanEngine::new(universe());
        let config = ScanConfiguration::new("upcoming").with_filter(ScanFilter::lte(
            ScanCriterion::ExDividendWithinDays,
            dec!(30),
        ));
        let results = engine.scan_at(&["KO", "DUK"], &config, now()).unwrap();
        // DUK has no history, so no estimate and no match.
        assert_eq!(symbols(&results), vec!["KO"]);
    }

    #[test]
    fn test_sector_preset_and_limit() {
        let engine = ScanEngine::new(universe());
        let config = presets::sector_focused(&["Utilities"]).with_limit(1);
        let results = engine
            .scan_at(&["KO", "DUK", "MO", "NEE"], &config, now())
            .unwrap();
        assert_eq!(symbols(&results), vec!["DUK"]);
    }

    #[test]
    fn test_invalid_configuration_fails_fast() {
        struct Untouchable;
        impl DividendDataProvider for Untouchable {
            fn get_stock_snapshot(&self, _: &str) -> anyhow::Result<Option<StockSnapshot>> {
                panic!("provider must not be called");
            }
            fn get_financial_metrics(&self, _: &str) -> anyhow::Result<FinancialMetrics> {
                panic!("provider must not be called");
            }
            fn get_dividend_history(
                &self,
                _: &str,
            ) -> anyhow::Result<Vec<DividendHistoryRecord>> {
                panic!("provider must not be called");
            }
        }

        let engine = ScanEngine::new(Untouchable);
        let config = ScanConfiguration::new("bad").with_limit(0);
        assert_eq!(
            engine.scan_at(&["KO"], &config, now()),
            Err(ScanError::ZeroLimit)
        );
    }

    #[test]
    fn test_retrieval_failure_skips_only_that_symbol() {
        struct Flaky(InMemoryProvider);
        impl DividendDataProvider for Flaky {
            fn get_stock_snapshot(&self, symbol: &str) -> anyhow::Result<Option<StockSnapshot>> {
                self.0.get_stock_snapshot(symbol)
            }
            fn get_financial_metrics(&self, symbol: &str) -> anyhow::Result<FinancialMetrics> {
                if symbol == "DUK" {
                    bail!("upstream timeout");
                }
                self.0.get_financial_metrics(symbol)
            }
            fn get_dividend_history(
                &self,
                symbol: &str,
            ) -> anyhow::Result<Vec<DividendHistoryRecord>> {
                self.0.get_dividend_history(symbol)
            }
        }

        let engine = ScanEngine::new(Flaky(universe()));
        let results = engine
            .scan_at(&["KO", "DUK", "MO"], &ScanConfiguration::new("all"), now())
            .unwrap();
        assert_eq!(symbols(&results), vec!["MO", "KO"]);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let engine = ScanEngine::new(universe());
        let config = ScanConfiguration::new("none")
            .with_filter(ScanFilter::gte(ScanCriterion::DividendYield, dec!(0.5)));
        assert!(engine.scan_at(&["KO", "MO"], &config, now()).unwrap().is_empty());
    }
}
