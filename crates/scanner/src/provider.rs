//! Data collaborator seam for the scan engine.

use anyhow::{Result, anyhow};
use divscan_domain::entities::{DividendHistoryRecord, FinancialMetrics, StockSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supplies per-symbol market data, fundamentals and dividend history.
pub trait DividendDataProvider {
    /// Latest snapshot; `Ok(None)` when the symbol is unknown.
    fn get_stock_snapshot(&self, symbol: &str) -> Result<Option<StockSnapshot>>;

    fn get_financial_metrics(&self, symbol: &str) -> Result<FinancialMetrics>;

    fn get_dividend_history(&self, symbol: &str) -> Result<Vec<DividendHistoryRecord>>;
}

impl<P: DividendDataProvider + ?Sized> DividendDataProvider for &P {
    fn get_stock_snapshot(&self, symbol: &str) -> Result<Option<StockSnapshot>> {
        (**self).get_stock_snapshot(symbol)
    }

    fn get_financial_metrics(&self, symbol: &str) -> Result<FinancialMetrics> {
        (**self).get_financial_metrics(symbol)
    }

    fn get_dividend_history(&self, symbol: &str) -> Result<Vec<DividendHistoryRecord>> {
        (**self).get_dividend_history(symbol)
    }
}

/// Everything known about one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub snapshot: StockSnapshot,
    #[serde(default)]
    pub metrics: FinancialMetrics,
    #[serde(default)]
    pub history: Vec<DividendHistoryRecord>,
}

impl StockRecord {
    pub fn new(snapshot: StockSnapshot) -> Self {
        Self {
            snapshot,
            metrics: FinancialMetrics::default(),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: FinancialMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: Vec<DividendHistoryRecord>) -> Self {
        self.history = history;
        self
    }
}

/// Provider backed by a map of symbol to [`StockRecord`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    records: HashMap<String, StockRecord>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = StockRecord>) -> Self {
        let mut provider = Self::new();
        for record in records {
            provider.insert(record);
        }
        provider
    }

    /// Adds or replaces the record keyed by its snapshot symbol.
    pub fn insert(&mut self, record: StockRecord) {
        self.records.insert(record.snapshot.symbol.clone(), record);
    }

    /// Known symbols in ascending order.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.records.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record(&self, symbol: &str) -> Result<&StockRecord> {
        self.records
            .get(symbol)
            .ok_or_else(|| anyhow!("no data for symbol {symbol}"))
    }
}

impl DividendDataProvider for InMemoryProvider {
    fn get_stock_snapshot(&self, symbol: &str) -> Result<Option<StockSnapshot>> {
        Ok(self.records.get(symbol).map(|r| r.snapshot.clone()))
    }

    fn get_financial_metrics(&self, symbol: &str) -> Result<FinancialMetrics> {
        Ok(self.record(symbol)?.metrics.clone())
    }

    fn get_dividend_history(&self, symbol: &str) -> Result<Vec<DividendHistoryRecord>> {
        Ok(self.record(symbol)?.history.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_in_memory_lookup() {
        let provider = InMemoryProvider::from_records([
            StockRecord::new(StockSnapshot::new("KO", "Coca-Cola")),
            StockRecord::new(StockSnapshot::new("JNJ", "Johnson & Johnson"))
                .with_metrics(FinancialMetrics::default().with_pe_ratio(dec!(16))),
        ]);

        assert_eq!(provider.symbols(), vec!["JNJ", "KO"]);
        assert_eq!(
            provider.get_financial_metrics("JNJ").unwrap().pe_ratio,
            Some(dec!(16))
        );
        assert!(provider.get_stock_snapshot("XOM").unwrap().is_none());
        assert!(provider.get_dividend_history("XOM").is_err());
    }

    #[test]
    fn test_record_deserializes_with_defaults() {
        let record: StockRecord = serde_json::from_str(
            r#"{"snapshot": {"symbol": "T", "name": "AT&T", "sector": null,
                "market_cap": null, "current_price": null,
                "dividend_yield": null, "payout_ratio": null}}"#,
        )
        .unwrap();
        assert!(record.history.is_empty());
        assert_eq!(record.metrics, FinancialMetrics::default());
    }
}
