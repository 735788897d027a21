//! JSON fixture loading.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use divscan_domain::entities::{
    DividendHistoryRecord, FinancialMetrics, PortfolioHolding, StockSnapshot,
};
use divscan_scanner::config::ScanConfiguration;
use divscan_scanner::provider::{InMemoryProvider, StockRecord};
use divscan_simulation::backtest::StrategyConfig;
use divscan_simulation::market_data::HistoricalMarketData;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// One stock as written in a universe file. Dividends are raw payments;
/// growth rates are derived on load.
#[derive(Debug, Deserialize)]
struct UniverseEntry {
    symbol: String,
    name: String,
    sector: Option<String>,
    market_cap: Option<Decimal>,
    current_price: Option<Decimal>,
    dividend_yield: Option<Decimal>,
    payout_ratio: Option<Decimal>,
    #[serde(default)]
    metrics: FinancialMetrics,
    #[serde(default)]
    dividends: Vec<Payment>,
}

#[derive(Debug, Deserialize)]
struct Payment {
    date: NaiveDate,
    amount: Decimal,
}

impl From<UniverseEntry> for StockRecord {
    fn from(entry: UniverseEntry) -> Self {
        let snapshot = StockSnapshot {
            symbol: entry.symbol,
            name: entry.name,
            sector: entry.sector,
            market_cap: entry.market_cap,
            current_price: entry.current_price,
            dividend_yield: entry.dividend_yield,
            payout_ratio: entry.payout_ratio,
        };
        let history = DividendHistoryRecord::series_from_payments(
            entry.dividends.into_iter().map(|p| (p.date, p.amount)),
        );
        StockRecord::new(snapshot)
            .with_metrics(entry.metrics)
            .with_history(history)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    Ok(serde_json::from_str(raw)?)
}

fn universe_from_str(raw: &str) -> Result<InMemoryProvider> {
    let entries: Vec<UniverseEntry> = parse_json(raw)?;
    Ok(InMemoryProvider::from_records(
        entries.into_iter().map(StockRecord::from),
    ))
}

/// Loads a stock universe into an in-memory provider.
pub fn load_universe(path: &Path) -> Result<InMemoryProvider> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    universe_from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn load_portfolio(path: &Path) -> Result<Vec<PortfolioHolding>> {
    read_json(path)
}

pub fn load_scan_config(path: &Path) -> Result<ScanConfiguration> {
    read_json(path)
}

pub fn load_strategy(path: &Path) -> Result<StrategyConfig> {
    read_json(path)
}

pub fn load_market(path: &Path) -> Result<HistoricalMarketData> {
    read_json(path)
}
