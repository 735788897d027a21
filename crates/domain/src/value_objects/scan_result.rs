use crate::entities::{FinancialMetrics, StockSnapshot};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a scan: the inputs that qualified plus the fields derived from
/// them at scan time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub snapshot: StockSnapshot,
    pub metrics: FinancialMetrics,
    pub health_score: Decimal,
    pub last_dividend_amount: Option<Decimal>,
    pub avg_growth_rate: Option<Decimal>,
    pub consecutive_growth_years: u32,
    pub estimated_next_ex_dividend_date: Option<NaiveDate>,
    pub scanned_at: DateTime<Utc>,
}

impl ScanResult {
    pub fn symbol(&self) -> &str {
        &self.snapshot.symbol
    }
}
