use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fundamental ratios for one stock. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub pe_ratio: Option<Decimal>,
    pub debt_to_equity: Option<Decimal>,
    /// Return on equity as a fraction.
    pub return_on_equity: Option<Decimal>,
    /// Earnings divided by dividends paid.
    pub dividend_coverage_ratio: Option<Decimal>,
    pub revenue_growth: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
    pub earnings_per_share: Option<Decimal>,
}

impl FinancialMetrics {
    #[must_use]
    pub fn with_pe_ratio(mut self, value: Decimal) -> Self {
        self.pe_ratio = Some(value);
        self
    }

    #[must_use]
    pub fn with_debt_to_equity(mut self, value: Decimal) -> Self {
        self.debt_to_equity = Some(value);
        self
    }

    #[must_use]
    pub fn with_return_on_equity(mut self, value: Decimal) -> Self {
        self.return_on_equity = Some(value);
        self
    }

    #[must_use]
    pub fn with_coverage_ratio(mut self, value: Decimal) -> Self {
        self.dividend_coverage_ratio = Some(value);
        self
    }
}
