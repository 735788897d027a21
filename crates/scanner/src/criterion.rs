//! The closed set of scan criteria.
//!
//! Each criterion knows which field it reads and whether that field is
//! numeric or categorical. Extraction returns `None` when the stock lacks the
//! field, which makes every filter on that criterion fail.

use crate::error::ScanError;
use chrono::NaiveDate;
use divscan_domain::entities::{FinancialMetrics, StockSnapshot};
use divscan_domain::metrics::DividendStats;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Everything a criterion may read about one stock.
#[derive(Debug, Clone, Copy)]
pub struct StockContext<'a> {
    pub snapshot: &'a StockSnapshot,
    pub metrics: &'a FinancialMetrics,
    pub stats: &'a DividendStats,
    /// Reference date for time-relative criteria.
    pub as_of: NaiveDate,
}

/// Whether a criterion compares numbers or labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Numeric,
    Categorical,
}

impl ValueKind {
    fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

/// A value read from a stock or supplied by a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CriterionValue {
    Number(Decimal),
    Text(String),
}

impl CriterionValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Numeric,
            Self::Text(_) => ValueKind::Categorical,
        }
    }

    /// Orders two values of the same kind; `None` across kinds.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<Decimal> for CriterionValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for CriterionValue {
    fn from(value: u32) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<&str> for CriterionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CriterionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Stock attribute a filter tests.
///
/// Minimum/maximum variants of the same attribute share one criterion; the
/// filter operator carries the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanCriterion {
    #[serde(alias = "min_dividend_yield", alias = "max_dividend_yield")]
    DividendYield,
    #[serde(alias = "min_market_cap", alias = "max_market_cap")]
    MarketCap,
    #[serde(alias = "max_payout_ratio")]
    PayoutRatio,
    #[serde(alias = "min_dividend_coverage")]
    DividendCoverage,
    #[serde(alias = "sectors")]
    Sector,
    #[serde(alias = "min_pe_ratio", alias = "max_pe_ratio")]
    PeRatio,
    #[serde(alias = "min_roe")]
    ReturnOnEquity,
    #[serde(alias = "max_debt_to_equity")]
    DebtToEquity,
    #[serde(alias = "min_years_dividend_growth")]
    YearsOfDividendGrowth,
    /// Days from the scan date to the estimated next ex-dividend date.
    ExDividendWithinDays,
}

impl ScanCriterion {
    pub const ALL: [ScanCriterion; 10] = [
        Self::DividendYield,
        Self::MarketCap,
        Self::PayoutRatio,
        Self::DividendCoverage,
        Self::Sector,
        Self::PeRatio,
        Self::ReturnOnEquity,
        Self::DebtToEquity,
        Self::YearsOfDividendGrowth,
        Self::ExDividendWithinDays,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DividendYield => "dividend_yield",
            Self::MarketCap => "market_cap",
            Self::PayoutRatio => "payout_ratio",
            Self::DividendCoverage => "dividend_coverage",
            Self::Sector => "sector",
            Self::PeRatio => "pe_ratio",
            Self::ReturnOnEquity => "return_on_equity",
            Self::DebtToEquity => "debt_to_equity",
            Self::YearsOfDividendGrowth => "years_of_dividend_growth",
            Self::ExDividendWithinDays => "ex_dividend_within_days",
        }
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Sector => ValueKind::Categorical,
            _ => ValueKind::Numeric,
        }
    }

    /// Reads this criterion's value from a stock.
    pub fn extract(&self, ctx: &StockContext<'_>) -> Option<CriterionValue> {
        let number = |value: Option<Decimal>| value.map(CriterionValue::Number);

        match self {
            Self::DividendYield => number(ctx.snapshot.dividend_yield),
            Self::MarketCap => number(ctx.snapshot.market_cap),
            Self::PayoutRatio => number(ctx.snapshot.payout_ratio),
            Self::DividendCoverage => number(ctx.metrics.dividend_coverage_ratio),
            Self::Sector => ctx.snapshot.sector.clone().map(CriterionValue::Text),
            Self::PeRatio => number(ctx.metrics.pe_ratio),
            Self::ReturnOnEquity => number(ctx.metrics.return_on_equity),
            Self::DebtToEquity => number(ctx.metrics.debt_to_equity),
            Self::YearsOfDividendGrowth => {
                Some(CriterionValue::from(ctx.stats.consecutive_growth_years))
            }
            Self::ExDividendWithinDays => ctx
                .stats
                .estimated_next_ex_dividend_date
                .map(|next| CriterionValue::Number(Decimal::from((next - ctx.as_of).num_days()))),
        }
    }

    pub(crate) fn expect_kind(&self, value: &CriterionValue) -> Result<(), ScanError> {
        if value.kind() == self.kind() {
            Ok(())
        } else {
            Err(ScanError::ValueKindMismatch {
                criterion: *self,
                expected: self.kind().name(),
            })
        }
    }
}

impl fmt::Display for ScanCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanCriterion {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        let criterion = match tag.as_str() {
            "dividend_yield" | "min_dividend_yield" | "max_dividend_yield" => Self::DividendYield,
            "market_cap" | "min_market_cap" | "max_market_cap" => Self::MarketCap,
            "payout_ratio" | "max_payout_ratio" => Self::PayoutRatio,
            "dividend_coverage" | "min_dividend_coverage" => Self::DividendCoverage,
            "sector" | "sectors" => Self::Sector,
            "pe_ratio" | "min_pe_ratio" | "max_pe_ratio" => Self::PeRatio,
            "return_on_equity" | "min_roe" => Self::ReturnOnEquity,
            "debt_to_equity" | "max_debt_to_equity" => Self::DebtToEquity,
            "years_of_dividend_growth" | "min_years_dividend_growth" => {
                Self::YearsOfDividendGrowth
            }
            "ex_dividend_within_days" => Self::ExDividendWithinDays,
            _ => return Err(ScanError::UnknownCriterion(s.to_string())),
        };
        Ok(criterion)
    }
}
