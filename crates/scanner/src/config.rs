//! Scan configuration: filters, sort key, order and limit.

use crate::criterion::CriterionValue;
use crate::error::ScanError;
use crate::filter::ScanFilter;
use divscan_domain::enums::SortOrder;
use divscan_domain::value_objects::ScanResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field of a [`ScanResult`] the results can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Symbol,
    #[default]
    DividendYield,
    PayoutRatio,
    MarketCap,
    CurrentPrice,
    PeRatio,
    #[serde(alias = "roe")]
    ReturnOnEquity,
    DebtToEquity,
    #[serde(alias = "dividend_coverage")]
    DividendCoverageRatio,
    #[serde(alias = "health_score")]
    DividendHealthScore,
    LastDividendAmount,
    #[serde(alias = "avg_growth_rate")]
    DividendGrowthRate,
    #[serde(alias = "consecutive_growth_years")]
    YearsOfGrowth,
}

impl SortField {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::DividendYield => "dividend_yield",
            Self::PayoutRatio => "payout_ratio",
            Self::MarketCap => "market_cap",
            Self::CurrentPrice => "current_price",
            Self::PeRatio => "pe_ratio",
            Self::ReturnOnEquity => "return_on_equity",
            Self::DebtToEquity => "debt_to_equity",
            Self::DividendCoverageRatio => "dividend_coverage_ratio",
            Self::DividendHealthScore => "dividend_health_score",
            Self::LastDividendAmount => "last_dividend_amount",
            Self::DividendGrowthRate => "dividend_growth_rate",
            Self::YearsOfGrowth => "years_of_growth",
        }
    }

    /// Sort key of a result row, `None` when the row lacks the field.
    #[must_use]
    pub fn key(&self, result: &ScanResult) -> Option<CriterionValue> {
        let snapshot = &result.snapshot;
        let metrics = &result.metrics;
        match self {
            Self::Symbol => Some(CriterionValue::from(snapshot.symbol.as_str())),
            Self::DividendYield => snapshot.dividend_yield.map(Into::into),
            Self::PayoutRatio => snapshot.payout_ratio.map(Into::into),
            Self::MarketCap => snapshot.market_cap.map(Into::into),
            Self::CurrentPrice => snapshot.current_price.map(Into::into),
            Self::PeRatio => metrics.pe_ratio.map(Into::into),
            Self::ReturnOnEquity => metrics.return_on_equity.map(Into::into),
            Self::DebtToEquity => metrics.debt_to_equity.map(Into::into),
            Self::DividendCoverageRatio => metrics.dividend_coverage_ratio.map(Into::into),
            Self::DividendHealthScore => Some(result.health_score.into()),
            Self::LastDividendAmount => result.last_dividend_amount.map(Into::into),
            Self::DividendGrowthRate => result.avg_growth_rate.map(Into::into),
            Self::YearsOfGrowth => Some(result.consecutive_growth_years.into()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_ascii_lowercase().as_str() {
            "symbol" => Self::Symbol,
            "dividend_yield" => Self::DividendYield,
            "payout_ratio" => Self::PayoutRatio,
            "market_cap" => Self::MarketCap,
            "current_price" => Self::CurrentPrice,
            "pe_ratio" => Self::PeRatio,
            "return_on_equity" | "roe" => Self::ReturnOnEquity,
            "debt_to_equity" => Self::DebtToEquity,
            "dividend_coverage_ratio" | "dividend_coverage" => Self::DividendCoverageRatio,
            "dividend_health_score" | "health_score" => Self::DividendHealthScore,
            "last_dividend_amount" => Self::LastDividendAmount,
            "dividend_growth_rate" | "avg_growth_rate" => Self::DividendGrowthRate,
            "years_of_growth" | "consecutive_growth_years" => Self::YearsOfGrowth,
            _ => return Err(ScanError::UnknownSortField(s.to_string())),
        };
        Ok(field)
    }
}

/// A named scan: filters combined with AND, then sort and limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfiguration {
    pub name: String,
    pub filters: Vec<ScanFilter>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub limit: Option<usize>,
}

impl Default for ScanConfiguration {
    fn default() -> Self {
        Self::new("Custom Scan")
    }
}

impl ScanConfiguration {
    /// Creates a configuration with no filters, sorted by dividend yield
    /// descending and without a limit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filters: Vec::new(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            limit: None,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: ScanFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = ScanFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Checks every filter and the limit.
    ///
    /// # Errors
    /// Returns the first configuration error found.
    pub fn validate(&self) -> Result<(), ScanError> {
        self.filters.iter().try_for_each(ScanFilter::validate)?;
        if self.limit == Some(0) {
            return Err(ScanError::ZeroLimit);
        }
        Ok(())
    }

    /// Sorts `results` in place and applies the limit.
    pub fn order(&self, results: &mut Vec<ScanResult>) {
        sort_results(results, self.sort_by, self.sort_order);
        if let Some(limit) = self.limit {
            results.truncate(limit);
        }
    }
}

/// Stable sort by `field`. Rows without the key go last in either order.
pub fn sort_results(results: &mut [ScanResult], field: SortField, order: SortOrder) {
    results.sort_by(|a, b| match (field.key(a), field.key(b)) {
        (Some(x), Some(y)) => {
            let ordering = x.compare(&y).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
