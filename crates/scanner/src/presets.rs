//! Predefined scan configurations.

use crate::config::{ScanConfiguration, SortField};
use crate::criterion::ScanCriterion;
use crate::filter::ScanFilter;
use divscan_domain::enums::SortOrder;
use rust_decimal_macros::dec;

/// Preset keys accepted by [`preset_by_name`].
pub const PRESET_NAMES: [&str; 4] = [
    "high_yield",
    "dividend_aristocrats",
    "safe_dividend",
    "growth_dividend",
];

/// Yield of at least 4% on large caps with a sustainable payout.
pub fn high_yield() -> ScanConfiguration {
    ScanConfiguration::new("High Yield Scanner")
        .with_filters([
            ScanFilter::gte(ScanCriterion::DividendYield, dec!(0.04)),
            ScanFilter::lte(ScanCriterion::PayoutRatio, dec!(0.8)),
            ScanFilter::gte(ScanCriterion::MarketCap, dec!(1000000000)),
        ])
        .with_sort(SortField::DividendYield, SortOrder::Desc)
}

/// Twenty-five or more consecutive years of dividend growth.
pub fn dividend_aristocrats() -> ScanConfiguration {
    ScanConfiguration::new("Dividend Aristocrats")
        .with_filters([
            ScanFilter::gte(ScanCriterion::YearsOfDividendGrowth, 25u32),
            ScanFilter::lte(ScanCriterion::PayoutRatio, dec!(0.7)),
        ])
        .with_sort(SortField::YearsOfGrowth, SortOrder::Desc)
}

/// Moderate yield backed by coverage, low leverage and strong returns.
pub fn safe_dividend() -> ScanConfiguration {
    ScanConfiguration::new("Safe Dividend Stocks")
        .with_filters([
            ScanFilter::gte(ScanCriterion::DividendYield, dec!(0.02)),
            ScanFilter::lte(ScanCriterion::DividendYield, dec!(0.08)),
            ScanFilter::lte(ScanCriterion::PayoutRatio, dec!(0.6)),
            ScanFilter::gte(ScanCriterion::DividendCoverage, dec!(1.5)),
            ScanFilter::lte(ScanCriterion::DebtToEquity, dec!(0.5)),
            ScanFilter::gte(ScanCriterion::ReturnOnEquity, dec!(0.15)),
        ])
        .with_sort(SortField::DividendHealthScore, SortOrder::Desc)
}

pub fn growth_dividend() -> ScanConfiguration {
    ScanConfiguration::new("Growth Dividend Stocks")
        .with_filters([
            ScanFilter::gte(ScanCriterion::YearsOfDividendGrowth, 5u32),
            ScanFilter::lte(ScanCriterion::PayoutRatio, dec!(0.7)),
            ScanFilter::gte(ScanCriterion::ReturnOnEquity, dec!(0.12)),
        ])
        .with_sort(SortField::DividendGrowthRate, SortOrder::Desc)
}

/// Dividend payers restricted to `sectors`.
pub fn sector_focused<S: AsRef<str>>(sectors: &[S]) -> ScanConfiguration {
    let names: Vec<&str> = sectors.iter().map(AsRef::as_ref).collect();
    ScanConfiguration::new(format!("Sector Focused: {}", names.join(", ")))
        .with_filters([
            ScanFilter::one_of(ScanCriterion::Sector, names.iter().copied()),
            ScanFilter::gte(ScanCriterion::DividendYield, dec!(0.01)),
            ScanFilter::lte(ScanCriterion::PayoutRatio, dec!(0.8)),
        ])
        .with_sort(SortField::DividendYield, SortOrder::Desc)
}

/// Looks up a preset by key, see [`PRESET_NAMES`].
pub fn preset_by_name(name: &str) -> Option<ScanConfiguration> {
    match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "high_yield" => Some(high_yield()),
        "dividend_aristocrats" | "aristocrats" => Some(dividend_aristocrats()),
        "safe_dividend" => Some(safe_dividend()),
        "growth_dividend" => Some(growth_dividend()),
        _ => None,
    }
}
