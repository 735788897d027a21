//! Prelude module for convenient imports.
//!
//! ```rust
//! use divscan_scanner::prelude::*;
//! ```

pub use crate::config::{ScanConfiguration, SortField, sort_results};
pub use crate::criterion::{CriterionValue, ScanCriterion, StockContext, ValueKind};
pub use crate::engine::ScanEngine;
pub use crate::error::ScanError;
pub use crate::filter::{FilterOperator, FilterValue, ScanFilter};
pub use crate::presets::{
    PRESET_NAMES, dividend_aristocrats, growth_dividend, high_yield, preset_by_name,
    safe_dividend, sector_focused,
};
pub use crate::provider::{DividendDataProvider, InMemoryProvider, StockRecord};
