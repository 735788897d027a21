//! Declarative dividend stock scanner.
//!
//! A [`ScanConfiguration`](config::ScanConfiguration) is an ordered list of
//! filters combined with logical AND plus a sort key and an optional limit.
//! The [`ScanEngine`](engine::ScanEngine) pulls data for each symbol from a
//! [`DividendDataProvider`](provider::DividendDataProvider), keeps the stocks
//! that pass every filter, attaches a health score and derived dividend
//! statistics, then sorts and truncates.

pub mod config;
pub mod criterion;
pub mod engine;
pub mod error;
pub mod filter;
pub mod presets;
pub mod provider;

pub mod prelude;
