//! Core domain model for the dividend screener.
//!
//! Plain data records exchanged with external collaborators (snapshots,
//! financial metrics, dividend history, portfolio holdings), the result
//! records produced by the scan, risk and backtest engines, and the pure
//! metric functions shared by all of them.

pub mod entities;
pub mod enums;
pub mod metrics;
pub mod value_objects;

pub mod prelude;
