use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ratio stored as a fraction and rendered as a percentage with one
/// decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub fn from_fraction(fraction: Decimal) -> Self {
        Self(fraction)
    }

    /// Builds from percentage points (25 -> 0.25).
    pub fn from_points(points: Decimal) -> Self {
        Self(points / Decimal::ONE_HUNDRED)
    }

    pub fn as_fraction(&self) -> Decimal {
        self.0
    }

    pub fn as_points(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.as_points().round_dp(1))
    }
}
