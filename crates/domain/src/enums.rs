use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-level risk label used by every risk dimension and the overall rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionAction {
    Buy,
    Sell,
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("BUY"),
            Self::Sell => f.write_str("SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastConfidence {
    Low,
    Medium,
}

/// Qualitative band of a dividend safety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyRating {
    VerySafe,
    Safe,
    ModerateRisk,
    HighRisk,
}

impl SafetyRating {
    /// Maps a 0-100 safety score onto its band.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Self::VerySafe
        } else if score >= 60 {
            Self::Safe
        } else if score >= 40 {
            Self::ModerateRisk
        } else {
            Self::HighRisk
        }
    }

    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::VerySafe => "Excellent dividend safety. Suitable for conservative investors.",
            Self::Safe => "Good dividend safety. Suitable for most investors.",
            Self::ModerateRisk => "Moderate safety. Monitor closely and diversify.",
            Self::HighRisk => "High risk dividend. Consider avoiding or small allocation only.",
        }
    }
}

impl fmt::Display for SafetyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::VerySafe => "Very Safe",
            Self::Safe => "Safe",
            Self::ModerateRisk => "Moderate Risk",
            Self::HighRisk => "High Risk",
        };
        f.write_str(label)
    }
}
