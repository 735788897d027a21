//! Runtime settings read from the environment.

use anyhow::{Context, Result};
use std::str::FromStr;

/// Tunables shared by every command. Command-line flags override them.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    pub var_trials: usize,
    pub base_volatility: f64,
    /// Seed for every random generator; unset means OS entropy.
    pub seed: Option<u64>,
    pub sharpe_factor: f64,
    pub horizon_years: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            var_trials: 10_000,
            base_volatility: 0.02,
            seed: None,
            sharpe_factor: 252.0,
            horizon_years: 3,
        }
    }
}

impl Settings {
    /// Loads settings from `DIVSCAN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through `lookup`, falling back to defaults for unset
    /// keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            log_level: lookup("DIVSCAN_LOG_LEVEL").unwrap_or(defaults.log_level),
            var_trials: parse_or(&lookup, "DIVSCAN_VAR_TRIALS", defaults.var_trials)?,
            base_volatility: parse_or(&lookup, "DIVSCAN_BASE_VOLATILITY", defaults.base_volatility)?,
            seed: lookup("DIVSCAN_SEED")
                .map(|raw| parse_value::<u64>("DIVSCAN_SEED", &raw))
                .transpose()?,
            sharpe_factor: parse_or(&lookup, "DIVSCAN_SHARPE_FACTOR", defaults.sharpe_factor)?,
            horizon_years: parse_or(&lookup, "DIVSCAN_HORIZON_YEARS", defaults.horizon_years)?,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid value for {key}: {raw:?}"))
}
