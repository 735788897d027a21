//! Portfolio performance statistics used by the backtester.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Standard deviations below this are treated as zero.
const MIN_DISPERSION: f64 = 1e-12;

/// Simple returns between consecutive values. Pairs starting from a zero
/// value are skipped.
pub fn period_returns(values: &[Decimal]) -> Vec<f64> {
    values
        .windows(2)
        .filter(|pair| !pair[0].is_zero())
        .filter_map(|pair| ((pair[1] - pair[0]) / pair[0]).to_f64())
        .collect()
}

/// Annualized Sharpe ratio of a return series with a zero risk-free rate.
///
/// Uses the sample standard deviation. Returns `None` with fewer than two
/// observations or zero dispersion.
///
/// # Arguments
///
/// * `returns` - Per-period simple returns
/// * `annualization_factor` - Periods per year; the ratio is scaled by its square root
pub fn sharpe_ratio(returns: &[f64], annualization_factor: f64) -> Option<Decimal> {
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();

    if std_dev < MIN_DISPERSION || !std_dev.is_finite() {
        return None;
    }

    Decimal::from_f64(mean / std_dev * annualization_factor.sqrt())
}

/// Largest peak-to-trough decline, as a non-positive fraction.
pub fn max_drawdown(values: &[Decimal]) -> Decimal {
    let mut running_max = Decimal::ZERO;
    let mut max_drawdown = Decimal::ZERO;

    for value in values {
        if *value > running_max {
            running_max = *value;
        }
        let drawdown = if running_max.is_zero() {
            Decimal::ZERO
        } else {
            (*value - running_max) / running_max
        };
        if drawdown < max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown
}

/// Compounds a total return down to a per-year rate.
///
/// # Errors
///
/// Returns an error if `years` is not positive.
pub fn annualized_return(total_return: Decimal, years: f64) -> Result<Decimal, &'static str> {
    if years <= 0.0 {
        return Err("Years must be positive");
    }

    let growth = (Decimal::ONE + total_return)
        .to_f64()
        .ok_or("Overflow converting to f64")?;
    if growth <= 0.0 {
        return Ok(Decimal::NEGATIVE_ONE);
    }

    Decimal::from_f64(growth.powf(1.0 / years) - 1.0).ok_or("Overflow converting result")
}
