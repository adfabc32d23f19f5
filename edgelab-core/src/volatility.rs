//! Trailing estimators over the price/volume series.
//!
//! Both estimators are causal: the value at t uses observations up to and
//! including t, never ahead. Partial windows at the start of the series use
//! whatever history exists so the output aligns one-to-one with the input.

use crate::error::AnalysisError;
use crate::series::PriceVolumeSeries;

/// Default lookback for the local volatility and ADV estimators, in periods.
pub const DEFAULT_LOOKBACK: usize = 20;

/// Trailing realized volatility of simple price returns, per-period units.
///
/// Output is aligned one-to-one with the series. The first two entries are
/// 0.0 (no return / single return); after that, the sample standard
/// deviation of the last `lookback` returns (fewer while the window fills).
///
/// Fails with `InsufficientHistory` when the lookback is not shorter than
/// the series length — a window that never fills would silently degrade the
/// whole cost model.
pub fn trailing_volatility(
    series: &PriceVolumeSeries,
    lookback: usize,
) -> Result<Vec<f64>, AnalysisError> {
    if lookback < 2 {
        return Err(AnalysisError::InvalidConfig(format!(
            "volatility lookback must be at least 2, got {lookback}"
        )));
    }
    if series.len() <= lookback {
        return Err(AnalysisError::InsufficientHistory {
            required: lookback + 1,
            actual: series.len(),
        });
    }

    let prices: Vec<f64> = series.prices().collect();
    let mut returns = Vec::with_capacity(prices.len());
    returns.push(0.0); // no return at t = 0
    for w in prices.windows(2) {
        returns.push(w[1] / w[0] - 1.0);
    }

    let mut vol = Vec::with_capacity(prices.len());
    for t in 0..returns.len() {
        // Window of returns ending at t, excluding the placeholder at 0.
        let start = t.saturating_sub(lookback - 1).max(1);
        if t < 2 {
            vol.push(0.0);
            continue;
        }
        vol.push(sample_std(&returns[start..=t]));
    }
    Ok(vol)
}

/// Trailing mean dollar volume, aligned one-to-one with the series.
///
/// Partial windows use what is available (a one-observation mean is the
/// observation itself), so the output is defined from t = 0.
pub fn trailing_dollar_volume(series: &PriceVolumeSeries, lookback: usize) -> Vec<f64> {
    let volumes: Vec<f64> = series.dollar_volumes().collect();
    let lookback = lookback.max(1);
    let mut adv = Vec::with_capacity(volumes.len());
    let mut running = 0.0;
    for t in 0..volumes.len() {
        running += volumes[t];
        if t >= lookback {
            running -= volumes[t - lookback];
        }
        let width = (t + 1).min(lookback) as f64;
        adv.push(running / width);
    }
    adv
}

/// Sample standard deviation (n − 1 denominator). 0.0 for fewer than 2 values.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}
