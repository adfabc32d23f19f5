//! Cost model — maps a trade series to a per-period friction series.
//!
//! Four strictly linear terms per period:
//! - commission: flat charge whenever a trade occurs
//! - half-spread: paid per unit of |Δweight| (crossing the spread)
//! - volatility slippage: local realized volatility scales price impact
//! - volume slippage: participation of traded notional in daily volume
//!
//! Linearity is a deliberate simplification, not an approximation error; no
//! nonlinear impact term is applied anywhere in this model. All outputs are
//! fractions of notional per period, the same unit as returns.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::series::{PriceVolumeSeries, TradeSeries};
use crate::volatility::{trailing_dollar_volume, trailing_volatility, DEFAULT_LOOKBACK};

/// Friction parameters for one cost scenario. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Flat commission charged per trade, as a fraction of notional
    /// (0.005 = 50 bps per trade).
    pub commission_per_trade: f64,
    /// Half the bid-ask spread, as a fraction (0.001 = 10 bps).
    pub half_spread: f64,
    /// Linear coefficient on local per-period volatility.
    pub slippage_vol_coeff: f64,
    /// Linear coefficient on participation (traded notional / ADV).
    pub slippage_volume_coeff: f64,
    /// Capital assumed deployed, in dollars. The volume term is
    /// dimensionless only relative to this.
    pub notional: f64,
    /// Trailing window for local volatility and ADV, in periods.
    /// Must be shorter than the analyzed series.
    pub vol_lookback: usize,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            commission_per_trade: 0.005,
            half_spread: 0.001,
            slippage_vol_coeff: 0.1,
            slippage_volume_coeff: 0.0001,
            notional: 1_000_000.0,
            vol_lookback: DEFAULT_LOOKBACK,
        }
    }
}

impl CostConfig {
    /// All coefficients zero: net returns must equal gross exactly.
    pub fn frictionless() -> Self {
        Self {
            commission_per_trade: 0.0,
            half_spread: 0.0,
            slippage_vol_coeff: 0.0,
            slippage_volume_coeff: 0.0,
            ..Self::default()
        }
    }

    /// Reject negative or non-finite parameters.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let named = [
            ("commission_per_trade", self.commission_per_trade),
            ("half_spread", self.half_spread),
            ("slippage_vol_coeff", self.slippage_vol_coeff),
            ("slippage_volume_coeff", self.slippage_volume_coeff),
            ("notional", self.notional),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Per-period friction for a trade series under a cost configuration.
///
/// `cost[t] = commission × 1{trade≠0}
///          + half_spread × |Δw|
///          + vol_coeff × local_vol[t] × |Δw|
///          + volume_coeff × |Δw| × notional / trailing_adv[t]`
///
/// Output is aligned one-to-one with the trade series. Fails with
/// `MisalignedSeries` when the trade and price series disagree on length
/// and `InsufficientHistory` when the volatility lookback does not fit.
pub fn compute_cost_series(
    trades: &TradeSeries,
    prices: &PriceVolumeSeries,
    config: &CostConfig,
) -> Result<Vec<f64>, AnalysisError> {
    config.validate()?;
    if trades.len() != prices.len() {
        return Err(AnalysisError::MisalignedSeries {
            context: "trades vs prices",
            expected: prices.len(),
            actual: trades.len(),
        });
    }

    // The volatility estimator is the only term that needs warm history;
    // skip it (and its failure mode) when its coefficient is zero.
    let local_vol = if config.slippage_vol_coeff > 0.0 {
        Some(trailing_volatility(prices, config.vol_lookback)?)
    } else {
        None
    };
    let adv = trailing_dollar_volume(prices, config.vol_lookback);

    let costs = trades
        .trades()
        .iter()
        .enumerate()
        .map(|(t, &trade)| {
            if trade == 0.0 {
                return 0.0;
            }
            let commission = config.commission_per_trade;
            let spread = config.half_spread * trade;
            let vol_slip = local_vol
                .as_ref()
                .map_or(0.0, |v| config.slippage_vol_coeff * v[t] * trade);
            let volume_slip = if adv[t] > 0.0 {
                config.slippage_volume_coeff * trade * config.notional / adv[t]
            } else {
                0.0
            };
            commission + spread + vol_slip + volume_slip
        })
        .collect();

    Ok(costs)
}
