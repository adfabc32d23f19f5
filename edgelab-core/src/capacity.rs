//! Capacity estimation — how much capital a signal can carry before market
//! impact consumes its edge.
//!
//! `implied_capacity = participation_rate × ADV / daily_turnover`: the
//! capital level at which trading the signal's average daily |Δweight|
//! consumes exactly the assumed share of daily volume. Impact at that level
//! is a linear function of participation — a deliberate simplification of
//! the sublinear (square-root) empirical relationship, kept linear so the
//! estimate stays conservative and has no fitted parameters.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Linear impact per unit participation: 0.001 ≙ 10 bps of cost at 100%
/// participation. Stylized constant from empirical impact studies.
pub const DEFAULT_IMPACT_COEFFICIENT: f64 = 0.001;

/// Conservative share of daily volume a single strategy may consume.
pub const DEFAULT_PARTICIPATION_RATE: f64 = 0.01;

/// Deployable capital, or the explicit statement that volume never binds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Capacity {
    /// Maximum deployable capital in dollars.
    Bounded { dollars: f64 },
    /// Zero daily turnover: the signal never trades, so volume never
    /// constrains deployable capital. Reported as its own variant rather
    /// than a numeric zero or infinity.
    Unbounded,
}

/// Capacity figure plus the assumptions that produced it.
///
/// Derived, never persisted by the core; recomputation under a different
/// participation rate is a fresh call with no hidden state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityEstimate {
    pub participation_rate: f64,
    pub avg_daily_dollar_volume: f64,
    pub implied_capacity: Capacity,
    /// Expected cost drag at full capacity: participation × impact
    /// coefficient, as a fraction of notional.
    pub implied_impact_cost_at_capacity: f64,
}

/// Map a participation assumption and observed volume to a capacity figure.
///
/// `daily_turnover` is the mean |Δweight| per period (annualized turnover
/// divided by periods per year). Zero daily turnover is reported as
/// `Capacity::Unbounded`, never a division fault.
pub fn estimate_capacity(
    participation_rate: f64,
    avg_daily_dollar_volume: f64,
    daily_turnover: f64,
    impact_coefficient: f64,
) -> Result<CapacityEstimate, AnalysisError> {
    let named = [
        ("participation_rate", participation_rate),
        ("avg_daily_dollar_volume", avg_daily_dollar_volume),
        ("daily_turnover", daily_turnover),
        ("impact_coefficient", impact_coefficient),
    ];
    for (name, value) in named {
        if !value.is_finite() || value < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "{name} must be non-negative and finite, got {value}"
            )));
        }
    }

    let implied_capacity = if daily_turnover == 0.0 {
        Capacity::Unbounded
    } else {
        Capacity::Bounded {
            dollars: participation_rate * avg_daily_dollar_volume / daily_turnover,
        }
    };

    Ok(CapacityEstimate {
        participation_rate,
        avg_daily_dollar_volume,
        implied_capacity,
        implied_impact_cost_at_capacity: participation_rate * impact_coefficient,
    })
}
