//! Single-pass tradability analysis: gross vs net regime, break-even cost,
//! and capacity, for one (signal, asset, cost-configuration) tuple.
//!
//! Stage order is fixed — turnover → cost → net returns → metrics →
//! break-even → capacity — because each stage consumes the prior's output.

use serde::{Deserialize, Serialize};

use edgelab_core::{
    compute_cost_series, compute_turnover, daily_turnover, estimate_capacity, net_returns,
    solve_break_even_cost, AnalysisError, BreakEven, CapacityEstimate, PerformanceMetrics,
    PositionSeries, PriceVolumeSeries,
};

use crate::config::{AnalysisConfig, RunId};

/// Version stamp written into every persisted report. Readers reject
/// artifacts from a newer schema.
pub const SCHEMA_VERSION: u32 = 1;

/// Full decomposition of a signal's economics under one cost scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradabilityReport {
    pub schema_version: u32,
    pub run_id: RunId,
    pub periods_per_year: f64,

    /// Frictionless regime.
    pub gross: PerformanceMetrics,
    /// Cost-adjusted regime under the configured friction parameters.
    pub net: PerformanceMetrics,

    pub annualized_turnover: f64,
    /// Mean per-period cost × periods per year: the annualized haircut the
    /// cost model takes from gross returns.
    pub cost_drag: f64,
    /// net hit rate / gross hit rate, when both are defined and gross > 0.
    pub hit_rate_survival: Option<f64>,
    /// net annualized return / gross annualized return, when gross is
    /// meaningfully nonzero.
    pub pnl_collapse: Option<f64>,

    pub break_even: BreakEven,
    pub capacity: CapacityEstimate,
}

/// Run the full pipeline once.
///
/// `gross` is the caller-computed return realized by holding each period's
/// entering position one period forward, aligned one-to-one with the
/// position series.
pub fn run_analysis(
    market: &PriceVolumeSeries,
    positions: &PositionSeries,
    gross: &[f64],
    config: &AnalysisConfig,
) -> Result<TradabilityReport, AnalysisError> {
    config.validate()?;
    positions.aligned_with(market)?;
    if gross.len() != positions.len() {
        return Err(AnalysisError::MisalignedSeries {
            context: "gross returns vs positions",
            expected: positions.len(),
            actual: gross.len(),
        });
    }

    let ppy = config.periods_per_year;

    let (trades, annualized_turnover) = compute_turnover(positions, ppy)?;
    let costs = compute_cost_series(&trades, market, &config.cost)?;
    let net = net_returns(gross, &costs)?;

    // Direction held over period t is the weight entering it.
    let direction = expected_direction(positions);

    let gross_metrics = PerformanceMetrics::compute(gross, ppy, Some(&direction))?;
    let net_metrics = PerformanceMetrics::compute(&net, ppy, Some(&direction))?;

    let cost_drag = costs.iter().sum::<f64>() / costs.len() as f64 * ppy;

    let hit_rate_survival = match (gross_metrics.hit_rate, net_metrics.hit_rate) {
        (Some(g), Some(n)) if g > 0.0 => Some(n / g),
        _ => None,
    };
    let pnl_collapse = if gross_metrics.annualized_return.abs() > 1e-9 {
        Some(net_metrics.annualized_return / gross_metrics.annualized_return)
    } else {
        None
    };

    let break_even =
        solve_break_even_cost(gross, &trades, annualized_turnover, ppy, &config.solver)?;

    let capacity = estimate_capacity(
        config.capacity.participation_rate,
        market.avg_daily_dollar_volume(),
        daily_turnover(annualized_turnover, ppy),
        config.capacity.impact_coefficient,
    )?;

    Ok(TradabilityReport {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        periods_per_year: ppy,
        gross: gross_metrics,
        net: net_metrics,
        annualized_turnover,
        cost_drag,
        hit_rate_survival,
        pnl_collapse,
        break_even,
        capacity,
    })
}

/// Expected direction over each period: the position weight entering it
/// (zero for the first period — no position is held into it).
fn expected_direction(positions: &PositionSeries) -> Vec<f64> {
    let weights: Vec<f64> = positions.weights().collect();
    let mut direction = Vec::with_capacity(weights.len());
    direction.push(0.0);
    direction.extend_from_slice(&weights[..weights.len() - 1]);
    direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use edgelab_core::PricePoint;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    fn market(n: usize) -> PriceVolumeSeries {
        PriceVolumeSeries::new(
            (0..n)
                .map(|i| PricePoint {
                    date: start() + chrono::Duration::days(i as i64),
                    price: 100.0,
                    dollar_volume: 1e8,
                })
                .collect(),
        )
        .unwrap()
    }

    fn no_slippage_config() -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.cost.slippage_vol_coeff = 0.0;
        config.cost.slippage_volume_coeff = 0.0;
        config
    }

    #[test]
    fn report_composes_all_stages() {
        let positions =
            PositionSeries::from_weights(start(), &[0.0, 1.0, 1.0, -1.0, -1.0]).unwrap();
        let gross = [0.0, 0.01, 0.01, -0.01, -0.01];
        let report =
            run_analysis(&market(5), &positions, &gross, &no_slippage_config()).unwrap();

        assert!(report.annualized_turnover > 0.0);
        assert!(report.cost_drag > 0.0);
        // Direction lags by one period: of the three directed periods only
        // the long into the up-move at t = 2 earns; the long into the
        // down-move at t = 3 and the losing short at t = 4 miss.
        let gross_hit = report.gross.hit_rate.unwrap();
        assert!((gross_hit - 1.0 / 3.0).abs() < 1e-12);
        // Costs never flip the winning period's sign, so the hit rate
        // survives fully.
        assert_eq!(report.hit_rate_survival, Some(1.0));
        let gross_sharpe = report.gross.sharpe.unwrap();
        let net_sharpe = report.net.sharpe.unwrap();
        assert!(net_sharpe < gross_sharpe);
    }

    #[test]
    fn always_short_signal_in_a_falling_market_hits_every_period() {
        let positions =
            PositionSeries::from_weights(start(), &[-1.0, -1.0, -1.0, -1.0]).unwrap();
        // Position-signed returns: the shorts earn as the asset falls.
        let gross = [0.0, 0.02, 0.01, 0.015];
        let report =
            run_analysis(&market(4), &positions, &gross, &no_slippage_config()).unwrap();

        assert_eq!(report.gross.hit_rate, Some(1.0));
        assert_eq!(report.hit_rate_survival, Some(1.0));
    }

    #[test]
    fn misaligned_gross_is_rejected() {
        let positions = PositionSeries::from_weights(start(), &[0.0, 1.0, 1.0]).unwrap();
        let gross = [0.0, 0.01];
        assert!(matches!(
            run_analysis(&market(3), &positions, &gross, &no_slippage_config()),
            Err(AnalysisError::MisalignedSeries { .. })
        ));
    }

    #[test]
    fn flat_signal_reports_undefined_break_even_and_unbounded_capacity() {
        let positions = PositionSeries::from_weights(start(), &[0.0, 0.0, 0.0, 0.0]).unwrap();
        let gross = [0.0, 0.001, -0.001, 0.002];
        let report =
            run_analysis(&market(4), &positions, &gross, &no_slippage_config()).unwrap();

        assert_eq!(report.break_even, BreakEven::Undefined);
        assert_eq!(
            report.capacity.implied_capacity,
            edgelab_core::Capacity::Unbounded
        );
        assert_eq!(report.cost_drag, 0.0);
        // Flat signal never directs a period.
        assert_eq!(report.gross.hit_rate, None);
        assert_eq!(report.hit_rate_survival, None);
    }

    #[test]
    fn direction_lags_positions_by_one_period() {
        let positions =
            PositionSeries::from_weights(start(), &[0.0, 1.0, -1.0]).unwrap();
        assert_eq!(expected_direction(&positions), vec![0.0, 0.0, 1.0]);
    }
}
