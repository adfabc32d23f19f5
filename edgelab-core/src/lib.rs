//! EdgeLab Core — cost-adjusted performance and capacity analysis engine.
//!
//! Given a signal's position sequence on an asset and a cost configuration,
//! this crate answers: at what cost level does the signal's statistical edge
//! stop being an economic edge, and at what capital level does market impact
//! destroy it?
//!
//! One analysis pass composes six stages, leaf-first:
//! - Turnover accounting (position deltas → annualized turnover)
//! - Cost model (trade series + friction parameters → cost series)
//! - Return composition (gross − cost → net)
//! - Performance metrics (returns → Sharpe, hit rate, drawdown)
//! - Break-even cost solver (bisection for zero net Sharpe)
//! - Capacity estimator (participation × volume → deployable capital)
//!
//! Every stage is a pure, deterministic function over immutable value
//! series: no shared state, no I/O, no clock. Independent analyses are
//! embarrassingly parallel; within one pass the stages are sequentially
//! dependent and run in the order above.

pub mod break_even;
pub mod capacity;
pub mod cost;
pub mod error;
pub mod metrics;
pub mod returns;
pub mod series;
pub mod turnover;
pub mod volatility;

pub use break_even::{solve_break_even_cost, BreakEven, SolverConfig};
pub use capacity::{
    estimate_capacity, Capacity, CapacityEstimate, DEFAULT_IMPACT_COEFFICIENT,
    DEFAULT_PARTICIPATION_RATE,
};
pub use cost::{compute_cost_series, CostConfig};
pub use error::AnalysisError;
pub use metrics::PerformanceMetrics;
pub use returns::net_returns;
pub use series::{PositionPoint, PositionSeries, PricePoint, PriceVolumeSeries, TradeSeries};
pub use turnover::{compute_turnover, daily_turnover};
pub use volatility::{trailing_dollar_volume, trailing_volatility, DEFAULT_LOOKBACK};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    /// Analyses are distributed across worker threads by partitioning input
    /// tuples; every value object must cross thread boundaries freely.
    #[test]
    fn value_objects_are_send_sync() {
        assert_send::<PriceVolumeSeries>();
        assert_sync::<PriceVolumeSeries>();
        assert_send::<PositionSeries>();
        assert_sync::<PositionSeries>();
        assert_send::<TradeSeries>();
        assert_sync::<TradeSeries>();
    }

    #[test]
    fn result_types_are_send_sync() {
        assert_send::<PerformanceMetrics>();
        assert_sync::<PerformanceMetrics>();
        assert_send::<BreakEven>();
        assert_sync::<BreakEven>();
        assert_send::<CapacityEstimate>();
        assert_sync::<CapacityEstimate>();
        assert_send::<AnalysisError>();
        assert_sync::<AnalysisError>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<CostConfig>();
        assert_sync::<CostConfig>();
        assert_send::<SolverConfig>();
        assert_sync::<SolverConfig>();
    }
}
