//! EdgeLab Runner — orchestration on top of `edgelab-core`.
//!
//! This crate turns the pure engine into a usable analysis workflow:
//! - CSV ingestion of market and position series, with derived gross returns
//! - One-call tradability report per (signal, asset, cost-configuration)
//! - Cost-sensitivity sweep and capacity-decay ladder (rayon-parallel grids)
//! - TOML configuration with a content-addressed run id
//! - JSON/CSV artifact export with schema versioning

pub mod analysis;
pub mod capacity_decay;
pub mod config;
pub mod export;
pub mod loader;
pub mod sweep;

pub use analysis::{run_analysis, TradabilityReport, SCHEMA_VERSION};
pub use capacity_decay::{
    max_viable_capital, simulate_capacity_decay, CapacityLadder, CapacityLevelPoint,
};
pub use config::{AnalysisConfig, CapacityAssumptions, ConfigError, RunId};
pub use export::{
    export_capacity_curve_csv, export_cost_curve_csv, export_report_json, import_report_json,
    save_report,
};
pub use loader::{load_market_csv, load_positions_csv, load_series, LoadError, LoadedSeries};
pub use sweep::{cost_sensitivity, CostGrid, CostLevelPoint};
