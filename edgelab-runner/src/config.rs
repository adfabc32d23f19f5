//! Serializable analysis configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use edgelab_core::{
    AnalysisError, CostConfig, SolverConfig, DEFAULT_IMPACT_COEFFICIENT,
    DEFAULT_PARTICIPATION_RATE,
};

/// Unique identifier for an analysis run (content-addressable hash).
pub type RunId = String;

/// Everything needed to reproduce one (signal, asset, cost-configuration)
/// analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Sampling frequency of the input series (252 for daily data).
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: f64,

    #[serde(default)]
    pub cost: CostConfig,

    #[serde(default)]
    pub solver: SolverConfig,

    #[serde(default)]
    pub capacity: CapacityAssumptions,
}

fn default_periods_per_year() -> f64 {
    252.0
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            periods_per_year: default_periods_per_year(),
            cost: CostConfig::default(),
            solver: SolverConfig::default(),
            capacity: CapacityAssumptions::default(),
        }
    }
}

/// Participation and impact assumptions for the capacity estimator and the
/// capacity-decay ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityAssumptions {
    /// Share of daily volume the strategy may consume.
    pub participation_rate: f64,
    /// Linear impact per unit participation.
    pub impact_coefficient: f64,
    /// Net Sharpe below which a capital level counts as non-viable in the
    /// decay ladder.
    pub sharpe_floor: f64,
}

impl Default for CapacityAssumptions {
    fn default() -> Self {
        Self {
            participation_rate: DEFAULT_PARTICIPATION_RATE,
            impact_coefficient: DEFAULT_IMPACT_COEFFICIENT,
            sharpe_floor: 0.5,
        }
    }
}

impl AnalysisConfig {
    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId, so artifacts from
    /// re-runs overwrite rather than accumulate.
    pub fn run_id(&self) -> RunId {
        let json =
            serde_json::to_string(self).expect("AnalysisConfig serialization cannot fail");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Load and validate a TOML configuration file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "periods_per_year must be positive and finite, got {}",
                self.periods_per_year
            )));
        }
        if !(self.capacity.participation_rate.is_finite()
            && self.capacity.participation_rate >= 0.0)
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "participation_rate must be non-negative and finite, got {}",
                self.capacity.participation_rate
            )));
        }
        if !(self.capacity.impact_coefficient.is_finite()
            && self.capacity.impact_coefficient >= 0.0)
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "impact_coefficient must be non-negative and finite, got {}",
                self.capacity.impact_coefficient
            )));
        }
        self.cost.validate()?;
        self.solver.validate()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] AnalysisError),
}
