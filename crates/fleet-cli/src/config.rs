//! `fleet.toml` configuration
//!
//! ```toml
//! [horizon]
//! start_year = 2023
//! end_year = 2038
//!
//! [costs]
//! insurance_rate = 0.05
//! maintenance_rate = 0.01
//! resale_rate = 0.90
//!
//! [model]
//! utilization_limits = true
//! zero_tolerance = 1e-3
//! distance_tolerance_km = 0.1
//!
//! [solver]
//! backend = "clarabel"
//!
//! [data]
//! vehicles = "vehicles.csv"
//! ```
//!
//! Every section and key is optional.

use anyhow::{bail, Context, Result};
use fleet_algo::{CostRates, FleetSolverConfig, LpSolverKind, ModelOptions, ZeroTolerance};
use fleet_core::Horizon;
use fleet_io::DataFiles;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FleetConfig {
    #[serde(default)]
    pub horizon: HorizonConfig,
    #[serde(default)]
    pub costs: CostRates,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub data: DataFiles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonConfig {
    #[serde(default = "default_start_year")]
    pub start_year: u32,
    #[serde(default = "default_end_year")]
    pub end_year: u32,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
        }
    }
}

fn default_start_year() -> u32 {
    Horizon::default().start()
}

fn default_end_year() -> u32 {
    Horizon::default().end()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Bound driven distance by owned capacity
    #[serde(default = "default_utilization_limits")]
    pub utilization_limits: bool,
    /// Resolved vehicle counts this close to zero are reported as zero
    #[serde(default = "default_zero_tolerance")]
    pub zero_tolerance: f64,
    /// Resolved distances this close to zero are reported as zero
    #[serde(default = "default_distance_tolerance_km")]
    pub distance_tolerance_km: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            utilization_limits: default_utilization_limits(),
            zero_tolerance: default_zero_tolerance(),
            distance_tolerance_km: default_distance_tolerance_km(),
        }
    }
}

fn default_utilization_limits() -> bool {
    true
}

fn default_zero_tolerance() -> f64 {
    ZeroTolerance::default().count
}

fn default_distance_tolerance_km() -> f64 {
    ZeroTolerance::default().distance_km
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// LP backend name
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

fn default_backend() -> String {
    LpSolverKind::default().as_str().to_string()
}

impl FleetConfig {
    /// Load `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn horizon(&self) -> Result<Horizon> {
        Ok(Horizon::new(self.horizon.start_year, self.horizon.end_year)?)
    }

    /// Validated solver run configuration.
    pub fn solver_config(&self) -> Result<FleetSolverConfig> {
        for (name, value) in [
            ("zero_tolerance", self.model.zero_tolerance),
            ("distance_tolerance_km", self.model.distance_tolerance_km),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} must be a finite non-negative number, got {value}");
            }
        }
        Ok(FleetSolverConfig::default()
            .with_horizon(self.horizon()?)
            .with_model(ModelOptions {
                rates: self.costs,
                utilization_limits: self.model.utilization_limits,
            })
            .with_solver(self.solver.backend.parse()?)
            .with_zero_tolerance(ZeroTolerance {
                count: self.model.zero_tolerance,
                distance_km: self.model.distance_tolerance_km,
            }))
    }
}
