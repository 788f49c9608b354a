//! Objective coefficients
//!
//! ```text
//! c(count[y][v])    = cost_v · (1 + insurance + maintenance - resale)
//! c(distance[y][v]) = fuel_cost(fuel_v) · consumption_v
//! ```
//!
//! Owning a vehicle in a year is charged as a flat per-period cost; with the
//! default rates this is 16% of the acquisition cost for every year the vehicle
//! appears in the fleet.

use super::VariableIndex;
use crate::parallel::fill_chunks;
use fleet_core::{DataIntegrityError, ReferenceData};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected cost rate configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid cost rates: {0}")]
pub struct InvalidCostRates(String);

/// Ownership cost rates as fractions of the acquisition cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CostRatesInput", into = "CostRatesInput")]
pub struct CostRates {
    insurance: f64,
    maintenance: f64,
    resale: f64,
}

/// Unvalidated form of [`CostRates`] used for (de)serialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRatesInput {
    pub insurance_rate: f64,
    pub maintenance_rate: f64,
    pub resale_rate: f64,
}

impl Default for CostRatesInput {
    fn default() -> Self {
        CostRates::default().into()
    }
}

impl CostRates {
    /// Create validated rates.
    ///
    /// All rates must be finite and non-negative, and the net ownership rate
    /// must not be negative: a vehicle that earns money by being owned makes
    /// the program unbounded.
    pub fn new(insurance: f64, maintenance: f64, resale: f64) -> Result<Self, InvalidCostRates> {
        for (name, value) in [
            ("insurance", insurance),
            ("maintenance", maintenance),
            ("resale", resale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidCostRates(format!(
                    "{name} rate must be finite and non-negative, got {value}"
                )));
            }
        }
        let rates = Self {
            insurance,
            maintenance,
            resale,
        };
        if rates.net_ownership_rate() < 0.0 {
            return Err(InvalidCostRates(format!(
                "net ownership rate {:.4} is negative",
                rates.net_ownership_rate()
            )));
        }
        Ok(rates)
    }

    pub fn insurance(&self) -> f64 {
        self.insurance
    }

    pub fn maintenance(&self) -> f64 {
        self.maintenance
    }

    pub fn resale(&self) -> f64 {
        self.resale
    }

    /// Fraction of the acquisition cost charged per vehicle-year.
    pub fn net_ownership_rate(&self) -> f64 {
        1.0 + self.insurance + self.maintenance - self.resale
    }
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            insurance: 0.05,
            maintenance: 0.01,
            resale: 0.90,
        }
    }
}

impl TryFrom<CostRatesInput> for CostRates {
    type Error = InvalidCostRates;

    fn try_from(input: CostRatesInput) -> Result<Self, Self::Error> {
        CostRates::new(input.insurance_rate, input.maintenance_rate, input.resale_rate)
    }
}

impl From<CostRates> for CostRatesInput {
    fn from(rates: CostRates) -> Self {
        Self {
            insurance_rate: rates.insurance,
            maintenance_rate: rates.maintenance,
            resale_rate: rates.resale,
        }
    }
}

/// Per-vehicle cost rates, resolved once from the reference data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleCosts {
    /// Charge per vehicle owned for one year
    pub ownership_per_vehicle: f64,
    /// Fuel cost per km driven
    pub fuel_per_km: f64,
}

/// Resolve the cost rates of every vehicle in canonical order.
pub fn vehicle_costs(
    reference: &ReferenceData,
    index: &VariableIndex,
    rates: &CostRates,
) -> Result<Vec<VehicleCosts>, DataIntegrityError> {
    index
        .vehicles()
        .iter()
        .map(|id| {
            let spec = reference.vehicle(id)?;
            let (profile, fuel) = reference.fuel_for(id)?;
            Ok(VehicleCosts {
                ownership_per_vehicle: spec.acquisition_cost * rates.net_ownership_rate(),
                fuel_per_km: fuel.cost_per_km(profile.fuel_consumption_per_km),
            })
        })
        .collect()
}

/// Build the objective coefficient vector, aligned with `index`.
pub fn objective_coefficients(
    reference: &ReferenceData,
    index: &VariableIndex,
    rates: &CostRates,
) -> Result<Vec<f64>, DataIntegrityError> {
    let costs = vehicle_costs(reference, index, rates)?;
    let mut objective = vec![0.0; index.len()];
    let (counts, distances) = objective.split_at_mut(index.family_len());

    // One chunk per year; coefficients do not vary across years.
    fill_chunks(counts, index.num_vehicles(), |_, year| {
        for (slot, cost) in year.iter_mut().zip(&costs) {
            *slot = cost.ownership_per_vehicle;
        }
    });
    fill_chunks(distances, index.num_vehicles(), |_, year| {
        for (slot, cost) in year.iter_mut().zip(&costs) {
            *slot = cost.fuel_per_km;
        }
    });

    Ok(objective)
}
