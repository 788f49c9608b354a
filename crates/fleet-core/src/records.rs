//! Reference table rows.
//!
//! Field aliases accept the column headers used by the public fleet
//! decarbonization dataset as well as the snake_case schema.

use crate::{DistanceBucket, FuelType, SizeClass, VehicleId};
use serde::{Deserialize, Serialize};

/// Acquisition attributes of one vehicle type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    #[serde(alias = "ID")]
    pub vehicle_id: VehicleId,
    /// Purchase price in currency units
    #[serde(alias = "Cost ($)", alias = "Cost")]
    pub acquisition_cost: f64,
    #[serde(alias = "Size")]
    pub size_class: SizeClass,
    #[serde(alias = "Distance")]
    pub distance_bucket: DistanceBucket,
    /// Maximum distance one vehicle covers per year (km), if known
    #[serde(default, alias = "Yearly range (km)")]
    pub yearly_range_km: Option<f64>,
}

impl VehicleSpec {
    pub fn new(
        vehicle_id: impl Into<String>,
        acquisition_cost: f64,
        size_class: SizeClass,
        distance_bucket: DistanceBucket,
    ) -> Self {
        Self {
            vehicle_id: VehicleId::new(vehicle_id),
            acquisition_cost,
            size_class,
            distance_bucket,
            yearly_range_km: None,
        }
    }

    pub fn with_yearly_range(mut self, km: f64) -> Self {
        self.yearly_range_km = Some(km);
        self
    }
}

/// Fuel used by a vehicle type and its consumption rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFuelProfile {
    #[serde(alias = "ID")]
    pub vehicle_id: VehicleId,
    #[serde(alias = "Fuel")]
    pub fuel_type: FuelType,
    /// Fuel units per km
    #[serde(
        alias = "Fuel Consumption (unit_fuel/km)",
        alias = "Consumption (unit_fuel/km)"
    )]
    pub fuel_consumption_per_km: f64,
}

impl VehicleFuelProfile {
    pub fn new(
        vehicle_id: impl Into<String>,
        fuel_type: impl Into<String>,
        fuel_consumption_per_km: f64,
    ) -> Self {
        Self {
            vehicle_id: VehicleId::new(vehicle_id),
            fuel_type: FuelType::new(fuel_type),
            fuel_consumption_per_km,
        }
    }
}

/// Unit cost and emission factor of a fuel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelProfile {
    #[serde(alias = "Fuel")]
    pub fuel_type: FuelType,
    #[serde(alias = "Cost ($/unit_fuel)", alias = "Cost")]
    pub cost_per_unit: f64,
    /// Mass of CO2 equivalent per fuel unit
    #[serde(alias = "Emissions (CO2/unit_fuel)")]
    pub emissions_per_unit: f64,
}

impl FuelProfile {
    pub fn new(fuel_type: impl Into<String>, cost_per_unit: f64, emissions_per_unit: f64) -> Self {
        Self {
            fuel_type: FuelType::new(fuel_type),
            cost_per_unit,
            emissions_per_unit,
        }
    }

    /// Fuel cost of driving one km at the given consumption.
    pub fn cost_per_km(&self, consumption_per_km: f64) -> f64 {
        self.cost_per_unit * consumption_per_km
    }

    /// Emissions of driving one km at the given consumption.
    pub fn emissions_per_km(&self, consumption_per_km: f64) -> f64 {
        self.emissions_per_unit * consumption_per_km
    }
}

/// Required distance for one (year, size class, distance bucket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    #[serde(alias = "Year")]
    pub year: u32,
    #[serde(alias = "Size")]
    pub size_class: SizeClass,
    #[serde(alias = "Distance")]
    pub distance_bucket: DistanceBucket,
    #[serde(alias = "Demand (km)", alias = "Demand")]
    pub demand_km: f64,
}

impl DemandRecord {
    pub fn new(
        year: u32,
        size_class: SizeClass,
        distance_bucket: DistanceBucket,
        demand_km: f64,
    ) -> Self {
        Self {
            year,
            size_class,
            distance_bucket,
            demand_km,
        }
    }
}

/// Fleet-wide emission ceiling for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionCap {
    #[serde(alias = "Year")]
    pub year: u32,
    #[serde(
        alias = "Total Carbon emission limit",
        alias = "Carbon emission CO2/kg"
    )]
    pub max_emissions: f64,
}

impl EmissionCap {
    pub fn new(year: u32, max_emissions: f64) -> Self {
        Self {
            year,
            max_emissions,
        }
    }
}
