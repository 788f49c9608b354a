//! Indexed reference data
//!
//! Joins the raw tables once into hash maps keyed by vehicle id, fuel type,
//! (year, size class) and year. All lookups return a [`DataIntegrityError`]
//! on a missing key.

use crate::{
    DataIntegrityError, DemandRecord, DistanceBucket, EmissionCap, FuelProfile, FuelType,
    IntegrityResult, SizeClass, VehicleFuelProfile, VehicleId, VehicleSpec,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// The five raw input tables, as read from storage.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub vehicles: Vec<VehicleSpec>,
    pub vehicle_fuels: Vec<VehicleFuelProfile>,
    pub fuels: Vec<FuelProfile>,
    pub demand: Vec<DemandRecord>,
    pub emission_caps: Vec<EmissionCap>,
}

/// Read-only, integrity-checked view over the reference tables.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    vehicles: BTreeMap<VehicleId, VehicleSpec>,
    vehicle_fuels: HashMap<VehicleId, VehicleFuelProfile>,
    fuels: HashMap<FuelType, FuelProfile>,
    demand: HashMap<(u32, SizeClass), f64>,
    demand_sizes: BTreeSet<SizeClass>,
    emission_caps: BTreeMap<u32, f64>,
}

impl ReferenceData {
    /// Validate the tables and build the lookup indices.
    ///
    /// Fails on negative or non-finite numbers, duplicate keys in 1:1
    /// tables, and references to vehicles or fuels that do not exist.
    pub fn new(tables: ReferenceTables) -> IntegrityResult<Self> {
        let mut vehicles = BTreeMap::new();
        for spec in tables.vehicles {
            let key = spec.vehicle_id.as_str();
            check_value("vehicle table", key, "acquisition_cost", spec.acquisition_cost)?;
            if let Some(range) = spec.yearly_range_km {
                check_value("vehicle table", key, "yearly_range_km", range)?;
            }
            if vehicles.contains_key(&spec.vehicle_id) {
                return Err(DataIntegrityError::DuplicateVehicle {
                    vehicle: spec.vehicle_id,
                    table: "vehicle table",
                });
            }
            vehicles.insert(spec.vehicle_id.clone(), spec);
        }
        if vehicles.is_empty() {
            return Err(DataIntegrityError::NoVehicles);
        }

        let mut fuels = HashMap::new();
        for fuel in tables.fuels {
            let key = fuel.fuel_type.as_str();
            check_value("fuel table", key, "cost_per_unit", fuel.cost_per_unit)?;
            check_value("fuel table", key, "emissions_per_unit", fuel.emissions_per_unit)?;
            if fuels.contains_key(&fuel.fuel_type) {
                return Err(DataIntegrityError::DuplicateFuel(fuel.fuel_type));
            }
            fuels.insert(fuel.fuel_type.clone(), fuel);
        }

        let mut vehicle_fuels = HashMap::new();
        for profile in tables.vehicle_fuels {
            check_value(
                "vehicle fuel profiles",
                profile.vehicle_id.as_str(),
                "fuel_consumption_per_km",
                profile.fuel_consumption_per_km,
            )?;
            if !vehicles.contains_key(&profile.vehicle_id) {
                return Err(DataIntegrityError::UnknownVehicle {
                    vehicle: profile.vehicle_id,
                    table: "vehicle fuel profiles",
                });
            }
            if !fuels.contains_key(&profile.fuel_type) {
                return Err(DataIntegrityError::UnknownFuel {
                    fuel: profile.fuel_type,
                    vehicle: profile.vehicle_id,
                });
            }
            if vehicle_fuels.contains_key(&profile.vehicle_id) {
                return Err(DataIntegrityError::DuplicateVehicle {
                    vehicle: profile.vehicle_id,
                    table: "vehicle fuel profiles",
                });
            }
            vehicle_fuels.insert(profile.vehicle_id.clone(), profile);
        }

        // Demand is recorded per bucket but consumed per (year, size).
        let mut seen_buckets: HashSet<(u32, SizeClass, DistanceBucket)> = HashSet::new();
        let mut demand: HashMap<(u32, SizeClass), f64> = HashMap::new();
        let mut demand_sizes = BTreeSet::new();
        for record in tables.demand {
            let key = format!(
                "{}/{}/{}",
                record.year, record.size_class, record.distance_bucket
            );
            check_value("demand table", &key, "demand_km", record.demand_km)?;
            if !seen_buckets.insert((record.year, record.size_class, record.distance_bucket)) {
                return Err(DataIntegrityError::DuplicateDemand {
                    year: record.year,
                    size: record.size_class,
                    bucket: record.distance_bucket,
                });
            }
            *demand.entry((record.year, record.size_class)).or_insert(0.0) += record.demand_km;
            demand_sizes.insert(record.size_class);
        }

        let mut emission_caps = BTreeMap::new();
        for cap in tables.emission_caps {
            check_value(
                "emission caps",
                &cap.year.to_string(),
                "max_emissions",
                cap.max_emissions,
            )?;
            if emission_caps.insert(cap.year, cap.max_emissions).is_some() {
                return Err(DataIntegrityError::DuplicateEmissionCap(cap.year));
            }
        }

        Ok(Self {
            vehicles,
            vehicle_fuels,
            fuels,
            demand,
            demand_sizes,
            emission_caps,
        })
    }

    /// Vehicle ids in ascending order.
    pub fn vehicle_ids(&self) -> impl Iterator<Item = &VehicleId> + '_ {
        self.vehicles.keys()
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    pub fn vehicle(&self, id: &VehicleId) -> IntegrityResult<&VehicleSpec> {
        self.vehicles
            .get(id)
            .ok_or_else(|| DataIntegrityError::UnknownVehicle {
                vehicle: id.clone(),
                table: "decision variables",
            })
    }

    pub fn vehicle_fuel(&self, id: &VehicleId) -> IntegrityResult<&VehicleFuelProfile> {
        self.vehicle_fuels
            .get(id)
            .ok_or_else(|| DataIntegrityError::MissingFuelProfile(id.clone()))
    }

    /// Fuel profile and fuel record of a vehicle, joined through its fuel type.
    pub fn fuel_for(&self, id: &VehicleId) -> IntegrityResult<(&VehicleFuelProfile, &FuelProfile)> {
        let profile = self.vehicle_fuel(id)?;
        let fuel = self
            .fuels
            .get(&profile.fuel_type)
            .ok_or_else(|| DataIntegrityError::UnknownFuel {
                fuel: profile.fuel_type.clone(),
                vehicle: id.clone(),
            })?;
        Ok((profile, fuel))
    }

    pub fn fuel(&self, fuel_type: &FuelType) -> Option<&FuelProfile> {
        self.fuels.get(fuel_type)
    }

    /// Demand for a (year, size class), summed over distance buckets.
    pub fn demand(&self, year: u32, size: SizeClass) -> IntegrityResult<f64> {
        self.demand
            .get(&(year, size))
            .copied()
            .ok_or(DataIntegrityError::MissingDemand { year, size })
    }

    pub fn emission_cap(&self, year: u32) -> IntegrityResult<f64> {
        self.emission_caps
            .get(&year)
            .copied()
            .ok_or(DataIntegrityError::MissingEmissionCap(year))
    }

    /// Size classes that need a demand row: those in the fleet plus those in
    /// the demand table, ascending.
    pub fn requested_size_classes(&self) -> BTreeSet<SizeClass> {
        let mut sizes = self.demand_sizes.clone();
        sizes.extend(self.vehicles.values().map(|v| v.size_class));
        sizes
    }

    /// Years whose cap is higher than the previous recorded year's cap.
    pub fn increasing_caps(&self) -> Vec<u32> {
        self.emission_caps
            .iter()
            .zip(self.emission_caps.iter().skip(1))
            .filter(|((_, prev), (_, next))| next > prev)
            .map(|(_, (year, _))| *year)
            .collect()
    }
}

fn check_value(table: &'static str, key: &str, field: &'static str, value: f64) -> IntegrityResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DataIntegrityError::InvalidValue {
            table,
            key: key.to_string(),
            field,
            value,
        })
    }
}
