//! Small reference data sets shared by unit and integration tests.

use fleet_core::{
    DemandRecord, DistanceBucket, EmissionCap, FuelProfile, ReferenceData, ReferenceTables, SizeClass,
    VehicleFuelProfile, VehicleSpec,
};

/// One year (2030), one size class (S1), a diesel and an electric vehicle.
///
/// | vehicle   | cost    | fuel        | cons/km | cost/km | CO2/km |
/// |-----------|---------|-------------|---------|---------|--------|
/// | Diesel_S1 | 100 000 | Diesel      | 0.3     | 0.36    | 0.96   |
/// | BEV_S1    | 200 000 | Electricity | 1.6     | 0.40    | 0      |
///
/// Both vehicles drive up to 100 000 km a year.
pub fn two_vehicle_tables(demand_km: f64, emission_cap: f64) -> ReferenceTables {
    ReferenceTables {
        vehicles: vec![
            VehicleSpec::new("Diesel_S1", 100_000.0, SizeClass::S1, DistanceBucket::D1)
                .with_yearly_range(100_000.0),
            VehicleSpec::new("BEV_S1", 200_000.0, SizeClass::S1, DistanceBucket::D2)
                .with_yearly_range(100_000.0),
        ],
        vehicle_fuels: vec![
            VehicleFuelProfile::new("Diesel_S1", "Diesel", 0.3),
            VehicleFuelProfile::new("BEV_S1", "Electricity", 1.6),
        ],
        fuels: vec![
            FuelProfile::new("Diesel", 1.2, 3.2),
            FuelProfile::new("Electricity", 0.25, 0.0),
        ],
        demand: vec![DemandRecord::new(2030, SizeClass::S1, DistanceBucket::D1, demand_km)],
        emission_caps: vec![EmissionCap::new(2030, emission_cap)],
    }
}

/// Validated form of [`two_vehicle_tables`].
pub fn two_vehicle_reference(demand_km: f64, emission_cap: f64) -> ReferenceData {
    ReferenceData::new(two_vehicle_tables(demand_km, emission_cap))
        .expect("two-vehicle fixture is consistent")
}
