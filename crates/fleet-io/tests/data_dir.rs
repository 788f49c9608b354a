use fleet_core::{DataIntegrityError, SizeClass, VehicleId};
use fleet_io::{load_reference_data, load_tables, DataFiles, IoError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_dataset(dir: &Path, vehicle_fuels: &str) {
    fs::write(
        dir.join("vehicles.csv"),
        "ID,Size,Cost ($),Yearly range (km),Distance\n\
         Diesel_S1,S1,100000,100000,D1\n\
         BEV_S1,S1,200000,100000,D2\n",
    )
    .unwrap();
    fs::write(dir.join("vehicles_fuels.csv"), vehicle_fuels).unwrap();
    fs::write(
        dir.join("fuels.csv"),
        "Fuel,Emissions (CO2/unit_fuel),Cost ($/unit_fuel)\n\
         Diesel,3.2,1.2\n\
         Electricity,0,0.25\n",
    )
    .unwrap();
    fs::write(
        dir.join("demand.csv"),
        "Year,Size,Distance,Demand (km)\n\
         2030,S1,D1,60000\n\
         2030,S1,D2,40000\n",
    )
    .unwrap();
    fs::write(
        dir.join("carbon_emissions.csv"),
        "Year,Total Carbon emission limit\n2030,48000\n",
    )
    .unwrap();
}

const FUELS: &str = "ID,Fuel,Fuel Consumption (unit_fuel/km)\n\
                     Diesel_S1,Diesel,0.3\n\
                     BEV_S1,Electricity,1.6\n";

#[test]
fn test_load_dataset_with_original_headers() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), FUELS);

    let reference = load_reference_data(dir.path(), &DataFiles::default()).unwrap();
    assert_eq!(reference.num_vehicles(), 2);
    assert_eq!(reference.demand(2030, SizeClass::S1).unwrap(), 100_000.0);
    assert_eq!(reference.emission_cap(2030).unwrap(), 48_000.0);
    let (profile, fuel) = reference.fuel_for(&VehicleId::new("BEV_S1")).unwrap();
    assert_eq!(profile.fuel_consumption_per_km, 1.6);
    assert_eq!(fuel.cost_per_unit, 0.25);
}

#[test]
fn test_dangling_vehicle_reference_is_integrity_error() {
    let dir = TempDir::new().unwrap();
    write_dataset(
        dir.path(),
        "ID,Fuel,Fuel Consumption (unit_fuel/km)\n\
         Diesel_S1,Diesel,0.3\n\
         BEV_S1,Electricity,1.6\n\
         H2_S1,Electricity,1.0\n",
    );

    let err = load_reference_data(dir.path(), &DataFiles::default()).unwrap_err();
    assert!(matches!(
        err,
        IoError::Integrity(DataIntegrityError::UnknownVehicle { .. })
    ));
}

#[test]
fn test_custom_file_names() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), FUELS);
    fs::rename(dir.path().join("demand.csv"), dir.path().join("Demand.csv")).unwrap();

    let files = DataFiles {
        demand: "Demand.csv".into(),
        ..DataFiles::default()
    };
    let tables = load_tables(dir.path(), &files).unwrap();
    assert_eq!(tables.demand.len(), 2);

    let err = load_tables(dir.path(), &DataFiles::default()).unwrap_err();
    assert!(err.to_string().contains("demand.csv"));
}
