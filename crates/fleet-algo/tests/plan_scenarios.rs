//! End-to-end planning scenarios solved with the built-in Clarabel backend.

use fleet_algo::test_utils::{two_vehicle_reference, two_vehicle_tables};
use fleet_algo::{
    solve_fleet, verify_plan, Activity, FleetSolverConfig, ModelOptions, PlanError,
};
use fleet_core::{
    DataIntegrityError, DemandRecord, DistanceBucket, EmissionCap, Horizon, ReferenceData, SizeClass,
    VehicleId,
};

fn config() -> FleetSolverConfig {
    FleetSolverConfig::default().with_horizon(Horizon::single(2030))
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-4 * expected.abs().max(1.0)
}

#[test]
fn test_loose_cap_uses_only_the_cheaper_vehicle() {
    let reference = two_vehicle_reference(100_000.0, 1e9);
    let plan = solve_fleet(&reference, &config()).expect("loose cap is feasible");

    assert_eq!(plan.entries.len(), 1);
    let entry = &plan.entries[0];
    assert_eq!(entry.vehicle_id, VehicleId::new("Diesel_S1"));
    assert_eq!(entry.activity, Activity::Use);
    assert!(close(entry.vehicle_count, 1.0), "count {}", entry.vehicle_count);
    assert!(close(entry.distance_per_vehicle_km, 100_000.0));

    let bev = plan.resolved_for(2030, &VehicleId::new("BEV_S1")).unwrap();
    assert_eq!(bev.count, 0.0);
    assert!(bev.distance_km < 1.0, "bev distance {}", bev.distance_km);

    // 0.16 * 100 000 + 0.36 * 100 000
    assert!(close(plan.objective, 52_000.0), "objective {}", plan.objective);
    assert!(verify_plan(&plan, &reference, &ModelOptions::default(), 1e-6).is_empty());
}

#[test]
fn test_small_demand_keeps_fractional_fleet() {
    // 50 km needs 1/2000 of a vehicle with a 100 000 km range.
    let reference = two_vehicle_reference(50.0, 1e9);
    let plan = solve_fleet(&reference, &config()).expect("small demand is feasible");

    assert_eq!(plan.entries_for(2030).count(), 1, "{:?}", plan.entries);
    let entry = &plan.entries[0];
    assert_eq!(entry.vehicle_id, VehicleId::new("Diesel_S1"));
    assert_eq!(entry.activity, Activity::Use);
    assert!(
        (entry.vehicle_count * 2_000.0 - 1.0).abs() < 1e-3,
        "count {}",
        entry.vehicle_count
    );
    assert!(
        (entry.distance_per_vehicle_km - 100_000.0).abs() < 1_000.0,
        "km per vehicle {}",
        entry.distance_per_vehicle_km
    );
    assert!(plan.years[0].vehicles_owned > 0.0);
    assert!(verify_plan(&plan, &reference, &ModelOptions::default(), 1e-4).is_empty());
}

#[test]
fn test_tight_cap_shifts_distance_to_low_emission_vehicle() {
    let reference = two_vehicle_reference(100_000.0, 48_000.0);
    let plan = solve_fleet(&reference, &config()).expect("tight cap is feasible");

    let diesel = plan.resolved_for(2030, &VehicleId::new("Diesel_S1")).unwrap();
    let bev = plan.resolved_for(2030, &VehicleId::new("BEV_S1")).unwrap();
    assert!(close(diesel.distance_km, 50_000.0), "diesel {}", diesel.distance_km);
    assert!(close(bev.distance_km, 50_000.0), "bev {}", bev.distance_km);

    let year = &plan.years[0];
    assert!(close(year.emissions, 48_000.0), "emissions {}", year.emissions);
    assert!(close(plan.objective, 62_000.0), "objective {}", plan.objective);
    assert!(verify_plan(&plan, &reference, &ModelOptions::default(), 1e-6).is_empty());
}

#[test]
fn test_zero_cap_forces_electric_fleet() {
    let reference = two_vehicle_reference(100_000.0, 0.0);
    let plan = solve_fleet(&reference, &config()).unwrap();

    assert_eq!(plan.entries.len(), 1);
    assert_eq!(plan.entries[0].vehicle_id, VehicleId::new("BEV_S1"));
    assert_eq!(plan.entries[0].fuel_type.as_str(), "Electricity");
    assert_eq!(plan.entries[0].distance_bucket, DistanceBucket::D2);
}

#[test]
fn test_missing_demand_fails_before_solving() {
    let reference = two_vehicle_reference(100_000.0, 1e9);
    let config = FleetSolverConfig::default().with_horizon(Horizon::new(2030, 2031).unwrap());
    assert_eq!(
        solve_fleet(&reference, &config).unwrap_err(),
        PlanError::DataIntegrity(DataIntegrityError::MissingDemand {
            year: 2031,
            size: SizeClass::S1
        })
    );
}

#[test]
fn test_without_utilization_rows_no_vehicle_is_owned() {
    let reference = two_vehicle_reference(100_000.0, 1e9);
    let config = config().with_model(ModelOptions {
        utilization_limits: false,
        ..ModelOptions::default()
    });
    let plan = solve_fleet(&reference, &config).unwrap();

    assert!(plan.entries.is_empty());
    assert!(close(plan.years[0].coverage[0].covered_km, 100_000.0));
    assert!(close(plan.objective, 36_000.0), "objective {}", plan.objective);
}

#[test]
fn test_cap_no_fleet_can_meet_is_infeasible() {
    // 100 km of demand with no vehicle able to drive without emitting.
    let mut tables = two_vehicle_tables(100.0, 1.0);
    tables.vehicles.retain(|v| v.vehicle_id.as_str() == "Diesel_S1");
    tables.vehicle_fuels.retain(|p| p.vehicle_id.as_str() == "Diesel_S1");
    let reference = ReferenceData::new(tables).unwrap();

    let err = solve_fleet(&reference, &config()).unwrap_err();
    assert_eq!(err.kind(), "infeasible", "{err}");
}

#[test]
fn test_multi_year_plan_follows_shrinking_caps() {
    let mut tables = two_vehicle_tables(100_000.0, 1e9);
    tables.demand.push(DemandRecord::new(
        2031,
        SizeClass::S1,
        DistanceBucket::D1,
        100_000.0,
    ));
    tables.emission_caps.push(EmissionCap::new(2031, 48_000.0));
    let reference = ReferenceData::new(tables).unwrap();

    let config = FleetSolverConfig::default().with_horizon(Horizon::new(2030, 2031).unwrap());
    let plan = solve_fleet(&reference, &config).unwrap();

    assert_eq!(plan.years.len(), 2);
    assert_eq!(plan.entries_for(2030).count(), 1);
    assert_eq!(plan.entries_for(2031).count(), 2);
    assert!(close(plan.objective, 52_000.0 + 62_000.0), "objective {}", plan.objective);
    // Entries are in canonical order: years, then vehicle ids.
    let order: Vec<(u32, &str)> = plan
        .entries
        .iter()
        .map(|e| (e.year, e.vehicle_id.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![(2030, "Diesel_S1"), (2031, "BEV_S1"), (2031, "Diesel_S1")]
    );
}
