//! Map a primal vector back onto the plan.
//!
//! Counts and distances are in different units, so each family has its own
//! noise level in [`ZeroTolerance`]. A value that is not finite or materially
//! negative means the oracle broke its contract and is reported as a numerical
//! solver failure.

use super::{
    Activity, ConstraintKind, FleetPlan, FleetPlanEntry, LinearProgram, OracleSolution,
    ResolvedVehicleYear, SizeCoverage, VariableFamily, YearSummary,
};
use crate::error::{PlanError, PlanResult};
use fleet_core::ReferenceData;
use std::collections::HashSet;
use std::time::Duration;

/// Magnitudes at or below which resolved values are solver noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroTolerance {
    /// Vehicles
    pub count: f64,
    pub distance_km: f64,
}

impl Default for ZeroTolerance {
    fn default() -> Self {
        Self {
            count: 1e-3,
            distance_km: 0.1,
        }
    }
}

/// Snap solver noise and reject values no feasible plan can hold.
///
/// Distances snap to zero at `tolerance.distance_km`. A count snaps at
/// `tolerance.count` unless a utilization row ties it to a distance that is
/// still positive: that count is the fleet doing the driving and is kept
/// however small it is.
pub fn resolve_values(
    program: &LinearProgram,
    raw: &[f64],
    tolerance: ZeroTolerance,
) -> PlanResult<Vec<f64>> {
    let index = program.index();
    if raw.len() != index.len() {
        return Err(PlanError::SolverInternal {
            kind: super::SolverFailureKind::Other,
            message: format!("solver returned {} values for {} variables", raw.len(), index.len()),
        });
    }

    let family_len = index.family_len();
    let mut values = Vec::with_capacity(raw.len());
    for (position, &value) in raw.iter().enumerate() {
        let noise = if position < family_len {
            tolerance.count
        } else {
            tolerance.distance_km
        };
        if !value.is_finite() {
            return Err(PlanError::numerical(format!(
                "variable {position} resolved to non-finite value {value}"
            )));
        }
        if value < -noise {
            return Err(PlanError::numerical(format!(
                "variable {position} resolved to negative value {value}"
            )));
        }
        values.push(if value <= noise { 0.0 } else { value });
    }

    let linked = linked_counts(program);
    for y in 0..index.num_years() {
        for v in 0..index.num_vehicles() {
            let count = index.count_at(y, v);
            if values[count] == 0.0 && linked.contains(&count) {
                let raw_count = raw[count];
                if values[index.distance_at(y, v)] > 0.0 && raw_count > 0.0 {
                    values[count] = raw_count;
                }
            }
        }
    }
    Ok(values)
}

/// Count positions that appear in a utilization row.
fn linked_counts(program: &LinearProgram) -> HashSet<usize> {
    let index = program.index();
    program
        .constraints()
        .rows()
        .iter()
        .filter_map(|row| match &row.kind {
            ConstraintKind::Utilization { year, vehicle } => {
                index.position(VariableFamily::Count, *year, vehicle)
            }
            _ => None,
        })
        .collect()
}

/// Build the plan from an oracle solution.
pub fn extract_plan(
    program: &LinearProgram,
    reference: &ReferenceData,
    solution: &OracleSolution,
    tolerance: ZeroTolerance,
    solver: &str,
    solve_time: Duration,
) -> PlanResult<FleetPlan> {
    let index = program.index();
    let values = resolve_values(program, &solution.values, tolerance)?;
    let objective = program.objective();
    let sizes = reference.requested_size_classes();

    let mut entries = Vec::new();
    let mut resolved = Vec::with_capacity(index.family_len());
    let mut years = Vec::with_capacity(index.num_years());

    for (y, year) in index.horizon().years().enumerate() {
        let mut summary = YearSummary {
            year,
            vehicles_owned: 0.0,
            ownership_cost: 0.0,
            fuel_cost: 0.0,
            emissions: 0.0,
            emission_cap: reference.emission_cap(year)?,
            coverage: Vec::with_capacity(sizes.len()),
        };
        for &size in &sizes {
            summary.coverage.push(SizeCoverage {
                size_class: size,
                demand_km: reference.demand(year, size)?,
                covered_km: 0.0,
            });
        }

        for (v, id) in index.vehicles().iter().enumerate() {
            let count_pos = index.count_at(y, v);
            let distance_pos = index.distance_at(y, v);
            let count = values[count_pos];
            let distance = values[distance_pos];

            let spec = reference.vehicle(id)?;
            let (profile, fuel) = reference.fuel_for(id)?;

            summary.vehicles_owned += count;
            summary.ownership_cost += objective[count_pos] * count;
            summary.fuel_cost += objective[distance_pos] * distance;
            summary.emissions += fuel.emissions_per_km(profile.fuel_consumption_per_km) * distance;
            if let Some(coverage) = summary
                .coverage
                .iter_mut()
                .find(|c| c.size_class == spec.size_class)
            {
                coverage.covered_km += distance;
            }

            resolved.push(ResolvedVehicleYear {
                year,
                vehicle_id: id.clone(),
                count,
                distance_km: distance,
            });

            if count > 0.0 {
                entries.push(FleetPlanEntry {
                    year,
                    vehicle_id: id.clone(),
                    vehicle_count: count,
                    activity: Activity::from_distance(distance),
                    fuel_type: profile.fuel_type.clone(),
                    distance_bucket: spec.distance_bucket,
                    distance_per_vehicle_km: distance / count,
                });
            }
        }
        years.push(summary);
    }

    Ok(FleetPlan {
        entries,
        resolved,
        years,
        objective: program.objective_value(&values),
        solver: solver.to_string(),
        solve_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ModelOptions, SolverFailureKind};
    use crate::test_utils::two_vehicle_reference;
    use fleet_core::{Horizon, VehicleId};

    fn program(options: &ModelOptions) -> LinearProgram {
        let reference = two_vehicle_reference(100_000.0, 1e9);
        LinearProgram::build(&reference, Horizon::single(2030), options).unwrap()
    }

    #[test]
    fn test_noise_is_snapped_and_negatives_rejected() {
        let program = program(&ModelOptions::default());
        let index = program.index();
        let diesel = index.vehicle_position(&VehicleId::new("Diesel_S1")).unwrap();
        let bev = index.vehicle_position(&VehicleId::new("BEV_S1")).unwrap();
        let tolerance = ZeroTolerance::default();

        let mut raw = vec![0.0; index.len()];
        raw[index.count_at(0, diesel)] = 2.5;
        raw[index.distance_at(0, diesel)] = 250_000.0;
        raw[index.count_at(0, bev)] = 1e-7;
        raw[index.distance_at(0, bev)] = -1e-6;
        let values = resolve_values(&program, &raw, tolerance).unwrap();
        assert_eq!(values[index.count_at(0, diesel)], 2.5);
        assert_eq!(values[index.count_at(0, bev)], 0.0);
        assert_eq!(values[index.distance_at(0, bev)], 0.0);

        raw[index.count_at(0, diesel)] = -0.5;
        assert!(matches!(
            resolve_values(&program, &raw, tolerance),
            Err(PlanError::SolverInternal {
                kind: SolverFailureKind::Numerical,
                ..
            })
        ));
        raw[index.count_at(0, diesel)] = f64::NAN;
        assert!(resolve_values(&program, &raw, tolerance).is_err());
        assert!(resolve_values(&program, &[1.0], tolerance).is_err());
    }

    #[test]
    fn test_small_working_fleet_is_kept() {
        let program = program(&ModelOptions::default());
        let index = program.index();
        let diesel = index.vehicle_position(&VehicleId::new("Diesel_S1")).unwrap();

        // 50 km on a vehicle with a 100 000 km range
        let mut raw = vec![0.0; index.len()];
        raw[index.count_at(0, diesel)] = 5e-4;
        raw[index.distance_at(0, diesel)] = 50.0;
        let values = resolve_values(&program, &raw, ZeroTolerance::default()).unwrap();
        assert_eq!(values[index.count_at(0, diesel)], 5e-4);
        assert_eq!(values[index.distance_at(0, diesel)], 50.0);
    }

    #[test]
    fn test_unlinked_count_noise_is_snapped() {
        let program = program(&ModelOptions {
            utilization_limits: false,
            ..ModelOptions::default()
        });
        let index = program.index();
        let diesel = index.vehicle_position(&VehicleId::new("Diesel_S1")).unwrap();

        let mut raw = vec![0.0; index.len()];
        raw[index.count_at(0, diesel)] = 5e-4;
        raw[index.distance_at(0, diesel)] = 100_000.0;
        let values = resolve_values(&program, &raw, ZeroTolerance::default()).unwrap();
        assert_eq!(values[index.count_at(0, diesel)], 0.0);
    }

    #[test]
    fn test_entries_only_for_positive_counts() {
        let reference = two_vehicle_reference(100_000.0, 1e9);
        let program =
            LinearProgram::build(&reference, Horizon::single(2030), &ModelOptions::default())
                .unwrap();
        let index = program.index();
        let diesel = index.vehicle_position(&VehicleId::new("Diesel_S1")).unwrap();
        let bev = index.vehicle_position(&VehicleId::new("BEV_S1")).unwrap();

        let mut values = vec![0.0; index.len()];
        values[index.count_at(0, diesel)] = 2.0;
        values[index.distance_at(0, diesel)] = 100_000.0;
        values[index.count_at(0, bev)] = 1e-6;
        let solution = OracleSolution {
            objective: program.objective_value(&values),
            values,
        };

        let plan = extract_plan(
            &program,
            &reference,
            &solution,
            ZeroTolerance::default(),
            "test",
            Duration::ZERO,
        )
        .unwrap();
        assert_eq!(plan.entries.len(), 1);
        let entry = &plan.entries[0];
        assert_eq!(entry.vehicle_id.as_str(), "Diesel_S1");
        assert_eq!(entry.activity, Activity::Use);
        assert_eq!(entry.fuel_type.as_str(), "Diesel");
        assert_eq!(entry.distance_per_vehicle_km, 50_000.0);
        assert_eq!(plan.resolved.len(), 2);

        let year = &plan.years[0];
        assert!((year.ownership_cost - 32_000.0).abs() < 1e-6);
        assert!((year.fuel_cost - 36_000.0).abs() < 1e-6);
        assert!((year.emissions - 96_000.0).abs() < 1e-6);
        assert_eq!(year.coverage[0].covered_km, 100_000.0);
        assert!((plan.objective - 68_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_owned_but_idle_vehicle_is_labelled_buy() {
        let reference = two_vehicle_reference(100_000.0, 1e9);
        let program =
            LinearProgram::build(&reference, Horizon::single(2030), &ModelOptions::default())
                .unwrap();
        let index = program.index();
        let bev = index.vehicle_position(&VehicleId::new("BEV_S1")).unwrap();

        let mut values = vec![0.0; index.len()];
        values[index.count_at(0, bev)] = 1.0;
        let solution = OracleSolution {
            objective: 0.0,
            values,
        };
        let plan = extract_plan(
            &program,
            &reference,
            &solution,
            ZeroTolerance::default(),
            "test",
            Duration::ZERO,
        )
        .unwrap();
        assert_eq!(plan.entries[0].activity, Activity::Buy);
        assert_eq!(plan.entries[0].distance_per_vehicle_km, 0.0);
    }
}
