//! Independent re-check of a solved plan against the reference data.

use super::{FleetPlan, ModelOptions};
use fleet_core::{ReferenceData, SizeClass, VehicleId};
use std::collections::HashMap;
use std::fmt;

/// Broken property of a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanViolation {
    NegativeValue {
        year: u32,
        vehicle: VehicleId,
        count: f64,
        distance_km: f64,
    },
    DemandShortfall {
        year: u32,
        size: SizeClass,
        demand_km: f64,
        covered_km: f64,
    },
    EmissionExcess {
        year: u32,
        cap: f64,
        emissions: f64,
    },
    /// Distance beyond what the owned vehicles can drive
    UtilizationExcess {
        year: u32,
        vehicle: VehicleId,
        distance_km: f64,
        capacity_km: f64,
    },
    /// Vehicle or year absent from the reference data
    UnknownReference(String),
}

impl fmt::Display for PlanViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanViolation::NegativeValue {
                year,
                vehicle,
                count,
                distance_km,
            } => write!(
                f,
                "{year} {vehicle}: negative value (count {count}, distance {distance_km})"
            ),
            PlanViolation::DemandShortfall {
                year,
                size,
                demand_km,
                covered_km,
            } => write!(
                f,
                "{year} {size}: covered {covered_km:.3} km of {demand_km:.3} km demand"
            ),
            PlanViolation::EmissionExcess { year, cap, emissions } => {
                write!(f, "{year}: emissions {emissions:.3} exceed cap {cap:.3}")
            }
            PlanViolation::UtilizationExcess {
                year,
                vehicle,
                distance_km,
                capacity_km,
            } => write!(
                f,
                "{year} {vehicle}: drives {distance_km:.3} km with capacity for {capacity_km:.3} km"
            ),
            PlanViolation::UnknownReference(what) => write!(f, "unknown reference: {what}"),
        }
    }
}

/// Check non-negativity, demand coverage, emission caps and, when `options`
/// enable them, the utilization limits.
///
/// Comparisons are relative: a row is violated when it misses its bound by
/// more than `tolerance * max(1, |bound|)`.
pub fn verify_plan(
    plan: &FleetPlan,
    reference: &ReferenceData,
    options: &ModelOptions,
    tolerance: f64,
) -> Vec<PlanViolation> {
    let mut violations = Vec::new();
    let mut covered: HashMap<(u32, SizeClass), f64> = HashMap::new();
    let mut emissions: HashMap<u32, f64> = HashMap::new();

    for row in &plan.resolved {
        if row.count < 0.0 || row.distance_km < 0.0 {
            violations.push(PlanViolation::NegativeValue {
                year: row.year,
                vehicle: row.vehicle_id.clone(),
                count: row.count,
                distance_km: row.distance_km,
            });
        }
        let (spec, (profile, fuel)) = match (
            reference.vehicle(&row.vehicle_id),
            reference.fuel_for(&row.vehicle_id),
        ) {
            (Ok(spec), Ok(fuel)) => (spec, fuel),
            (Err(err), _) | (_, Err(err)) => {
                violations.push(PlanViolation::UnknownReference(err.to_string()));
                continue;
            }
        };
        if let (true, Some(range)) = (options.utilization_limits, spec.yearly_range_km) {
            let capacity_km = range * row.count;
            if row.distance_km > capacity_km + slack(tolerance, capacity_km) {
                violations.push(PlanViolation::UtilizationExcess {
                    year: row.year,
                    vehicle: row.vehicle_id.clone(),
                    distance_km: row.distance_km,
                    capacity_km,
                });
            }
        }
        *covered.entry((row.year, spec.size_class)).or_default() += row.distance_km;
        *emissions.entry(row.year).or_default() +=
            fuel.emissions_per_km(profile.fuel_consumption_per_km) * row.distance_km;
    }

    let sizes = reference.requested_size_classes();
    for summary in &plan.years {
        let year = summary.year;
        for &size in &sizes {
            match reference.demand(year, size) {
                Ok(demand_km) => {
                    let covered_km = covered.get(&(year, size)).copied().unwrap_or(0.0);
                    if covered_km < demand_km - slack(tolerance, demand_km) {
                        violations.push(PlanViolation::DemandShortfall {
                            year,
                            size,
                            demand_km,
                            covered_km,
                        });
                    }
                }
                Err(err) => violations.push(PlanViolation::UnknownReference(err.to_string())),
            }
        }
        match reference.emission_cap(year) {
            Ok(cap) => {
                let total = emissions.get(&year).copied().unwrap_or(0.0);
                if total > cap + slack(tolerance, cap) {
                    violations.push(PlanViolation::EmissionExcess {
                        year,
                        cap,
                        emissions: total,
                    });
                }
            }
            Err(err) => violations.push(PlanViolation::UnknownReference(err.to_string())),
        }
    }

    violations
}

fn slack(tolerance: f64, bound: f64) -> f64 {
    tolerance * bound.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{FleetPlan, ResolvedVehicleYear, YearSummary};
    use crate::test_utils::two_vehicle_reference;
    use std::time::Duration;

    fn plan_with(diesel_km: f64, bev_km: f64) -> FleetPlan {
        plan_with_counts(1.0, diesel_km, bev_km)
    }

    fn plan_with_counts(diesel_count: f64, diesel_km: f64, bev_km: f64) -> FleetPlan {
        let row = |id: &str, count: f64, distance_km: f64| ResolvedVehicleYear {
            year: 2030,
            vehicle_id: VehicleId::new(id),
            count,
            distance_km,
        };
        FleetPlan {
            entries: vec![],
            resolved: vec![
                row("BEV_S1", 1.0, bev_km),
                row("Diesel_S1", diesel_count, diesel_km),
            ],
            years: vec![YearSummary {
                year: 2030,
                vehicles_owned: 2.0,
                ownership_cost: 0.0,
                fuel_cost: 0.0,
                emissions: 0.0,
                emission_cap: 0.0,
                coverage: vec![],
            }],
            objective: 0.0,
            solver: "test".into(),
            solve_time: Duration::ZERO,
        }
    }

    #[test]
    fn test_feasible_plan_has_no_violations() {
        let reference = two_vehicle_reference(100_000.0, 48_000.0);
        let plan = plan_with(50_000.0, 50_000.0);
        assert!(verify_plan(&plan, &reference, &ModelOptions::default(), 1e-6).is_empty());
    }

    #[test]
    fn test_shortfall_and_excess_are_reported() {
        let reference = two_vehicle_reference(100_000.0, 48_000.0);
        let plan = plan_with(90_000.0, 0.0);
        let violations = verify_plan(&plan, &reference, &ModelOptions::default(), 1e-6);
        assert_eq!(violations.len(), 2);
        assert!(matches!(violations[0], PlanViolation::DemandShortfall { .. }));
        assert!(matches!(violations[1], PlanViolation::EmissionExcess { .. }));
        assert!(violations[1].to_string().contains("exceed cap"));
    }

    #[test]
    fn test_negative_values_are_reported() {
        let reference = two_vehicle_reference(100_000.0, 1e9);
        let plan = plan_with(100_000.0, -1.0);
        let violations = verify_plan(&plan, &reference, &ModelOptions::default(), 1e-6);
        assert!(violations
            .iter()
            .any(|v| matches!(v, PlanViolation::NegativeValue { .. })));
    }

    #[test]
    fn test_distance_beyond_owned_capacity_is_reported() {
        let reference = two_vehicle_reference(100_000.0, 1e9);
        let plan = plan_with_counts(0.5, 100_000.0, 0.0);

        let violations = verify_plan(&plan, &reference, &ModelOptions::default(), 1e-6);
        assert_eq!(violations.len(), 1);
        match &violations[0] {
            PlanViolation::UtilizationExcess {
                vehicle,
                capacity_km,
                ..
            } => {
                assert_eq!(vehicle.as_str(), "Diesel_S1");
                assert_eq!(*capacity_km, 50_000.0);
            }
            other => panic!("unexpected violation {other}"),
        }

        let unlimited = ModelOptions {
            utilization_limits: false,
            ..ModelOptions::default()
        };
        assert!(verify_plan(&plan, &reference, &unlimited, 1e-6).is_empty());
    }
}
