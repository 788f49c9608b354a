//! Multi-year fleet planning
//!
//! Computes, for every year of the horizon, how many vehicles of each type to
//! own and how far to drive each, at minimum total cost, while covering the
//! transport demand of every size class and staying under the yearly carbon
//! cap.
//!
//! ## Problem Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FLEET PLANNING                                                          │
//! │  ──────────────                                                          │
//! │                                                                          │
//! │  Given:                                                                  │
//! │    • Vehicle types with costs, sizes, distance buckets, yearly ranges   │
//! │    • One fuel per vehicle type (consumption, fuel cost, emissions)      │
//! │    • Demand per (year, size class, distance bucket)                     │
//! │    • Emission cap per year                                              │
//! │                                                                          │
//! │  Decide:                                                                 │
//! │    • count[y][v]     vehicles of type v owned in year y (continuous)    │
//! │    • distance[y][v]  km driven by type v in year y (continuous)         │
//! │                                                                          │
//! │  Minimize:                                                               │
//! │    Ownership cost + Fuel cost                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## LP Formulation
//!
//! ```text
//! minimize    Σ_y Σ_v  cost_v·ρ · count[y][v]  +  fuel_v · cons_v · distance[y][v]
//!                      └──────────────────┘     └─────────────────────────────┘
//!                        ownership cost                   fuel cost
//!
//! subject to:
//!   Σ_{v ∈ size s} distance[y][v] ≥ Σ_b demand(y, s, b)     Demand per (year, size)
//!   Σ_v ef_v · cons_v · distance[y][v] ≤ cap(y)             Emission cap per year
//!   distance[y][v] ≤ range_v · count[y][v]                  Utilization (optional)
//!   count, distance ≥ 0
//! ```
//!
//! with `ρ = 1 + insurance + maintenance - resale` (0.16 by default), charged
//! for every year a vehicle is owned.
//!
//! Vehicle counts are continuous: plans may contain fractional vehicles.

mod constraints;
mod cost;
mod extract;
mod oracle;
mod program;
mod solution;
mod solver;
mod variables;
mod verify;

pub use constraints::{build_constraints, ConstraintKind, ConstraintMatrix, ConstraintRow, ConstraintSense};
pub use cost::{
    objective_coefficients, vehicle_costs, CostRates, CostRatesInput, InvalidCostRates, VehicleCosts,
};
pub use extract::{extract_plan, resolve_values, ZeroTolerance};
pub use oracle::{GoodLpOracle, LpOracle, LpSolverKind, OracleFailure, OracleSolution, SolverFailureKind};
pub use program::{LinearProgram, ModelOptions};
pub use solution::{Activity, FleetPlan, FleetPlanEntry, ResolvedVehicleYear, SizeCoverage, YearSummary};
pub use solver::{solve_fleet, solve_fleet_with, FleetSolverConfig};
pub use variables::{VariableFamily, VariableIndex, VariableKey};
pub use verify::{verify_plan, PlanViolation};
