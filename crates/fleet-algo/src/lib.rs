//! # fleet-algo: Fleet Replacement Planning as a Linear Program
//!
//! Translates [`fleet_core::ReferenceData`] into a linear program, hands it to
//! an LP backend and maps the primal solution back into a yearly fleet plan.
//!
//! ## Pipeline
//!
//! | Stage | Item | Output |
//! |-------|------|--------|
//! | Decision variables | [`VariableIndex`] | canonical `count`/`distance` positions |
//! | Cost model | [`objective_coefficients`] | objective vector |
//! | Constraint model | [`build_constraints`] | canonical ≤ rows |
//! | Oracle | [`LpOracle`], [`GoodLpOracle`] | primal vector |
//! | Extraction | [`extract_plan`] | [`FleetPlan`] |
//!
//! The cost and constraint models only read the reference data and the index,
//! and are built concurrently when the `parallel` feature is enabled.
//!
//! ## Example
//!
//! ```no_run
//! use fleet_algo::{solve_fleet, FleetSolverConfig};
//! use fleet_core::{Horizon, ReferenceData, ReferenceTables};
//!
//! # fn load() -> ReferenceTables { unimplemented!() }
//! let reference = ReferenceData::new(load())?;
//! let config = FleetSolverConfig::default().with_horizon(Horizon::new(2023, 2038)?);
//! let plan = solve_fleet(&reference, &config)?;
//! println!("{}", plan.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod parallel;
pub mod plan;
pub mod test_utils;

pub use error::{PlanError, PlanResult};
pub use plan::*;
