//! # fleet-core: Fleet Planning Reference Data
//!
//! Provides the immutable input tables of the fleet planning model and the
//! indexed lookup structure built once from them.
//!
//! ## Design Philosophy
//!
//! Reference data is loaded once per run and never mutated afterward:
//! - **Records**: one struct per input table row ([`VehicleSpec`],
//!   [`VehicleFuelProfile`], [`FuelProfile`], [`DemandRecord`], [`EmissionCap`])
//! - **Index**: [`ReferenceData`] joins the tables through hash maps keyed by
//!   vehicle id and fuel type, so the model builder never re-scans a table
//! - **Horizon**: [`Horizon`] is the contiguous planning window
//!
//! Every failed join is a [`DataIntegrityError`] naming the offending key. No
//! lookup ever falls back to a default value.
//!
//! ## Quick Start
//!
//! ```rust
//! use fleet_core::*;
//!
//! let tables = ReferenceTables {
//!     vehicles: vec![VehicleSpec::new("Diesel_S1", 100_000.0, SizeClass::S1, DistanceBucket::D1)],
//!     vehicle_fuels: vec![VehicleFuelProfile::new("Diesel_S1", "Diesel", 0.3)],
//!     fuels: vec![FuelProfile::new("Diesel", 1.2, 3.2)],
//!     demand: vec![DemandRecord::new(2030, SizeClass::S1, DistanceBucket::D1, 100_000.0)],
//!     emission_caps: vec![EmissionCap::new(2030, 1e9)],
//! };
//!
//! let reference = ReferenceData::new(tables)?;
//! assert_eq!(reference.demand(2030, SizeClass::S1)?, 100_000.0);
//! # Ok::<(), DataIntegrityError>(())
//! ```

pub mod category;
pub mod error;
pub mod horizon;
pub mod records;
pub mod reference;

pub use category::{DistanceBucket, SizeClass};
pub use error::{DataIntegrityError, IntegrityResult};
pub use horizon::Horizon;
pub use records::{DemandRecord, EmissionCap, FuelProfile, VehicleFuelProfile, VehicleSpec};
pub use reference::{ReferenceData, ReferenceTables};

use serde::{Deserialize, Serialize};
use std::fmt;

// Newtype wrappers for table keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuelType(String);

impl VehicleId {
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        VehicleId(value.into())
    }
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FuelType {
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        FuelType(value.into())
    }
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        VehicleId::new(value)
    }
}

impl From<&str> for FuelType {
    fn from(value: &str) -> Self {
        FuelType::new(value)
    }
}
