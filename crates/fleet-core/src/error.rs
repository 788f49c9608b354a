//! Data integrity errors for reference table joins and lookups
//!
//! Every variant names the key that failed so the offending row can be found
//! in the input tables. These errors are always raised before any solver runs.

use crate::{FuelType, SizeClass, VehicleId};
use thiserror::Error;

/// A required join or lookup across the reference tables failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataIntegrityError {
    /// A table references a vehicle id missing from the vehicle table
    #[error("vehicle '{vehicle}' referenced by {table} is not in the vehicle table")]
    UnknownVehicle {
        vehicle: VehicleId,
        table: &'static str,
    },

    /// A vehicle id appears more than once in a 1:1 table
    #[error("vehicle '{vehicle}' appears more than once in {table}")]
    DuplicateVehicle {
        vehicle: VehicleId,
        table: &'static str,
    },

    /// A vehicle has no fuel profile
    #[error("vehicle '{0}' has no fuel profile")]
    MissingFuelProfile(VehicleId),

    /// A vehicle's fuel is missing from the fuel table
    #[error("fuel '{fuel}' used by vehicle '{vehicle}' is not in the fuel table")]
    UnknownFuel { fuel: FuelType, vehicle: VehicleId },

    /// A fuel type appears more than once in the fuel table
    #[error("fuel '{0}' appears more than once in the fuel table")]
    DuplicateFuel(FuelType),

    /// No demand record exists for a requested (year, size class)
    #[error("no demand recorded for year {year}, size class {size}")]
    MissingDemand { year: u32, size: SizeClass },

    /// The same (year, size, bucket) demand appears twice
    #[error("demand for year {year}, size class {size}, bucket {bucket} appears more than once")]
    DuplicateDemand {
        year: u32,
        size: SizeClass,
        bucket: crate::DistanceBucket,
    },

    /// No emission cap exists for a requested year
    #[error("no emission cap recorded for year {0}")]
    MissingEmissionCap(u32),

    /// The same year appears twice in the emission cap table
    #[error("emission cap for year {0} appears more than once")]
    DuplicateEmissionCap(u32),

    /// A numeric field is negative, NaN or infinite
    #[error("{table} row '{key}': {field} must be a finite non-negative number, got {value}")]
    InvalidValue {
        table: &'static str,
        key: String,
        field: &'static str,
        value: f64,
    },

    /// A category label could not be parsed
    #[error("unknown {category} '{value}'")]
    UnknownCategory {
        category: &'static str,
        value: String,
    },

    /// The vehicle table is empty
    #[error("the vehicle table is empty")]
    NoVehicles,

    /// The planning horizon is empty or reversed
    #[error("invalid planning horizon {start}..={end}")]
    InvalidHorizon { start: u32, end: u32 },
}

/// Convenience type alias for integrity-checked results.
pub type IntegrityResult<T> = Result<T, DataIntegrityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_key() {
        let err = DataIntegrityError::UnknownVehicle {
            vehicle: VehicleId::new("BEV_S4_2031"),
            table: "vehicle fuel profiles",
        };
        let msg = err.to_string();
        assert!(msg.contains("BEV_S4_2031"));
        assert!(msg.contains("vehicle fuel profiles"));

        let err = DataIntegrityError::MissingDemand {
            year: 2027,
            size: SizeClass::S2,
        };
        assert_eq!(err.to_string(), "no demand recorded for year 2027, size class S2");
    }
}
