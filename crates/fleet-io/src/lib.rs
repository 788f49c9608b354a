//! # fleet-io: CSV I/O for fleet planning
//!
//! Reads the five reference tables from a data directory and writes plan
//! rows back out as CSV.
//!
//! | Table | Default file | Record |
//! |-------|--------------|--------|
//! | vehicles | `vehicles.csv` | [`fleet_core::VehicleSpec`] |
//! | vehicle fuels | `vehicles_fuels.csv` | [`fleet_core::VehicleFuelProfile`] |
//! | fuels | `fuels.csv` | [`fleet_core::FuelProfile`] |
//! | demand | `demand.csv` | [`fleet_core::DemandRecord`] |
//! | emission caps | `carbon_emissions.csv` | [`fleet_core::EmissionCap`] |

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{IoError, IoResult};
pub use reader::{load_reference_data, load_tables, read_rows, read_table, DataFiles};
pub use writer::{write_rows, write_table};
