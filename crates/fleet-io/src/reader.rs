//! Reference table loading
//!
//! Every table is a headered CSV file deserialized row by row into the
//! matching `fleet_core` record. Whitespace around fields is trimmed and
//! columns the records do not name are ignored.

use crate::error::{IoError, IoResult};
use fleet_core::{ReferenceData, ReferenceTables};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// File names of the five input tables inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub vehicles: String,
    pub vehicle_fuels: String,
    pub fuels: String,
    pub demand: String,
    pub emission_caps: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            vehicles: "vehicles.csv".to_string(),
            vehicle_fuels: "vehicles_fuels.csv".to_string(),
            fuels: "fuels.csv".to_string(),
            demand: "demand.csv".to_string(),
            emission_caps: "carbon_emissions.csv".to_string(),
        }
    }
}

impl DataFiles {
    /// `(table name, path)` of every table under `dir`.
    pub fn paths(&self, dir: &Path) -> [(&'static str, PathBuf); 5] {
        [
            ("vehicles", dir.join(&self.vehicles)),
            ("vehicle fuels", dir.join(&self.vehicle_fuels)),
            ("fuels", dir.join(&self.fuels)),
            ("demand", dir.join(&self.demand)),
            ("emission caps", dir.join(&self.emission_caps)),
        ]
    }
}

/// Read all rows of a headered CSV table.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> IoResult<Vec<T>> {
    let file = File::open(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(file, path)
}

/// Read rows from any reader; `path` only labels errors.
pub fn read_rows<T: DeserializeOwned, R: std::io::Read>(reader: R, path: &Path) -> IoResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| IoError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "read table");
    Ok(rows)
}

/// Read the five tables without cross-checking them.
pub fn load_tables(dir: &Path, files: &DataFiles) -> IoResult<ReferenceTables> {
    let [vehicles, vehicle_fuels, fuels, demand, emission_caps] = files.paths(dir);
    Ok(ReferenceTables {
        vehicles: read_table(&vehicles.1)?,
        vehicle_fuels: read_table(&vehicle_fuels.1)?,
        fuels: read_table(&fuels.1)?,
        demand: read_table(&demand.1)?,
        emission_caps: read_table(&emission_caps.1)?,
    })
}

/// Read and validate the reference data under `dir`.
pub fn load_reference_data(dir: &Path, files: &DataFiles) -> IoResult<ReferenceData> {
    let tables = load_tables(dir, files)?;
    let reference = ReferenceData::new(tables)?;
    tracing::info!(
        dir = %dir.display(),
        vehicles = reference.num_vehicles(),
        "loaded reference data"
    );
    Ok(reference)
}
