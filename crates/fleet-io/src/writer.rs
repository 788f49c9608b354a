use crate::error::{IoError, IoResult};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write rows as a headered CSV table; the header follows the field order.
pub fn write_rows<T: Serialize, W: Write>(writer: W, rows: &[T], path: &Path) -> IoResult<()> {
    let to_error = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row).map_err(to_error)?;
    }
    writer.flush().map_err(|err| to_error(err.into()))?;
    Ok(())
}

/// Write rows to `path`, creating parent directories as needed.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> IoResult<()> {
    let open_error = |source| IoError::Open {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if parent != Path::new("") {
            fs::create_dir_all(parent).map_err(open_error)?;
        }
    }
    let file = File::create(path).map_err(open_error)?;
    write_rows(file, rows, path)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote table");
    Ok(())
}
