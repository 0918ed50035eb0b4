//! Snapshot Writer Module
//! Persists cleaned records as a header-first CSV, replacing the target atomically.

use crate::data::record::TaxRecord;
use crate::data::schema::Column;
use csv::WriterBuilder;
use log::info;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to write snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to encode snapshot: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to replace snapshot: {0}")]
    Replace(#[from] tempfile::PersistError),
}

/// Write `records` to `path`, overwriting any previous snapshot.
///
/// Rows go to a temporary file next to the target first, so a failure
/// leaves the previous snapshot (or nothing) in place.
pub fn persist(records: &[TaxRecord], path: &Path) -> Result<(), PersistError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir)?;

    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file());
        writer.write_record(Column::cleaned().map(Column::name))?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    temp.persist(path)?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
