use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::io::store::StoreError;
use crate::ops::export::{ExportFormat, export_file_name};
use crate::ops::stats::Stats;

/// Write the stats report into `dir` (created if needed), replacing any
/// export from the same day, and return the file's path.
pub fn export_stats(
    dir: &Path,
    format: ExportFormat,
    stats: &Stats,
    today: NaiveDate,
) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(export_file_name(format, today));
    fs::write(&path, format.render(stats, today)).map_err(|source| StoreError::Write {
        path: path.clone(),
        source,
    })?;
    log::info!("exported stats to {}", path.display());
    Ok(path)
}
