//! Input file discovery.
//!
//! Finds the raw daily extracts (`daily_sales_data_*.csv`) directly inside the
//! data directory. Results are sorted by file name so a run never depends on
//! the order the filesystem happens to list entries in.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{INPUT_FILE_PATTERN, INPUT_FILE_PREFIX};
use crate::error::SalesError;

/// List matching input files, or fail with `NoInputFilesFound`.
pub fn discover_input_files(dir: &Path) -> Result<Vec<PathBuf>, SalesError> {
    let entries = fs::read_dir(dir).map_err(|e| SalesError::io(dir, e))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SalesError::io(dir, e))?;
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(is_input_file_name)
            == Some(true);
        if matches {
            debug!(path = %path.display(), "discovered input file");
            out.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-matching file");
        }
    }

    if out.is_empty() {
        return Err(SalesError::NoInputFilesFound {
            dir: dir.to_path_buf(),
            pattern: INPUT_FILE_PATTERN.to_string(),
        });
    }

    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

/// Shell-glob semantics of `daily_sales_data_*.csv` (case-sensitive).
fn is_input_file_name(name: &str) -> bool {
    name.len() >= INPUT_FILE_PREFIX.len() + ".csv".len()
        && name.starts_with(INPUT_FILE_PREFIX)
        && name.ends_with(".csv")
}
