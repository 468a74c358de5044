//! Write a chart specification as JSON.
//!
//! The JSON is the "portable" form of a rendered chart: title, axis labels,
//! every series with its points and color, and the price-increase marker.
//! Dates are ISO (`YYYY-MM-DD`), colors `#rrggbb`.

use std::fs::{self, File};
use std::path::Path;

use crate::domain::ChartResult;
use crate::error::SalesError;

pub fn write_chart_json(path: &Path, chart: &ChartResult) -> Result<(), SalesError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SalesError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| SalesError::io(path, e))?;
    serde_json::to_writer_pretty(file, chart)
        .map_err(|e| SalesError::io(path, std::io::Error::other(e)))?;
    Ok(())
}
