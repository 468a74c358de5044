//! Write the cleaned dataset to CSV.
//!
//! The file is first written next to the target and then renamed over it, so
//! a crash or error mid-write never leaves a truncated dataset behind.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::{CleanedSalesRecord, OUTPUT_COLUMNS};
use crate::error::SalesError;

/// Write `Sales,date,region` rows to `path`, replacing any existing file.
pub fn write_cleaned_csv(path: &Path, records: &[CleanedSalesRecord]) -> Result<(), SalesError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SalesError::io(parent, e))?;
    }

    let tmp = temp_path_for(path);
    if let Err(err) = write_rows(&tmp, records) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(SalesError::io(path, e));
    }

    info!(path = %path.display(), rows = records.len(), "wrote cleaned dataset");
    Ok(())
}

fn write_rows(tmp: &Path, records: &[CleanedSalesRecord]) -> Result<(), SalesError> {
    let file = File::create(tmp).map_err(|e| SalesError::io(tmp, e))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(OUTPUT_COLUMNS)
        .map_err(|e| SalesError::csv(tmp, e))?;

    for r in records {
        let sales = format_sales(r.sales);
        let date = r.date.format("%Y-%m-%d").to_string();
        writer
            .write_record([sales.as_str(), date.as_str(), r.region.as_str()])
            .map_err(|e| SalesError::csv(tmp, e))?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| SalesError::io(tmp, e.into_error()))?;
    file.sync_all().map_err(|e| SalesError::io(tmp, e))?;

    debug!(path = %tmp.display(), "flushed temporary output");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cleaned_sales_data.csv".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Shortest round-trip form, always with a decimal point (`6` -> `6.0`).
pub fn format_sales(v: f64) -> String {
    let s = format!("{v}");
    if v.is_finite() && !s.contains(['.', 'e', 'E']) {
        format!("{s}.0")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(sales: f64, day: u32, region: &str) -> CleanedSalesRecord {
        CleanedSalesRecord {
            sales,
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            region: region.to_string(),
        }
    }

    #[test]
    fn sales_always_has_a_decimal_point() {
        assert_eq!(format_sales(6.0), "6.0");
        assert_eq!(format_sales(1.5), "1.5");
        assert_eq!(format_sales(0.0), "0.0");
        assert_eq!(format_sales(1234.56), "1234.56");
    }

    #[test]
    fn writes_header_and_rows_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("cleaned_sales_data.csv");

        write_cleaned_csv(&path, &[record(6.0, 10, "north"), record(2.5, 11, "south, east")]).unwrap();

        let body = fs::read_to_string(&path).unwrap();
        assert_eq!(
            body,
            "Sales,date,region\n6.0,2021-01-10,north\n2.5,2021-01-11,\"south, east\"\n"
        );
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn replaces_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned_sales_data.csv");
        fs::write(&path, "stale").unwrap();

        write_cleaned_csv(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Sales,date,region\n");
    }
}
