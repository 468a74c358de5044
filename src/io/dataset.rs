//! Load the cleaned dataset written by the aggregator.

use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::domain::{CleanedDataset, CleanedSalesRecord, OUTPUT_COLUMNS};
use crate::error::SalesError;
use crate::io::ingest::{build_header_map, cell, ensure_columns_exist, parse_date};

/// Read, validate and date-sort the cleaned CSV.
///
/// There is no fallback: a missing, empty or malformed file is an error.
pub fn load_cleaned_dataset(path: &Path) -> Result<CleanedDataset, SalesError> {
    let file = File::open(path).map_err(|e| SalesError::DatasetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| SalesError::csv(path, e))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_columns_exist(path, &header_map, &OUTPUT_COLUMNS)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result.map_err(|e| SalesError::csv(path, e))?;

        let sales_raw = cell(&record, &header_map, "Sales");
        let sales = sales_raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SalesError::DatasetLoad {
                path: path.to_path_buf(),
                reason: format!("invalid Sales value '{sales_raw}' on line {line}"),
            })?;

        let date_raw = cell(&record, &header_map, "date");
        let date = parse_date(date_raw).ok_or_else(|| SalesError::InvalidDate {
            path: path.to_path_buf(),
            line,
            value: date_raw.to_string(),
        })?;

        records.push(CleanedSalesRecord {
            sales,
            date,
            region: cell(&record, &header_map, "region").to_string(),
        });
    }

    if records.is_empty() {
        return Err(SalesError::DatasetLoad {
            path: path.to_path_buf(),
            reason: "dataset is empty".to_string(),
        });
    }

    let dataset = CleanedDataset::from_records(records);
    info!(path = %path.display(), rows = dataset.len(), "loaded cleaned dataset");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn load_str(body: &str) -> Result<CleanedDataset, SalesError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned_sales_data.csv");
        fs::write(&path, body).unwrap();
        load_cleaned_dataset(&path)
    }

    #[test]
    fn loads_and_sorts_by_date() {
        let ds = load_str(
            "Sales,date,region\n\
             5.0,2021-02-01,north\n\
             1.0,2020-12-31,south\n\
             3.0,2021-01-15,east\n",
        )
        .unwrap();

        let dates: Vec<NaiveDate> = ds.records().iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
                NaiveDate::from_ymd_opt(2021, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
            ]
        );
        assert_eq!(ds.records()[0].sales, 1.0);
    }

    #[test]
    fn region_values_are_kept_verbatim() {
        let ds = load_str(
            "Sales,date,region\n\
             6.0 , 2021-01-10, north\n\
             1.0,2021-01-11,east \n",
        )
        .unwrap();

        assert_eq!(ds.regions(), vec![" north", "east "]);
        assert_eq!(ds.records()[0].sales, 6.0);
    }

    #[test]
    fn missing_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_cleaned_dataset(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, SalesError::DatasetLoad { .. }));
    }

    #[test]
    fn header_only_file_is_empty() {
        let err = load_str("Sales,date,region\n").unwrap_err();
        match err {
            SalesError::DatasetLoad { reason, .. } => assert_eq!(reason, "dataset is empty"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_region_column() {
        let err = load_str("Sales,date\n1.0,2021-01-01\n").unwrap_err();
        assert!(matches!(err, SalesError::MissingColumn { column: "region", .. }));
    }

    #[test]
    fn unparseable_values_are_rejected() {
        let err = load_str("Sales,date,region\nabc,2021-01-01,north\n").unwrap_err();
        assert!(matches!(err, SalesError::DatasetLoad { .. }));

        let err = load_str("Sales,date,region\n1.0,yesterday,north\n").unwrap_err();
        assert!(matches!(err, SalesError::InvalidDate { line: 2, .. }));
    }
}
