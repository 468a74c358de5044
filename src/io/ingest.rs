//! Raw CSV ingest.
//!
//! This module is responsible for turning one daily extract into typed
//! `RawSalesRecord`s. It does no filtering and no price math; that lives in
//! `transform`.
//!
//! Behavior:
//! - **Strict schema**: all five columns must be present
//! - **Fail closed**: any unreadable row aborts the whole run
//! - cell values are kept verbatim so the product filter stays exact

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::debug;

use crate::domain::{RawSalesFile, RawSalesRecord};
use crate::error::SalesError;

const RAW_COLUMNS: [&str; 5] = ["product", "quantity", "price", "date", "region"];

/// Read one raw extract.
pub fn read_raw_sales(path: &Path) -> Result<RawSalesFile, SalesError> {
    let file = File::open(path).map_err(|e| SalesError::io(path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| SalesError::csv(path, e))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_columns_exist(path, &header_map, &RAW_COLUMNS)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| SalesError::csv(path, e))?;
        records.push(parse_raw_row(path, line, &record, &header_map)?);
    }

    debug!(path = %path.display(), rows = records.len(), "read raw extract");

    Ok(RawSalesFile {
        path: path.to_path_buf(),
        records,
    })
}

fn parse_raw_row(
    path: &Path,
    line: usize,
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<RawSalesRecord, SalesError> {
    let quantity_raw = cell(record, header_map, "quantity");
    let quantity = quantity_raw
        .trim()
        .parse::<u64>()
        .map_err(|_| SalesError::MalformedQuantity {
            path: path.to_path_buf(),
            line,
            value: quantity_raw.to_string(),
        })?;

    let date_raw = cell(record, header_map, "date");
    let date = parse_date(date_raw).ok_or_else(|| SalesError::InvalidDate {
        path: path.to_path_buf(),
        line,
        value: date_raw.to_string(),
    })?;

    Ok(RawSalesRecord {
        line,
        product: cell(record, header_map, "product").to_string(),
        quantity,
        price: cell(record, header_map, "price").to_string(),
        date,
        region: cell(record, header_map, "region").to_string(),
    })
}

pub(crate) fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM;
    // without stripping it the first column looks missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

pub(crate) fn ensure_columns_exist(
    path: &Path,
    header_map: &HashMap<String, usize>,
    columns: &[&'static str],
) -> Result<(), SalesError> {
    for &column in columns {
        if !header_map.contains_key(&column.to_ascii_lowercase()) {
            return Err(SalesError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }
    Ok(())
}

/// Cell by (already validated) column name; short rows yield `""`.
pub(crate) fn cell<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> &'a str {
    header_map
        .get(&name.to_ascii_lowercase())
        .and_then(|&idx| record.get(idx))
        .unwrap_or("")
}

/// Parse a calendar date in one of the accepted layouts.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
    let s = s.trim();
    FMTS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
