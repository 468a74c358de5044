//! Raw rows -> cleaned rows.
//!
//! filter on product -> parse price -> `Sales = quantity * price` -> project
//!
//! Nothing here touches the filesystem; `app::pipeline` wires it to ingest
//! and export.

use tracing::debug;

use crate::domain::{CleanedSalesRecord, RawSalesFile, TARGET_PRODUCT};
use crate::error::SalesError;

/// Row counts for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub file_name: String,
    pub rows_read: usize,
    pub rows_kept: usize,
}

/// Clean one raw file. Fails on the first unparseable price.
pub fn clean_file(raw: &RawSalesFile) -> Result<(Vec<CleanedSalesRecord>, FileStats), SalesError> {
    let mut out = Vec::new();

    for rec in raw.records.iter().filter(|r| r.product == TARGET_PRODUCT) {
        let price = parse_price(&rec.price).ok_or_else(|| SalesError::MalformedPrice {
            path: raw.path.clone(),
            line: rec.line,
            value: rec.price.clone(),
        })?;

        out.push(CleanedSalesRecord {
            sales: rec.quantity as f64 * price,
            date: rec.date,
            region: rec.region.clone(),
        });
    }

    let stats = FileStats {
        file_name: raw
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| raw.path.display().to_string()),
        rows_read: raw.records.len(),
        rows_kept: out.len(),
    };
    debug!(
        file = %stats.file_name,
        read = stats.rows_read,
        kept = stats.rows_kept,
        dropped = stats.rows_read - stats.rows_kept,
        "filtered raw extract"
    );

    Ok((out, stats))
}

/// Strip `$`, `,` and whitespace, then parse a non-negative finite number.
pub fn parse_price(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    let v = cleaned.parse::<f64>().ok()?;
    // `+ 0.0` folds `-0.0` into `0.0`.
    if v.is_finite() && v >= 0.0 { Some(v + 0.0) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawSalesRecord;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn raw(line: usize, product: &str, quantity: u64, price: &str, day: u32, region: &str) -> RawSalesRecord {
        RawSalesRecord {
            line,
            product: product.to_string(),
            quantity,
            price: price.to_string(),
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            region: region.to_string(),
        }
    }

    fn file(records: Vec<RawSalesRecord>) -> RawSalesFile {
        RawSalesFile {
            path: PathBuf::from("data/daily_sales_data_0.csv"),
            records,
        }
    }

    #[test]
    fn keeps_only_pink_morsel_and_computes_sales() {
        let input = file(vec![
            raw(2, "pink morsel", 2, "$3.00", 10, "north"),
            raw(3, "other", 5, "$1.00", 11, "east"),
        ]);

        let (rows, stats) = clean_file(&input).unwrap();
        assert_eq!(
            rows,
            vec![CleanedSalesRecord {
                sales: 6.0,
                date: NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
                region: "north".to_string(),
            }]
        );
        assert_eq!(stats.file_name, "daily_sales_data_0.csv");
        assert_eq!(stats.rows_read, 2);
        assert_eq!(stats.rows_kept, 1);
    }

    #[test]
    fn product_match_is_exact_and_case_sensitive() {
        let input = file(vec![
            raw(2, "Pink Morsel", 1, "$1.00", 1, "north"),
            raw(3, "pink morsel ", 1, "$1.00", 1, "north"),
            raw(4, "pink morsels", 1, "$1.00", 1, "north"),
        ]);
        let (rows, _) = clean_file(&input).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn malformed_price_on_retained_row_is_fatal() {
        let input = file(vec![
            raw(2, "pink morsel", 1, "$1.00", 1, "north"),
            raw(3, "pink morsel", 1, "$abc", 2, "north"),
        ]);
        let err = clean_file(&input).unwrap_err();
        match err {
            SalesError::MalformedPrice { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "$abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_price_on_dropped_row_is_ignored() {
        let input = file(vec![raw(2, "gold morsel", 1, "n/a", 1, "north")]);
        let (rows, stats) = clean_file(&input).unwrap();
        assert!(rows.is_empty());
        assert_eq!(stats.rows_read, 1);
    }

    #[test]
    fn price_cleanup() {
        assert_eq!(parse_price("$3.00"), Some(3.0));
        assert_eq!(parse_price("$1,234.50"), Some(1234.5));
        assert_eq!(parse_price(" 0.99 "), Some(0.99));
        assert_eq!(parse_price("4"), Some(4.0));
        assert_eq!(parse_price("$"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("€3.00"), None);
        assert_eq!(parse_price("-$3.00"), None);
        let zero = parse_price("-0.00").unwrap();
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_positive());
        assert_eq!(parse_price("inf"), None);
    }
}
