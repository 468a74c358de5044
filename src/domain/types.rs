//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built by the aggregator from raw CSV rows
//! - loaded back by the renderer
//! - exported to JSON as a chart specification

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// The only product the aggregator keeps (compared exactly, case-sensitive).
pub const TARGET_PRODUCT: &str = "pink morsel";

/// File-name prefix of the raw daily extracts (`daily_sales_data_*.csv`).
pub const INPUT_FILE_PREFIX: &str = "daily_sales_data_";

/// Human-readable form of the input glob, used in messages.
pub const INPUT_FILE_PATTERN: &str = "daily_sales_data_*.csv";

/// Output header, in column order.
pub const OUTPUT_COLUMNS: [&str; 3] = ["Sales", "date", "region"];

/// Label of the price-increase marker.
pub const PRICE_INCREASE_LABEL: &str = "Price Increase (Jan 15, 2021)";

/// Date of the Pink Morsel price increase.
pub fn price_increase_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 15).unwrap_or(NaiveDate::MIN)
}

/// One row of a raw daily extract.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSalesRecord {
    /// 1-based CSV line (header is line 1).
    pub line: usize,
    pub product: String,
    pub quantity: u64,
    /// Currency-formatted price as it appears in the file (e.g. `$3.00`).
    pub price: String,
    pub date: NaiveDate,
    pub region: String,
}

/// The rows read from one raw extract, in file order.
#[derive(Debug, Clone)]
pub struct RawSalesFile {
    pub path: PathBuf,
    pub records: Vec<RawSalesRecord>,
}

/// One row of the cleaned dataset: `Sales, date, region`.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedSalesRecord {
    pub sales: f64,
    pub date: NaiveDate,
    pub region: String,
}

/// Summary stats about a loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub sales_min: f64,
    pub sales_max: f64,
}

/// The cleaned dataset, always sorted ascending by date.
///
/// The only constructor sorts, so holders can rely on the ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedDataset {
    records: Vec<CleanedSalesRecord>,
}

impl CleanedDataset {
    /// Build a dataset, stable-sorting by date (ties keep input order).
    pub fn from_records(mut records: Vec<CleanedSalesRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[CleanedSalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct region values (exact strings) in first-appearance order.
    pub fn regions(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in &self.records {
            if !out.contains(&r.region.as_str()) {
                out.push(&r.region);
            }
        }
        out
    }

    pub fn stats(&self) -> Option<DatasetStats> {
        let first = self.records.first()?;
        let last = self.records.last()?;

        let mut sales_min = f64::INFINITY;
        let mut sales_max = f64::NEG_INFINITY;
        for r in &self.records {
            sales_min = sales_min.min(r.sales);
            sales_max = sales_max.max(r.sales);
        }

        Some(DatasetStats {
            n_rows: self.records.len(),
            date_min: first.date,
            date_max: last.date,
            sales_min,
            sales_max,
        })
    }
}

/// Region filter chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionQuery {
    All,
    Region(String),
}

impl RegionQuery {
    /// `"all"` (any case) selects every region; anything else is a region
    /// name, kept as given.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            RegionQuery::All
        } else {
            RegionQuery::Region(value.to_string())
        }
    }

    /// Short label used in pickers and file names.
    pub fn label(&self) -> String {
        match self {
            RegionQuery::All => "all".to_string(),
            RegionQuery::Region(r) => r.to_lowercase(),
        }
    }

    /// Label shown in the dashboard picker (`All Regions`, `North`, ...).
    pub fn display_name(&self) -> String {
        match self {
            RegionQuery::All => "All Regions".to_string(),
            RegionQuery::Region(r) => title_case(r),
        }
    }
}

/// Capitalize the first letter of every word and lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// 24-bit color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(0xe7, 0x4c, 0x3c);

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// One (date, Sales) observation in a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub sales: f64,
}

/// A date-ordered line series. `name` is `None` for a single filtered region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: Option<String>,
    pub color: Rgb,
    pub points: Vec<SalesPoint>,
}

impl ChartSeries {
    pub fn max_sales(&self) -> Option<f64> {
        self.points.iter().map(|p| p.sales).reduce(f64::max)
    }
}

/// Vertical marker with a text annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartMarker {
    pub date: NaiveDate,
    pub label: String,
    /// Y position of the annotation: max Sales in the chart, or 0 when empty.
    pub anchor_sales: f64,
    pub color: Rgb,
    pub dashed: bool,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResult {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
    pub marker: ChartMarker,
}

impl ChartResult {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// Date span of every point plus the marker, widened by a day on each
    /// side when it would otherwise be a single date.
    pub fn date_span(&self) -> (NaiveDate, NaiveDate) {
        let mut min = self.marker.date;
        let mut max = self.marker.date;
        for p in self.series.iter().flat_map(|s| &s.points) {
            min = min.min(p.date);
            max = max.max(p.date);
        }
        if min == max {
            return (min.pred_opt().unwrap_or(min), max.succ_opt().unwrap_or(max));
        }
        (min, max)
    }

    /// Sales span of every point, widened by 0.5 on each side when flat.
    /// `None` when the chart has no points.
    pub fn sales_span(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in self.series.iter().flat_map(|s| &s.points) {
            min = min.min(p.sales);
            max = max.max(p.sales);
        }
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        if max > min { Some((min, max)) } else { Some((min - 0.5, max + 0.5)) }
    }
}

/// Resolved settings for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub data_dir: PathBuf,
    pub output_path: PathBuf,
    pub preview_rows: usize,
}

/// Resolved settings for one `morsel chart` invocation.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub dataset_path: PathBuf,
    pub query: RegionQuery,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_json: Option<PathBuf>,
}
