//! Formatted terminal output.
//!
//! We keep formatting code in one place so output changes are localized and
//! the pipeline code stays free of `println!`.

use crate::app::pipeline::AggregateOutput;
use crate::domain::{ChartResult, DatasetStats};
use crate::io::export::format_sales;

/// Run summary for `morsel aggregate`, with a preview of the first rows.
pub fn format_aggregate_summary(output: &AggregateOutput, preview_rows: usize) -> String {
    let mut out = String::new();

    out.push_str("=== morsel - Pink Morsel sales aggregation ===\n");
    out.push_str(&format!(
        "Inputs: {} file(s) in {}\n",
        output.files.len(),
        output.data_dir.display()
    ));
    for f in &output.files {
        out.push_str(&format!(
            "  {:<28} read={:<8} kept={}\n",
            f.file_name, f.rows_read, f.rows_kept
        ));
    }
    out.push_str(&format!(
        "Rows: read={} kept={} dropped={}\n",
        output.rows_read(),
        output.rows_kept(),
        output.rows_read() - output.rows_kept()
    ));
    out.push_str(&format!("Output: {}\n", output.output_path.display()));

    if preview_rows > 0 {
        let shown = output.records.len().min(preview_rows);
        out.push_str(&format!("\nPreview (first {shown} rows):\n"));
        out.push_str(&format!("{:>12}  {:<10}  {}\n", "Sales", "date", "region"));
        for r in output.records.iter().take(preview_rows) {
            out.push_str(&format!(
                "{:>12}  {:<10}  {}\n",
                format_sales(r.sales),
                r.date.to_string(),
                r.region
            ));
        }
    }

    out
}

/// One-line description of a loaded dataset.
pub fn format_dataset_summary(stats: &DatasetStats) -> String {
    format!(
        "Dataset: n={} | dates=[{}, {}] | Sales=[{:.2}, {:.2}]",
        stats.n_rows, stats.date_min, stats.date_max, stats.sales_min, stats.sales_max
    )
}

/// Per-series breakdown of a rendered chart.
pub fn format_chart_summary(chart: &ChartResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", chart.title));
    out.push_str("Series:\n");
    for s in &chart.series {
        let name = s.name.as_deref().unwrap_or("(selected region)");
        match (s.points.first(), s.points.last(), s.max_sales()) {
            (Some(first), Some(last), Some(max)) => out.push_str(&format!(
                "  {:<18} n={:<6} max={:<10.2} dates=[{}, {}]\n",
                name,
                s.points.len(),
                max,
                first.date,
                last.date
            )),
            _ => out.push_str(&format!("  {name:<18} n=0 (no matching rows)\n")),
        }
    }
    out.push_str(&format!(
        "Marker: {} @ {} (y={:.2})\n",
        chart.marker.label, chart.marker.date, chart.marker.anchor_sales
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::render_chart;
    use crate::domain::{CleanedDataset, CleanedSalesRecord, RegionQuery};
    use crate::transform::FileStats;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn record(sales: f64, day: u32, region: &str) -> CleanedSalesRecord {
        CleanedSalesRecord {
            sales,
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            region: region.to_string(),
        }
    }

    #[test]
    fn aggregate_summary_lists_files_and_preview() {
        let output = AggregateOutput {
            data_dir: PathBuf::from("data"),
            output_path: PathBuf::from("data/cleaned_sales_data.csv"),
            files: vec![FileStats {
                file_name: "daily_sales_data_0.csv".to_string(),
                rows_read: 3,
                rows_kept: 2,
            }],
            records: vec![record(6.0, 10, "north"), record(1.5, 11, "south")],
        };

        let txt = format_aggregate_summary(&output, 1);
        assert!(txt.contains("Inputs: 1 file(s) in data\n"));
        assert!(txt.contains("Rows: read=3 kept=2 dropped=1\n"));
        assert!(txt.contains("Preview (first 1 rows):\n"));
        assert!(txt.contains("         6.0  2021-01-10  north\n"));
        assert!(!txt.contains("south"));
    }

    #[test]
    fn chart_summary_handles_empty_series() {
        let ds = CleanedDataset::from_records(vec![record(6.0, 10, "north")]);
        let txt = format_chart_summary(&render_chart(&ds, &RegionQuery::parse("west")));
        assert!(txt.starts_with("=== Pink Morsel Sales - West Region ===\n"));
        assert!(txt.contains("n=0 (no matching rows)"));
        assert!(txt.contains("Marker: Price Increase (Jan 15, 2021) @ 2021-01-15 (y=0.00)"));
    }

    #[test]
    fn dataset_summary_line() {
        let ds = CleanedDataset::from_records(vec![record(6.0, 10, "north"), record(2.0, 3, "east")]);
        let txt = format_dataset_summary(&ds.stats().unwrap());
        assert_eq!(txt, "Dataset: n=2 | dates=[2021-01-03, 2021-01-10] | Sales=[2.00, 6.00]");
    }
}
