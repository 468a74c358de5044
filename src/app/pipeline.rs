//! Shared pipeline logic used by both the CLI and the TUI front-ends.
//!
//! Aggregation: discover -> ingest -> filter/price/Sales -> project -> write
//!
//! Rendering front-ends then only load the written dataset through
//! `chart::Renderer` and focus on presentation.

use std::path::PathBuf;

use tracing::info;

use crate::domain::{AggregateConfig, CleanedSalesRecord};
use crate::error::SalesError;
use crate::transform::FileStats;

/// All computed outputs of a single `morsel aggregate` run.
#[derive(Debug, Clone)]
pub struct AggregateOutput {
    pub data_dir: PathBuf,
    pub output_path: PathBuf,
    pub files: Vec<FileStats>,
    pub records: Vec<CleanedSalesRecord>,
}

impl AggregateOutput {
    pub fn rows_read(&self) -> usize {
        self.files.iter().map(|f| f.rows_read).sum()
    }

    pub fn rows_kept(&self) -> usize {
        self.records.len()
    }
}

/// Execute the aggregation and write the cleaned CSV.
///
/// Every input is read and cleaned before the output is touched, so any
/// failure leaves a previous output file as it was.
pub fn run_aggregate(config: &AggregateConfig) -> Result<AggregateOutput, SalesError> {
    // 1) Discover the daily extracts.
    let inputs = crate::io::discover::discover_input_files(&config.data_dir)?;
    info!(
        dir = %config.data_dir.display(),
        files = inputs.len(),
        "found input files"
    );

    // 2) Ingest + clean each file, concatenating in discovery order.
    let mut files = Vec::with_capacity(inputs.len());
    let mut records = Vec::new();
    for path in &inputs {
        let raw = crate::io::ingest::read_raw_sales(path)?;
        let (cleaned, stats) = crate::transform::clean_file(&raw)?;
        records.extend(cleaned);
        files.push(stats);
    }

    // 3) Persist.
    crate::io::export::write_cleaned_csv(&config.output_path, &records)?;

    let output = AggregateOutput {
        data_dir: config.data_dir.clone(),
        output_path: config.output_path.clone(),
        files,
        records,
    };
    info!(
        read = output.rows_read(),
        kept = output.rows_kept(),
        "aggregation complete"
    );
    Ok(output)
}
