//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and cleaned sales records (`RawSalesRecord`, `CleanedSalesRecord`)
//! - the sorted, immutable `CleanedDataset`
//! - chart queries and results (`RegionQuery`, `ChartResult`)
//! - resolved command configs (`AggregateConfig`, `ChartConfig`)

pub mod types;

pub use types::*;
