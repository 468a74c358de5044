//! Reporting utilities: run summaries and chart breakdowns for the CLI.

pub mod format;

pub use format::*;
