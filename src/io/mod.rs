//! Input/output helpers.
//!
//! - raw extract discovery (`discover`)
//! - raw CSV ingest + validation (`ingest`)
//! - cleaned CSV write (`export`) and load (`dataset`)
//! - chart JSON export (`chart_json`)

pub mod chart_json;
pub mod dataset;
pub mod discover;
pub mod export;
pub mod ingest;

pub use chart_json::*;
pub use dataset::*;
pub use discover::*;
pub use export::*;
pub use ingest::*;
