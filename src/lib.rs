//! `morsel-sales` library crate.
//!
//! The binary (`morsel`) is a thin wrapper around this library so that:
//!
//! - the aggregation and chart logic is testable without spawning processes
//! - the pure `chart::render_chart` can back any front-end (text, JSON, TUI)

pub mod app;
pub mod chart;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod transform;
pub mod tui;
