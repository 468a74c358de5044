//! Tracing setup.
//!
//! Batch commands log to stderr. The dashboard owns the terminal, so it logs
//! to a daily-rotated file instead (`<log_dir>/morsel.log.YYYY-MM-DD`).
//!
//! Filtering follows `RUST_LOG`, e.g. `RUST_LOG=morsel_sales=debug`.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

const DEFAULT_FILTER: &str = "morsel_sales=info,warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr. A second call (or an already-installed subscriber) is a no-op.
pub fn init_stderr() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(env_filter())
        .try_init();
}

/// Log to a daily rolling file under `log_dir`.
pub fn init_file(log_dir: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create log directory '{}': {e}", log_dir.display()),
        )
    })?;

    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "morsel.log");

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(env_filter())
        .try_init();

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(())
}
