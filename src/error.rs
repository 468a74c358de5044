//! Error types.
//!
//! - `SalesError`: what can go wrong while aggregating or loading sales data
//! - `AppError`: the message + exit code that reaches `main`

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the aggregation and dataset-loading pipeline.
///
/// Every variant is fatal for the operation that produced it: the aggregator
/// writes nothing, and the renderer refuses to start.
#[derive(Debug, Error)]
pub enum SalesError {
    #[error("No input files matching `{pattern}` found in '{}'.", dir.display())]
    NoInputFilesFound { dir: PathBuf, pattern: String },

    #[error("Missing required column `{column}` in '{}'.", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Malformed price '{value}' in '{}' (line {line}).", path.display())]
    MalformedPrice { path: PathBuf, line: usize, value: String },

    #[error("Malformed quantity '{value}' in '{}' (line {line}).", path.display())]
    MalformedQuantity { path: PathBuf, line: usize, value: String },

    #[error(
        "Invalid date '{value}' in '{}' (line {line}). Expected one of: YYYY-MM-DD, YYYY/MM/DD, DD/MM/YYYY, DD-MM-YYYY.",
        path.display()
    )]
    InvalidDate { path: PathBuf, line: usize, value: String },

    #[error("Failed to load dataset '{}': {reason}", path.display())]
    DatasetLoad { path: PathBuf, reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SalesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Process exit code: 2 for missing/unreadable inputs, 3 for bad data.
    pub fn exit_code(&self) -> u8 {
        match self {
            SalesError::NoInputFilesFound { .. }
            | SalesError::MissingColumn { .. }
            | SalesError::DatasetLoad { .. }
            | SalesError::Io { .. }
            | SalesError::Csv { .. } => 2,
            SalesError::MalformedPrice { .. }
            | SalesError::MalformedQuantity { .. }
            | SalesError::InvalidDate { .. } => 3,
        }
    }
}

/// Top-level error: a user-facing message and the process exit code.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Terminal / UI failure (exit code 4).
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SalesError> for AppError {
    fn from(err: SalesError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_errors_use_exit_code_3() {
        let err = SalesError::MalformedPrice {
            path: PathBuf::from("daily_sales_data_0.csv"),
            line: 7,
            value: "$abc".to_string(),
        };
        assert_eq!(err.exit_code(), 3);

        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 3);
        assert_eq!(
            app.to_string(),
            "Malformed price '$abc' in 'daily_sales_data_0.csv' (line 7)."
        );
    }

    #[test]
    fn missing_inputs_use_exit_code_2() {
        let err = SalesError::NoInputFilesFound {
            dir: PathBuf::from("data"),
            pattern: "daily_sales_data_*.csv".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("daily_sales_data_*.csv"));
    }
}
