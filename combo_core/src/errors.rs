//! # Error Types
//!
//! Structured error types for combo_core. Every failure aborts the whole run,
//! so each variant carries enough context (file, row, column) for the caller
//! to tell the user exactly what to fix.
//!
//! ## Example
//!
//! ```rust
//! use combo_core::errors::{CalcError, CalcResult};
//!
//! fn require_column(headers: &[&str], column: &str) -> CalcResult<()> {
//!     if !headers.contains(&column) {
//!         return Err(CalcError::missing_column("combos.csv", column));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_column(&["D", "EX"], "T").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for combo_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for load combination runs.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Path missing, unreadable or unwritable
    #[error("File access error: {operation} on '{path}' - {reason}")]
    FileAccess {
        operation: String,
        path: String,
        reason: String,
    },

    /// A required column is absent from an input table
    #[error("Missing required column '{column}' in '{file}'")]
    MissingColumn { file: String, column: String },

    /// Malformed row or unparsable cell. `row` is the 1-based line number,
    /// counting the header as line 1.
    #[error("File format error in '{path}' at line {row}: {reason}")]
    FileFormat {
        path: String,
        row: u64,
        reason: String,
    },

    /// Non-numeric coefficient encountered while combining
    #[error("Compute error: combination {combination}, column '{column}' has non-numeric value '{value}'")]
    Compute {
        combination: usize,
        column: String,
        value: String,
    },

    /// JSON (de)serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Run configuration rejected before any file is touched
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl CalcError {
    /// Create a FileAccess error
    pub fn file_access(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileAccess {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingColumn error
    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        CalcError::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }

    /// Create a FileFormat error
    pub fn file_format(path: impl Into<String>, row: u64, reason: impl Into<String>) -> Self {
        CalcError::FileFormat {
            path: path.into(),
            row,
            reason: reason.into(),
        }
    }

    /// Create a Compute error
    pub fn compute(combination: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::Compute {
            combination,
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Map a csv reader error onto the matching variant.
    ///
    /// I/O failures stay `FileAccess`; everything else is a format problem
    /// at the position the csv crate reports.
    pub(crate) fn from_csv(path: &str, err: csv::Error) -> Self {
        let row = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => CalcError::file_access("read", path, io.to_string()),
            csv::ErrorKind::UnequalLengths { expected_len, len, .. } => CalcError::file_format(
                path,
                row,
                format!("expected {} fields, found {}", expected_len, len),
            ),
            csv::ErrorKind::Utf8 { err, .. } => {
                CalcError::file_format(path, row, format!("invalid UTF-8: {}", err))
            }
            other => CalcError::file_format(path, row, format!("{:?}", other)),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::FileAccess { .. } => "FILE_ACCESS",
            CalcError::MissingColumn { .. } => "MISSING_COLUMN",
            CalcError::FileFormat { .. } => "FILE_FORMAT",
            CalcError::Compute { .. } => "COMPUTE",
            CalcError::Serialization { .. } => "SERIALIZATION",
            CalcError::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }
}
