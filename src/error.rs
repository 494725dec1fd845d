//! Error types for the statistics loading pipeline.
//!
//! This module defines a small hierarchy of error types:
//!
//! - [`CsvError`] - CSV parsing and field coercion errors
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Missing-reference cases (a year without a price-index entry, a category
//! without a 2022 counterpart) are deliberately NOT errors; they are recovered
//! locally with documented defaults in the transform modules.

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing and numeric coercion.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode file content.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// A required column is absent from a row.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A required numeric field could not be coerced.
    #[error("Invalid value '{value}' in column '{column}': {message}")]
    InvalidValue {
        column: String,
        value: String,
        message: String,
    },
}

impl CsvError {
    /// Shorthand for a coercion failure on a named column.
    pub fn invalid(column: impl Into<String>, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type of the fallible `*_from_bytes` entry points in
/// [`crate::transform::pipeline`]. The public `load_*` functions catch it,
/// log it, and fall back to empty results.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV parsing or coercion error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// IO error outside of CSV parsing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));
    }

    #[test]
    fn test_invalid_value_format() {
        let err = CsvError::invalid("F-KZ210", "abc", "expected an integer");
        let msg = err.to_string();
        assert!(msg.contains("F-KZ210"));
        assert!(msg.contains("abc"));
        assert!(msg.contains("expected an integer"));
    }
}
