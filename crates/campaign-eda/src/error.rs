//! Custom error types for the campaign analysis pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Every variant
//! carries a stable error code so the CLI and the run report can classify
//! failures without matching on messages.
//!
//! Undefined statistics (e.g. the standard deviation of a single call) are
//! not errors; they are collected as [`ComputationWarning`]s instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Column exists but its values do not fit the expected type.
    #[error("Column '{column}' is not a valid {expected} column: {reason}")]
    InvalidColumnType {
        column: String,
        expected: String,
        reason: String,
    },

    /// The delimited input could not be parsed.
    #[error("Failed to parse input: {0}")]
    Parse(String),

    /// No valid values found in a column for computation.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Chart rendering failed.
    #[error("Failed to render plot: {0}")]
    Plot(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for the failure.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidColumnType { .. } => "INVALID_COLUMN_TYPE",
            Self::Parse(_) => "PARSE_ERROR",
            Self::NoValidValues(_) => "NO_VALID_VALUES",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Plot(_) => "PLOT_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means the input does not have the expected schema.
    pub fn is_schema_error(&self) -> bool {
        match self {
            Self::ColumnNotFound(_) | Self::InvalidColumnType { .. } => true,
            Self::WithContext { source, .. } => source.is_schema_error(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for AnalysisError {
    fn from(e: crate::config::ConfigValidationError) -> Self {
        AnalysisError::InvalidConfig(e.to_string())
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Io(e).with_context(context))
    }
}

/// A statistic that could not be computed for part of the data.
///
/// Warnings never abort the run. They are logged when raised and returned
/// with the pipeline result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationWarning {
    /// Analysis stage that produced the warning (e.g. "call_duration").
    pub stage: String,
    /// Group or column the statistic belongs to.
    pub subject: String,
    /// What was undefined and how it was resolved.
    pub message: String,
}

impl ComputationWarning {
    pub fn new(
        stage: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ComputationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.subject, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            AnalysisError::ColumnNotFound("age".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            AnalysisError::Parse("ragged".to_string()).error_code(),
            "PARSE_ERROR"
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(AnalysisError::Io(io).error_code(), "IO_ERROR");
    }

    #[test]
    fn test_is_schema_error() {
        assert!(AnalysisError::ColumnNotFound("job".to_string()).is_schema_error());
        assert!(
            AnalysisError::InvalidColumnType {
                column: "age".to_string(),
                expected: "integer".to_string(),
                reason: "abc".to_string(),
            }
            .is_schema_error()
        );
        assert!(!AnalysisError::Parse("bad".to_string()).is_schema_error());
    }

    #[test]
    fn test_with_context() {
        let error =
            AnalysisError::ColumnNotFound("duration".to_string()).with_context("While loading");
        assert!(error.to_string().contains("While loading"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND"); // Preserves original code
        assert!(error.is_schema_error());
    }

    #[test]
    fn test_io_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let error = result.context("Writing report").unwrap_err();
        assert_eq!(error.error_code(), "IO_ERROR");
        assert!(error.to_string().starts_with("Writing report"));
    }

    #[test]
    fn test_warning_display() {
        let warning = ComputationWarning::new("call_duration", "student", "std undefined");
        assert_eq!(warning.to_string(), "[call_duration] student: std undefined");
    }
}
