//! Error types and exit codes for rubrica
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, unknown rubric, invalid data)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, unknown rubric (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during rubrica operations
#[derive(Error, Debug)]
pub enum RubricaError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("invalid store: {reason}")]
    InvalidStore { reason: String },

    #[error("rubric not found: {id}")]
    RubricNotFound { id: String },

    #[error("course not found: {code}")]
    CourseNotFound { code: String },

    #[error("evaluation not found: {key}")]
    EvaluationNotFound { key: String },

    #[error("rubric {id} has no code assigned; save it before activating")]
    MissingCode { id: String },

    #[error("validation failed: {reason}")]
    Validation { reason: String },

    #[error("invalid import file: {reason}")]
    InvalidImport { reason: String },

    #[error("invalid grade file: {reason}")]
    InvalidGradeFile { reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl RubricaError {
    /// Create an error for a failed operation
    pub fn failed(operation: &str, error: impl std::fmt::Display) -> Self {
        RubricaError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        RubricaError::Validation {
            reason: reason.into(),
        }
    }

    /// Create an import parse error
    pub fn import(reason: impl Into<String>) -> Self {
        RubricaError::InvalidImport {
            reason: reason.into(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RubricaError::UnknownFormat(_) | RubricaError::UsageError(_) => ExitCode::Usage,

            RubricaError::StoreNotFound { .. }
            | RubricaError::InvalidStore { .. }
            | RubricaError::RubricNotFound { .. }
            | RubricaError::CourseNotFound { .. }
            | RubricaError::EvaluationNotFound { .. }
            | RubricaError::MissingCode { .. }
            | RubricaError::Validation { .. }
            | RubricaError::InvalidImport { .. }
            | RubricaError::InvalidGradeFile { .. } => ExitCode::Data,

            RubricaError::Io(_)
            | RubricaError::Json(_)
            | RubricaError::Toml(_)
            | RubricaError::Csv(_)
            | RubricaError::FailedOperation { .. }
            | RubricaError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier used in JSON output
    fn error_type(&self) -> &'static str {
        match self {
            RubricaError::UnknownFormat(_) => "unknown_format",
            RubricaError::UsageError(_) => "usage_error",
            RubricaError::StoreNotFound { .. } => "store_not_found",
            RubricaError::InvalidStore { .. } => "invalid_store",
            RubricaError::RubricNotFound { .. } => "rubric_not_found",
            RubricaError::CourseNotFound { .. } => "course_not_found",
            RubricaError::EvaluationNotFound { .. } => "evaluation_not_found",
            RubricaError::MissingCode { .. } => "missing_code",
            RubricaError::Validation { .. } => "validation",
            RubricaError::InvalidImport { .. } => "invalid_import",
            RubricaError::InvalidGradeFile { .. } => "invalid_grade_file",
            RubricaError::Io(_) => "io_error",
            RubricaError::Json(_) => "json_error",
            RubricaError::Toml(_) => "toml_error",
            RubricaError::Csv(_) => "csv_error",
            RubricaError::FailedOperation { .. } => "failed_operation",
            RubricaError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for rubrica operations
pub type Result<T> = std::result::Result<T, RubricaError>;
