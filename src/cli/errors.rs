//! CLI-specific error types.
//!
//! Every CLI failure terminates the process with a non-zero status; the
//! codes below give each failure mode a stable string for scripts that
//! parse stderr.

use std::fmt;

use crate::container::ContainerError;
use crate::schema::SchemaError;

/// CLI error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// The container snapshot could not be opened or parsed.
    ContainerError,
    /// The schema file could not be loaded or is invalid.
    SchemaError,
    /// Validation ran and the dataset failed.
    DatasetInvalid,
    /// Output could not be produced.
    OutputError,
}

impl CliErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContainerError => "SPINVAL_CLI_CONTAINER_ERROR",
            Self::SchemaError => "SPINVAL_CLI_SCHEMA_ERROR",
            Self::DatasetInvalid => "SPINVAL_CLI_DATASET_INVALID",
            Self::OutputError => "SPINVAL_CLI_OUTPUT_ERROR",
        }
    }
}

/// CLI error.
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The dataset failed validation.
    pub fn dataset_invalid(errors: usize, warnings: usize) -> Self {
        Self::new(
            CliErrorCode::DatasetInvalid,
            format!(
                "dataset failed validation with {} error(s), {} warning(s)",
                errors, warnings
            ),
        )
    }

    /// Output failure (serialization or terminal I/O).
    pub fn output_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::OutputError, msg)
    }

    /// Get the error code.
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ContainerError> for CliError {
    fn from(e: ContainerError) -> Self {
        Self::new(CliErrorCode::ContainerError, e.to_string())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, e.to_string())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
