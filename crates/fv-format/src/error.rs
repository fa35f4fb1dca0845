//! Error types for formatting and configuration.

use fv_core::{FvError, ValidationError};
use thiserror::Error;

/// Result type for formatting operations.
pub type FormatResult<T> = Result<T, FormatError>;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] FvError),

    /// Malformed positional pattern.
    #[error("Invalid template: {what}")]
    InvalidTemplate { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
