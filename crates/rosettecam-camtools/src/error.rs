//! Error types for the CAM tools crate.
//!
//! The toolpath, safety, simulation and export stages are total. These
//! errors come from request validation run before the pipeline, and from
//! serialising its artifacts.

use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The output location cannot hold exported files.
    #[error("Output directory error: {0}")]
    OutputDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

impl From<rosettecam_core::Error> for ParameterError {
    fn from(err: rosettecam_core::Error) -> Self {
        match err {
            rosettecam_core::Error::InvalidGeometry { field, reason } => {
                ParameterError::InvalidValue {
                    name: field,
                    reason,
                }
            }
            other => ParameterError::InvalidDimensions(other.to_string()),
        }
    }
}

impl From<rosettecam_devicedb::ProfileError> for ParameterError {
    fn from(err: rosettecam_devicedb::ProfileError) -> Self {
        ParameterError::InvalidValue {
            name: "post".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
