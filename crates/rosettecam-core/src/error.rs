//! Error handling for RosetteCAM core types
//!
//! The pipeline functions are total, so errors only surface when a caller
//! constructs geometry through the checked constructors.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for RosetteCAM core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Geometry rejected by a checked constructor
    #[error("Invalid geometry for {field}: {reason}")]
    InvalidGeometry {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a geometry error for a named field
    pub fn invalid_geometry(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidGeometry {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::InvalidGeometry { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
