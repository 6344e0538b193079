//! Error types for the device database crate.
//!
//! This module provides structured error types for machine profile lookup
//! and post-processor configuration validation.

use thiserror::Error;

/// Errors that can occur during machine profile operations.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The requested profile was not found.
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// A profile validation error occurred.
    #[error("Validation error: {0}")]
    Validation(#[from] ProfileError),
}

/// Errors related to machine profile and post configuration validation.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A required field is missing or empty.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The dialect name is unknown or unsupported.
    #[error("Unknown G-code dialect: {0}")]
    UnknownDialect(String),

    /// A numeric value is out of valid range.
    #[error("Value out of range for '{field}': {value}")]
    ValueOutOfRange { field: String, value: String },
}

/// Result type alias for device management operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Result type alias for profile validation operations.
pub type ProfileResult<T> = Result<T, ProfileError>;
