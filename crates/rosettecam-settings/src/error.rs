//! Error types for the settings crate.
//!
//! This module provides structured error types for job file loading,
//! saving and validation.

use rosettecam_camtools::ParameterError;
use rosettecam_devicedb::DeviceError;
use thiserror::Error;

/// Errors that can occur while handling job files.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The job file could not be loaded.
    #[error("Failed to load job file: {0}")]
    LoadError(String),

    /// The job file could not be saved.
    #[error("Failed to save job file: {0}")]
    SaveError(String),

    /// The file extension is not one we read or write.
    #[error("Unsupported job file format: {0}")]
    UnsupportedFormat(String),

    /// A job setting is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// The job names a machine that has no profile.
    #[error("Machine error: {0}")]
    Device(#[from] DeviceError),

    /// Ring, slice, envelope or post values failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ParameterError),
}

impl SettingsError {
    pub fn invalid_setting(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
