//! RosetteCAM Settings Crate
//!
//! Loads, validates and saves ring export job files.

pub mod config;
pub mod error;

pub use config::{default_config_dir, locate_job_file, ConfigFormat, JobConfig, CONFIG_DIR_NAME};
pub use error::{SettingsError, SettingsResult};
