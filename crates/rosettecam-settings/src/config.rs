//! Job file model
//!
//! A job file describes one ring export: ring geometry, slicing, jig,
//! machine and post settings. Files are JSON or TOML, chosen by extension.

use crate::error::{SettingsError, SettingsResult};
use rosettecam_camtools::{PostOverrides, RingExportRequest, DEFAULT_CUT_DEPTH_MM};
use rosettecam_core::{JigAlignment, JigDatum, MachineEnvelope, RingConfig, Slice};
use rosettecam_devicedb::require_machine_config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "rosettecam";

/// On-disk job file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => Err(SettingsError::UnsupportedFormat(other.to_string())),
            None => Err(SettingsError::UnsupportedFormat(
                "job file must be .json or .toml".to_string(),
            )),
        }
    }
}

fn default_material() -> String {
    "hardwood".to_string()
}

fn default_cut_depth() -> f64 {
    DEFAULT_CUT_DEPTH_MM
}

/// One ring export job.
///
/// Scalar settings come before the nested tables so the TOML form reads top down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default = "default_material")]
    pub material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
    #[serde(default = "default_cut_depth")]
    pub cut_depth_mm: f64,
    #[serde(default)]
    pub multipass: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_feed_mm_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_drift_deg: Option<f64>,
    /// Equal divisions of a full turn, used when `slices` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_count: Option<usize>,
    /// Start angle of the first equal division (degrees)
    #[serde(default)]
    pub slice_start_deg: f64,
    #[serde(default)]
    pub jig_datum: JigDatum,
    pub ring: RingConfig,
    /// Explicit slices, cut in the order listed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slices: Vec<Slice>,
    #[serde(default)]
    pub jig: JigAlignment,
    #[serde(default)]
    pub envelope: MachineEnvelope,
    #[serde(default)]
    pub post: PostOverrides,
}

impl JobConfig {
    /// A job cutting `ring` into `slice_count` equal slices with default settings.
    pub fn with_equal_slices(ring: RingConfig, slice_count: usize) -> Self {
        Self {
            ring,
            slices: Vec::new(),
            slice_count: Some(slice_count),
            slice_start_deg: 0.0,
            jig: JigAlignment::default(),
            jig_datum: JigDatum::default(),
            envelope: MachineEnvelope::default(),
            material: default_material(),
            machine_id: None,
            cut_depth_mm: DEFAULT_CUT_DEPTH_MM,
            multipass: false,
            max_feed_mm_min: None,
            max_drift_deg: None,
            post: PostOverrides::default(),
        }
    }

    /// Load and validate a job file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), ring_id = config.ring.ring_id, "loaded job file");
        Ok(config)
    }

    /// Validate, then save to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("failed to write {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Validate job settings
    pub fn validate(&self) -> SettingsResult<()> {
        match (self.slices.is_empty(), self.slice_count) {
            (false, Some(_)) => {
                return Err(SettingsError::invalid_setting(
                    "slice_count",
                    "give either slices or slice_count, not both",
                ));
            }
            (true, None) => {
                return Err(SettingsError::invalid_setting(
                    "slices",
                    "a job needs slices or a slice_count",
                ));
            }
            (true, Some(0)) => {
                return Err(SettingsError::invalid_setting(
                    "slice_count",
                    "must be at least 1",
                ));
            }
            _ => {}
        }

        if !self.slice_start_deg.is_finite() {
            return Err(SettingsError::invalid_setting(
                "slice_start_deg",
                "must be a finite angle",
            ));
        }

        if let Some(id) = &self.machine_id {
            require_machine_config(id)?;
        }

        self.to_request().validate()?;
        Ok(())
    }

    /// Slices to cut, in order.
    pub fn resolved_slices(&self) -> Vec<Slice> {
        if self.slices.is_empty() {
            Slice::equal_divisions(self.slice_count.unwrap_or(0), self.slice_start_deg)
        } else {
            self.slices.clone()
        }
    }

    /// Export request for this job.
    pub fn to_request(&self) -> RingExportRequest {
        RingExportRequest {
            ring: self.ring.clone(),
            slices: self.resolved_slices(),
            jig: self.jig,
            jig_datum: self.jig_datum,
            envelope: self.envelope,
            material: self.material.clone(),
            machine_id: self.machine_id.clone(),
            cut_depth_mm: self.cut_depth_mm,
            multipass: self.multipass,
            max_feed_mm_min: self.max_feed_mm_min,
            max_drift_deg: self.max_drift_deg,
            post: self.post.clone(),
        }
    }

    pub fn into_request(self) -> RingExportRequest {
        self.to_request()
    }
}

/// Platform config directory for RosetteCAM, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

/// Find a job file: the path itself if it exists, else the same relative
/// path under `<config dir>/jobs`.
pub fn locate_job_file(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    if path.is_absolute() {
        return None;
    }
    let candidate = default_config_dir()?.join("jobs").join(path);
    candidate.exists().then_some(candidate)
}
