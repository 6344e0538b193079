//! Per-job post-processor settings and machine precedence.

use crate::error::{ProfileError, ProfileResult};
use crate::model::GCodeDialect;
use crate::registry::get_machine_config;
use serde::{Deserialize, Serialize};

/// Tool id a caller gets when it does not pick one.
///
/// A caller passing this value is treated as "not explicitly set" when a
/// machine profile recommends a different tool.
pub const DEFAULT_TOOL_ID: u32 = 1;
pub const DEFAULT_SAFE_Z_MM: f64 = 5.0;
const DEFAULT_SPINDLE_RPM: u32 = 18000;

/// Dialect plus per-job overrides for G-code emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GCodePostConfig {
    pub dialect: GCodeDialect,
    pub program_number: Option<u32>,
    pub safe_z_mm: f64,
    pub spindle_rpm: u32,
    pub tool_id: u32,
}

impl Default for GCodePostConfig {
    fn default() -> Self {
        Self {
            dialect: GCodeDialect::Generic,
            program_number: None,
            safe_z_mm: DEFAULT_SAFE_Z_MM,
            spindle_rpm: DEFAULT_SPINDLE_RPM,
            tool_id: DEFAULT_TOOL_ID,
        }
    }
}

impl GCodePostConfig {
    pub fn validate(&self) -> ProfileResult<()> {
        if !self.safe_z_mm.is_finite() {
            return Err(ProfileError::ValueOutOfRange {
                field: "safe_z_mm".to_string(),
                value: self.safe_z_mm.to_string(),
            });
        }
        if let Some(p) = self.program_number {
            if p > 9999 {
                return Err(ProfileError::ValueOutOfRange {
                    field: "program_number".to_string(),
                    value: p.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Apply a machine profile on top of per-call post settings.
///
/// A known machine supplies dialect, safe Z and (when it has one) program
/// number. Its tool id only replaces the caller's when the caller still holds
/// [`DEFAULT_TOOL_ID`]; a caller that deliberately wants tool 1 on a machine
/// recommending another tool cannot be told apart from one that left the
/// default. Unknown ids leave `base` untouched.
pub fn resolve_post_config(machine_id: Option<&str>, base: GCodePostConfig) -> GCodePostConfig {
    let Some(id) = machine_id else {
        return base;
    };
    let Some(machine) = get_machine_config(id) else {
        tracing::warn!(
            machine_id = id,
            "unknown machine id, using generic post settings"
        );
        return base;
    };

    let mut post = base;
    post.dialect = machine.dialect;
    post.safe_z_mm = machine.default_safe_z_mm;
    if let Some(program) = machine.program_number {
        post.program_number = Some(program);
    }
    if post.tool_id == DEFAULT_TOOL_ID {
        post.tool_id = machine.default_tool_id;
    }
    tracing::debug!(
        machine_id = id,
        dialect = %post.dialect,
        tool_id = post.tool_id,
        safe_z_mm = post.safe_z_mm,
        "resolved post config from machine profile"
    );
    post
}
