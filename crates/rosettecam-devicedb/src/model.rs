use crate::error::{ProfileError, ProfileResult};
use serde::{Deserialize, Serialize};

/// Controller-specific G-code syntax variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GCodeDialect {
    /// GRBL-style: `;` comments, no program number
    Generic,
    /// FANUC-style: `O####` program number, parenthesised comments
    Fanuc,
}

impl Default for GCodeDialect {
    fn default() -> Self {
        Self::Generic
    }
}

impl std::fmt::Display for GCodeDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic => write!(f, "generic"),
            Self::Fanuc => write!(f, "fanuc"),
        }
    }
}

impl std::str::FromStr for GCodeDialect {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "grbl" => Ok(Self::Generic),
            "fanuc" => Ok(Self::Fanuc),
            other => Err(ProfileError::UnknownDialect(other.to_string())),
        }
    }
}

/// Hardware-tuned G-code defaults for one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub machine_id: String,
    pub name: String,
    pub dialect: GCodeDialect,
    /// Clearance height for rapid moves (mm)
    pub default_safe_z_mm: f64,
    pub default_tool_id: u32,
    /// Program number emitted as `O####` by dialects that use one
    pub program_number: Option<u32>,
}

impl MachineConfig {
    pub fn validate(&self) -> ProfileResult<()> {
        if self.machine_id.trim().is_empty() {
            return Err(ProfileError::MissingField("machine_id".to_string()));
        }
        if !self.default_safe_z_mm.is_finite() {
            return Err(ProfileError::ValueOutOfRange {
                field: "default_safe_z_mm".to_string(),
                value: self.default_safe_z_mm.to_string(),
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
