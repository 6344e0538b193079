//! # RosetteCAM Device Database
//!
//! Built-in machine profiles and the precedence rules that merge a profile
//! with per-job post-processor settings.

pub mod error;
pub mod model;
pub mod post;
pub mod registry;

pub use error::{DeviceError, DeviceResult, ProfileError, ProfileResult};
pub use model::{GCodeDialect, MachineConfig};
pub use post::{resolve_post_config, GCodePostConfig, DEFAULT_SAFE_Z_MM, DEFAULT_TOOL_ID};
pub use registry::{get_machine_config, list_machine_configs, require_machine_config};
