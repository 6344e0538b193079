//! Built-in machine profiles.
//!
//! The table is built on first access and never mutated afterwards.

use crate::error::{DeviceError, DeviceResult};
use crate::model::{GCodeDialect, MachineConfig};
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn machine_table() -> &'static BTreeMap<String, MachineConfig> {
    static MACHINES: OnceLock<BTreeMap<String, MachineConfig>> = OnceLock::new();
    MACHINES.get_or_init(|| {
        let machines = [
            MachineConfig {
                machine_id: "grbl_generic".to_string(),
                name: "Generic GRBL router".to_string(),
                dialect: GCodeDialect::Generic,
                default_safe_z_mm: 5.0,
                default_tool_id: 1,
                program_number: None,
            },
            MachineConfig {
                machine_id: "shapeoko_xxl".to_string(),
                name: "Shapeoko XXL".to_string(),
                dialect: GCodeDialect::Generic,
                default_safe_z_mm: 8.0,
                default_tool_id: 1,
                program_number: None,
            },
            MachineConfig {
                machine_id: "fanuc_router".to_string(),
                name: "FANUC-controlled production router".to_string(),
                dialect: GCodeDialect::Fanuc,
                default_safe_z_mm: 15.0,
                default_tool_id: 3,
                program_number: Some(1001),
            },
        ];
        machines
            .into_iter()
            .map(|m| (m.machine_id.clone(), m))
            .collect()
    })
}

/// Look up a machine profile by id.
pub fn get_machine_config(machine_id: &str) -> Option<&'static MachineConfig> {
    let found = machine_table().get(machine_id);
    tracing::debug!(
        machine_id,
        found = found.is_some(),
        "machine profile lookup"
    );
    found
}

/// Like [`get_machine_config`], but an unknown id is an error.
pub fn require_machine_config(machine_id: &str) -> DeviceResult<&'static MachineConfig> {
    get_machine_config(machine_id)
        .ok_or_else(|| DeviceError::ProfileNotFound(machine_id.to_string()))
}

/// All built-in profiles, ordered by id.
pub fn list_machine_configs() -> Vec<&'static MachineConfig> {
    machine_table().values().collect()
}
