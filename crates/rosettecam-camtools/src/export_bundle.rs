//! Export bundle assembly.
//!
//! The metadata map repeats the typed fields in a flat JSON form for report
//! and audit consumers. It holds no timestamps so the same inputs always give
//! the same metadata.

use crate::safety::CNCSafetyDecision;
use chrono::{DateTime, Utc};
use rosettecam_core::{JigAlignment, ToolpathPlan};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Everything exported for one ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CNCExportBundle {
    pub ring_id: u32,
    pub toolpaths: ToolpathPlan,
    pub jig_alignment: JigAlignment,
    pub safety: CNCSafetyDecision,
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

fn safety_snapshot(safety: &CNCSafetyDecision) -> Value {
    json!({
        "decision": safety.decision.as_str(),
        "risk_level": safety.risk_level.as_str(),
        "requires_override": safety.requires_override,
        "reasons": safety.reasons,
    })
}

/// Compose a bundle from an already-built plan and its safety decision.
pub fn build_export_bundle(
    plan: ToolpathPlan,
    jig: JigAlignment,
    safety: CNCSafetyDecision,
) -> CNCExportBundle {
    let mut metadata = Map::new();
    metadata.insert("segment_count".to_string(), json!(plan.len()));
    metadata.insert(
        "jig_origin".to_string(),
        json!({
            "x_mm": jig.origin_x_mm,
            "y_mm": jig.origin_y_mm,
            "rotation_deg": jig.rotation_deg,
        }),
    );
    metadata.insert("safety".to_string(), safety_snapshot(&safety));

    CNCExportBundle {
        ring_id: plan.ring_id,
        toolpaths: plan,
        jig_alignment: jig,
        safety,
        metadata,
        created_at: Utc::now(),
    }
}

impl CNCExportBundle {
    /// Pretty JSON for writing to disk.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Merge extra metadata entries without touching the required keys.
    pub fn with_extra_metadata(mut self, extra: Map<String, Value>) -> Self {
        for (key, value) in extra {
            if matches!(key.as_str(), "segment_count" | "jig_origin" | "safety") {
                continue;
            }
            self.metadata.insert(key, value);
        }
        self
    }
}
