//! One-call ring export: slices in, G-code and bundle out.
//!
//! Stages run strictly downstream:
//! feed rule → kerf physics → toolpath plan → safety → simulation →
//! post resolution → G-code → bundle.

use crate::error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
use crate::export_bundle::{build_export_bundle, CNCExportBundle};
use crate::gcode_export::generate_gcode_from_toolpaths;
use crate::kerf_physics::{compute_kerf_physics, estimate_tile_count, KerfPhysicsResult};
use crate::multipass::{plan_pass_depths, MultiPassConfig, MAX_PASSES};
use crate::ring_toolpath::build_ring_toolpaths_multipass;
use crate::safety::evaluate_cnc_safety;
use crate::simulation::{simulate_toolpaths, CNCSimulationResult};
use rosettecam_core::{
    select_feed_rule, FeedRule, JigAlignment, JigDatum, MachineEnvelope, RingConfig, Slice,
};
use rosettecam_devicedb::{
    resolve_post_config, GCodeDialect, GCodePostConfig, DEFAULT_SAFE_Z_MM, DEFAULT_TOOL_ID,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};
use std::path::{Path, PathBuf};

pub const DEFAULT_CUT_DEPTH_MM: f64 = 1.0;

/// Post settings a caller may pin for one job. Unset fields come from the
/// feed rule and the post defaults, then the machine profile applies on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<GCodeDialect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spindle_rpm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_z_mm: Option<f64>,
}

impl PostOverrides {
    /// Per-call post config before machine precedence.
    pub fn base_config(&self, rule: &FeedRule) -> GCodePostConfig {
        GCodePostConfig {
            dialect: self.dialect.unwrap_or_default(),
            program_number: self.program_number,
            safe_z_mm: self.safe_z_mm.unwrap_or(DEFAULT_SAFE_Z_MM),
            spindle_rpm: self.spindle_rpm.unwrap_or(rule.spindle_rpm),
            tool_id: self.tool_id.unwrap_or(DEFAULT_TOOL_ID),
        }
    }
}

/// Everything the caller supplies for one ring export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingExportRequest {
    pub ring: RingConfig,
    pub slices: Vec<Slice>,
    pub jig: JigAlignment,
    /// Point of the ring the jig origin refers to
    pub jig_datum: JigDatum,
    pub envelope: MachineEnvelope,
    pub material: String,
    pub machine_id: Option<String>,
    /// Depth below the stock surface (mm, positive)
    pub cut_depth_mm: f64,
    /// Step down in passes no deeper than the material allows
    pub multipass: bool,
    pub max_feed_mm_min: Option<f64>,
    pub max_drift_deg: Option<f64>,
    pub post: PostOverrides,
}

impl RingExportRequest {
    pub fn new(ring: RingConfig, slices: Vec<Slice>) -> Self {
        Self {
            ring,
            slices,
            jig: JigAlignment::default(),
            jig_datum: JigDatum::default(),
            envelope: MachineEnvelope::default(),
            material: "hardwood".to_string(),
            machine_id: None,
            cut_depth_mm: DEFAULT_CUT_DEPTH_MM,
            multipass: false,
            max_feed_mm_min: None,
            max_drift_deg: None,
            post: PostOverrides::default(),
        }
    }

    /// Check the request against the data-model invariants.
    pub fn validate(&self) -> ParameterResult<()> {
        self.ring.validate()?;
        for slice in &self.slices {
            slice.validate()?;
        }
        self.envelope.validate()?;
        if !self.jig.is_finite() {
            return Err(ParameterError::InvalidValue {
                name: "jig".to_string(),
                reason: "origin and rotation must be finite".to_string(),
            });
        }
        if !self.cut_depth_mm.is_finite() || self.cut_depth_mm < 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "cut_depth_mm".to_string(),
                value: self.cut_depth_mm,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        if let Some(feed) = self.max_feed_mm_min {
            if !(feed > 0.0) {
                return Err(ParameterError::InvalidValue {
                    name: "max_feed_mm_min".to_string(),
                    reason: format!("must be positive, got {}", feed),
                });
            }
        }
        if let Some(drift) = self.max_drift_deg {
            if !(drift >= 0.0) {
                return Err(ParameterError::InvalidValue {
                    name: "max_drift_deg".to_string(),
                    reason: format!("must be non-negative, got {}", drift),
                });
            }
        }
        let rule = select_feed_rule(&self.material);
        if self.multipass {
            let passes = MultiPassConfig::new(self.cut_depth_mm, rule.max_z_step_mm)
                .calculate_passes();
            if passes > MAX_PASSES {
                return Err(ParameterError::OutOfRange {
                    name: "cut_depth_mm".to_string(),
                    value: self.cut_depth_mm,
                    min: 0.0,
                    max: f64::from(MAX_PASSES) * rule.max_z_step_mm,
                });
            }
        }
        self.post.base_config(&rule).validate()?;
        Ok(())
    }

    /// Largest radius any slice is cut at, or the ring's outer edge.
    pub fn outer_radius_mm(&self) -> f64 {
        self.slices
            .iter()
            .filter_map(|s| s.radius_mm)
            .fold(self.ring.outer_radius_mm(), f64::max)
    }

    /// Jig alignment in the ring-centre frame the toolpath builder expects.
    pub fn centred_jig(&self) -> JigAlignment {
        self.jig.ring_centred(self.jig_datum, self.outer_radius_mm())
    }

    /// Z levels to cut, shallowest first.
    pub fn z_depths(&self, rule: &FeedRule) -> Vec<f64> {
        if self.multipass {
            plan_pass_depths(self.cut_depth_mm, rule.max_z_step_mm)
        } else {
            vec![-self.cut_depth_mm.abs()]
        }
    }
}

/// Artifacts produced for one ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingExportResult {
    pub bundle: CNCExportBundle,
    pub simulation: CNCSimulationResult,
    pub kerf: KerfPhysicsResult,
    pub feed_rule: FeedRule,
    pub post: GCodePostConfig,
    pub gcode: String,
}

/// Files written by [`RingExportResult::write_to_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub gcode: PathBuf,
    pub bundle: PathBuf,
}

impl RingExportResult {
    /// Write `<ring_id>.nc` and `<ring_id>.bundle.json` into `dir`, creating it if needed.
    pub fn write_to_dir(&self, dir: &Path) -> CamToolResult<ExportPaths> {
        if dir.exists() && !dir.is_dir() {
            return Err(CamToolError::OutputDirectory(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        std::fs::create_dir_all(dir)?;

        let ring_id = self.bundle.ring_id;
        let paths = ExportPaths {
            gcode: dir.join(format!("{}.nc", ring_id)),
            bundle: dir.join(format!("{}.bundle.json", ring_id)),
        };
        std::fs::write(&paths.gcode, &self.gcode)?;
        std::fs::write(&paths.bundle, self.bundle.to_json_pretty()?)?;

        tracing::info!(
            gcode = %paths.gcode.display(),
            bundle = %paths.bundle.display(),
            "wrote ring export"
        );
        Ok(paths)
    }
}

/// Run the full pipeline for one ring.
///
/// Total over well-formed requests; run [`RingExportRequest::validate`] first
/// when the request comes from outside.
pub fn export_ring(request: &RingExportRequest) -> RingExportResult {
    let span = tracing::info_span!("export_ring", ring_id = request.ring.ring_id);
    let _guard = span.enter();

    let rule = select_feed_rule(&request.material);

    let ring = &request.ring;
    let slice_count = u32::try_from(request.slices.len()).ok().filter(|n| *n > 0);
    let tile_count = ring
        .tile_count
        .or_else(|| estimate_tile_count(ring.radius_mm, ring.tile_length_mm))
        .or(slice_count);
    let kerf = compute_kerf_physics(ring.kerf_mm, ring.radius_mm, tile_count);

    let z_depths = request.z_depths(&rule);
    let plan = build_ring_toolpaths_multipass(
        ring,
        &request.slices,
        &request.centred_jig(),
        &z_depths,
        rule.recommended_feed_mm_min,
    );

    let safety = evaluate_cnc_safety(
        &plan,
        &request.envelope,
        Some(&kerf),
        request.max_feed_mm_min,
        request.max_drift_deg,
    );

    let passes = u32::try_from(z_depths.len()).unwrap_or(u32::MAX);
    let simulation = simulate_toolpaths(&plan, passes, 1.0);

    let base_post = request.post.base_config(&rule);
    let post = resolve_post_config(request.machine_id.as_deref(), base_post);
    let gcode = generate_gcode_from_toolpaths(&plan, &post);

    let mut extra = Map::new();
    extra.insert("material".to_string(), json!(rule.material));
    extra.insert("jig_datum".to_string(), json!(request.jig_datum));
    extra.insert("dialect".to_string(), json!(post.dialect.to_string()));
    extra.insert("passes".to_string(), json!(passes));
    extra.insert("kerf_angle_deg".to_string(), json!(kerf.kerf_angle_deg));
    extra.insert("drift_total_deg".to_string(), json!(kerf.drift_total_deg));
    extra.insert(
        "estimated_runtime_sec".to_string(),
        json!(simulation.estimated_runtime_sec),
    );
    let bundle = build_export_bundle(plan, request.jig, safety).with_extra_metadata(extra);

    tracing::info!(
        segments = bundle.toolpaths.len(),
        decision = %bundle.safety.decision,
        risk = %bundle.safety.risk_level,
        runtime_sec = simulation.estimated_runtime_sec,
        "ring export complete"
    );

    RingExportResult {
        bundle,
        simulation,
        kerf,
        feed_rule: rule,
        post,
        gcode,
    }
}
