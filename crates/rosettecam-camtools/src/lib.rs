//! # RosetteCAM CAM Tools
//!
//! Turns segmented rosette rings into machine-ready output.
//!
//! ## Pipeline Stages
//!
//! - **Kerf Physics**: Angular kerf and cumulative drift around a ring
//! - **Ring Toolpath**: One linear cut per slice, optionally repeated per depth
//! - **Multi-pass**: Depth ladders bounded by the material's step limit
//! - **Safety**: Envelope, feed ceiling and drift evaluation
//! - **Simulation**: Coarse runtime estimate
//! - **G-code Export**: Generic and FANUC post-processors over one motion core
//! - **Export Bundle**: Plan, jig, safety and metadata for audit
//! - **Ring Export**: The whole chain in one call

pub mod error;
pub mod export_bundle;
pub mod gcode_export;
pub mod kerf_physics;
pub mod multipass;
pub mod ring_export;
pub mod ring_toolpath;
pub mod safety;
pub mod simulation;

pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use export_bundle::{build_export_bundle, CNCExportBundle};
pub use gcode_export::{
    generate_gcode_from_toolpaths, post_processor_for, FanucPost, GenericPost, PostProcessor,
};
pub use kerf_physics::{compute_kerf_physics, estimate_tile_count, KerfPhysicsResult};
pub use multipass::{plan_pass_depths, MultiPassConfig, MAX_PASSES};
pub use ring_export::{
    export_ring, ExportPaths, PostOverrides, RingExportRequest, RingExportResult,
    DEFAULT_CUT_DEPTH_MM,
};
pub use ring_toolpath::{build_ring_toolpaths, build_ring_toolpaths_multipass};
pub use safety::{evaluate_cnc_safety, CNCSafetyDecision, RiskLevel, SafetyDecision};
pub use simulation::{simulate_toolpaths, CNCSimulationResult};
