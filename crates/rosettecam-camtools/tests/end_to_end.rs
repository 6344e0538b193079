use rosettecam_camtools::*;
use rosettecam_core::{JigAlignment, MachineEnvelope, RingConfig, Slice};
use rosettecam_devicedb::GCodeDialect;

fn scenario_request() -> RingExportRequest {
    let mut request = RingExportRequest::new(
        RingConfig::new(1, 45.0, 3.0).with_kerf(0.3),
        Slice::equal_divisions(8, 0.0),
    );
    request.jig = JigAlignment::new(0.0, 0.0, 0.0);
    request.envelope = MachineEnvelope::default();
    request.material = "hardwood".to_string();
    request.machine_id = None;
    request
}

#[test]
fn test_reference_ring_export() {
    let request = scenario_request();
    request.validate().unwrap();
    let result = export_ring(&request);

    assert_eq!(result.bundle.toolpaths.len(), 8);
    assert_eq!(result.bundle.ring_id, 1);
    assert_eq!(result.bundle.safety.decision, SafetyDecision::Allow);
    assert_eq!(result.bundle.safety.risk_level, RiskLevel::Low);
    assert!(!result.bundle.safety.requires_override);
    assert!(result.simulation.envelope_ok);
    assert_eq!(result.simulation.passes, 1);

    let gcode = &result.gcode;
    assert_eq!(gcode.lines().filter(|l| *l == "G21").count(), 1);
    assert_eq!(gcode.lines().filter(|l| *l == "G90").count(), 1);
    assert!(gcode.lines().any(|l| l == "T1 M6"));
    assert!(gcode.ends_with("M30"));
}

#[test]
fn test_reference_ring_cuts_at_one_millimetre_with_hardwood_feed() {
    let result = export_ring(&scenario_request());
    for seg in &result.bundle.toolpaths.segments {
        assert_eq!(seg.z_start_mm, -1.0);
        assert_eq!(seg.z_end_mm, -1.0);
        assert_eq!(seg.feed_mm_min, 600.0);
    }
    assert_eq!(result.post.spindle_rpm, 18000);
    assert!(result.gcode.contains("M3 S18000"));
    // 8 cuts at 600 mm/min
    assert!(
        (result.simulation.estimated_runtime_sec - 8.0 * 1000.0 / 600.0).abs() < 1e-9
    );
}

#[test]
fn test_reference_ring_metadata() {
    let result = export_ring(&scenario_request());
    let meta = &result.bundle.metadata;
    assert_eq!(meta["segment_count"], 8);
    assert_eq!(meta["jig_origin"]["x_mm"], 0.0);
    assert_eq!(meta["safety"]["decision"], "allow");
    assert_eq!(meta["jig_datum"], "corner");
}

#[test]
fn test_ring_off_the_table_is_blocked() {
    let mut request = scenario_request();
    request.jig_datum = rosettecam_core::JigDatum::Centre;
    let result = export_ring(&request);

    assert_eq!(result.bundle.safety.decision, SafetyDecision::Block);
    assert_eq!(result.bundle.safety.risk_level, RiskLevel::High);
    assert!(result.bundle.safety.requires_override);
    // the simulator does not look at the envelope
    assert!(result.simulation.envelope_ok);
    // G-code is still produced; refusing to run it is the caller's call
    assert!(result.gcode.ends_with("M30"));
}

#[test]
fn test_multipass_export_on_composite() {
    let mut request = scenario_request();
    request.material = "composite".to_string();
    request.multipass = true;
    request.cut_depth_mm = 1.5;
    let result = export_ring(&request);

    assert_eq!(result.simulation.passes, 3);
    assert_eq!(result.bundle.toolpaths.len(), 24);
    let last = result.bundle.toolpaths.segments.last().unwrap();
    assert_eq!(last.z_end_mm, -1.5);
    assert_eq!(last.segment_index, 23);
}

#[test]
fn test_feed_ceiling_below_recommended_requires_override() {
    let mut request = scenario_request();
    request.max_feed_mm_min = Some(500.0);
    let result = export_ring(&request);
    assert_eq!(
        result.bundle.safety.decision,
        SafetyDecision::OverrideRequired
    );
    assert_eq!(result.bundle.safety.risk_level, RiskLevel::Medium);
}

#[test]
fn test_feed_and_drift_together_are_high_risk() {
    let mut request = scenario_request();
    request.max_feed_mm_min = Some(500.0);
    request.max_drift_deg = Some(0.5);
    let result = export_ring(&request);
    // drift = 8 * 0.382 deg
    assert!(result.kerf.drift_total_deg > 3.0);
    assert_eq!(
        result.bundle.safety.decision,
        SafetyDecision::OverrideRequired
    );
    assert_eq!(result.bundle.safety.risk_level, RiskLevel::High);
    assert_eq!(result.bundle.safety.reasons.len(), 2);
}

#[test]
fn test_fanuc_machine_export() {
    let mut request = scenario_request();
    request.machine_id = Some("fanuc_router".to_string());
    let result = export_ring(&request);

    assert_eq!(result.post.dialect, GCodeDialect::Fanuc);
    assert_eq!(result.post.tool_id, 3);
    assert_eq!(result.post.safe_z_mm, 15.0);
    assert!(result.gcode.starts_with("O1001\n(ROSETTE RING 1)"));
    assert!(result.gcode.contains("T3 M6"));
    assert!(result.gcode.contains("G0 Z15.0000"));
    assert!(!result.gcode.contains(';'));
    assert_eq!(result.bundle.metadata["dialect"], "fanuc");
}

#[test]
fn test_explicit_tool_survives_machine_profile() {
    let mut request = scenario_request();
    request.machine_id = Some("fanuc_router".to_string());
    request.post.tool_id = Some(7);
    let result = export_ring(&request);
    assert_eq!(result.post.tool_id, 7);
    assert!(result.gcode.contains("T7 M6"));
}

#[test]
fn test_unknown_machine_falls_back_to_generic() {
    let mut request = scenario_request();
    request.machine_id = Some("no_such_machine".to_string());
    let result = export_ring(&request);
    assert_eq!(result.post.dialect, GCodeDialect::Generic);
    assert!(result.gcode.starts_with("; Rosette ring 1"));
}

#[test]
fn test_unknown_material_uses_generic_feed() {
    let mut request = scenario_request();
    request.material = "unobtainium".to_string();
    let result = export_ring(&request);
    assert_eq!(result.feed_rule.material, "generic");
    assert_eq!(result.bundle.toolpaths.segments[0].feed_mm_min, 500.0);
}

#[test]
fn test_no_slices_gives_empty_but_allowed_export() {
    let mut request = scenario_request();
    request.slices.clear();
    let result = export_ring(&request);
    assert!(result.bundle.toolpaths.is_empty());
    assert_eq!(result.bundle.safety.decision, SafetyDecision::Allow);
    assert_eq!(result.simulation.estimated_runtime_sec, 0.0);
    assert!(result.gcode.ends_with("M30"));
    // kerf drift is unknown without slices or a tile count
    assert_eq!(result.kerf.drift_total_deg, 0.0);
}

#[test]
fn test_bundle_written_as_json() {
    let result = export_ring(&scenario_request());
    let json = result.bundle.to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["ring_id"], 1);
    assert_eq!(value["safety"]["decision"], "allow");
    assert_eq!(value["toolpaths"]["segments"].as_array().unwrap().len(), 8);
    assert!(value["created_at"].is_string());
}
