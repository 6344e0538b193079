use proptest::prelude::*;
use rosettecam_camtools::*;
use rosettecam_core::{
    JigAlignment, MachineEnvelope, RingConfig, Slice, ToolpathPlan, ToolpathSegment,
};

fn envelope() -> MachineEnvelope {
    MachineEnvelope::default()
}

fn arb_point() -> impl Strategy<Value = (f64, f64, f64)> {
    (-200.0..1200.0f64, -200.0..1200.0f64, -80.0..20.0f64)
}

fn arb_plan() -> impl Strategy<Value = ToolpathPlan> {
    prop::collection::vec((arb_point(), arb_point(), 1.0..3000.0f64), 0..12).prop_map(|raw| {
        ToolpathPlan::new(
            1,
            raw.into_iter()
                .enumerate()
                .map(|(i, (s, e, f))| ToolpathSegment::new(i, s, e, f))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn prop_multipass_indices_are_dense_and_increasing(
        slice_count in 1usize..24,
        depths in prop::collection::vec(-10.0..0.0f64, 1..6),
    ) {
        let ring = RingConfig::new(1, 40.0, 2.0);
        let slices = Slice::equal_divisions(slice_count, 0.0);
        let plan = build_ring_toolpaths_multipass(
            &ring, &slices, &JigAlignment::new(500.0, 500.0, 0.0), &depths, 600.0,
        );
        prop_assert_eq!(plan.len(), slice_count * depths.len());
        for (i, seg) in plan.segments.iter().enumerate() {
            prop_assert_eq!(seg.segment_index, i);
        }
    }

    #[test]
    fn prop_pass_depths_end_at_total_and_respect_step(
        total in 0.01..20.0f64,
        step in 0.05..5.0f64,
    ) {
        let depths = plan_pass_depths(total, step);
        prop_assert!(!depths.is_empty());
        prop_assert_eq!(*depths.last().unwrap(), -total);
        let mut previous = 0.0;
        for z in depths {
            prop_assert!(z < previous);
            prop_assert!(previous - z <= step + 1e-9);
            previous = z;
        }
    }

    #[test]
    fn prop_envelope_violation_always_blocks(
        plan in arb_plan(),
        feed_limit in prop::option::of(1.0..3000.0f64),
        drift_limit in prop::option::of(0.0..10.0f64),
        tiles in prop::option::of(1u32..500),
    ) {
        let env = envelope();
        let outside = plan.segments.iter().any(|s| {
            let (x0, y0, z0) = s.start();
            let (x1, y1, z1) = s.end();
            !env.contains(x0, y0, z0) || !env.contains(x1, y1, z1)
        });
        let kerf = compute_kerf_physics(0.3, 45.0, tiles);
        let d = evaluate_cnc_safety(&plan, &env, Some(&kerf), feed_limit, drift_limit);
        if outside {
            prop_assert_eq!(d.decision, SafetyDecision::Block);
            prop_assert_eq!(d.risk_level, RiskLevel::High);
            prop_assert!(d.requires_override);
        } else {
            prop_assert!(d.decision != SafetyDecision::Block);
        }
    }

    #[test]
    fn prop_adding_limits_never_lowers_the_outcome(
        plan in arb_plan(),
        feed_limit in 1.0..3000.0f64,
        drift_limit in 0.0..10.0f64,
        tiles in 1u32..500,
    ) {
        let env = envelope();
        let kerf = compute_kerf_physics(0.3, 45.0, Some(tiles));
        let none = evaluate_cnc_safety(&plan, &env, Some(&kerf), None, None);
        let feed = evaluate_cnc_safety(&plan, &env, Some(&kerf), Some(feed_limit), None);
        let both =
            evaluate_cnc_safety(&plan, &env, Some(&kerf), Some(feed_limit), Some(drift_limit));
        prop_assert!(feed.decision >= none.decision);
        prop_assert!(feed.risk_level >= none.risk_level);
        prop_assert!(both.decision >= feed.decision);
        prop_assert!(both.risk_level >= feed.risk_level);
        prop_assert_eq!(both.requires_override, both.decision != SafetyDecision::Allow);
    }

    #[test]
    fn prop_gcode_has_one_unit_and_mode_line(plan in arb_plan()) {
        let post = rosettecam_devicedb::GCodePostConfig::default();
        let gcode = generate_gcode_from_toolpaths(&plan, &post);
        prop_assert_eq!(gcode.lines().filter(|l| *l == "G21").count(), 1);
        prop_assert_eq!(gcode.lines().filter(|l| *l == "G90").count(), 1);
        prop_assert!(gcode.ends_with("M30"));
        // one final cut line per segment
        let cuts = gcode.lines().filter(|l| l.starts_with("G1 X")).count();
        prop_assert_eq!(cuts, plan.len());
    }
}
