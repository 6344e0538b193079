//! Coarse runtime estimate for a toolpath plan.
//!
//! Runtime is proportional to the sum of inverse feeds, not to distance
//! travelled. It ranks jobs against each other; it is not a cycle-time model.
//!
//! The simulator does not check the machine envelope: `envelope_ok` is always
//! `true`. Envelope safety comes from [`crate::safety::evaluate_cnc_safety`].

use rosettecam_core::ToolpathPlan;
use serde::{Deserialize, Serialize};

const RUNTIME_SCALE: f64 = 1000.0;

/// Runtime estimate for one plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CNCSimulationResult {
    pub passes: u32,
    pub estimated_runtime_sec: f64,
    pub max_feed_mm_min: f64,
    pub envelope_ok: bool,
    /// Straight-line length of every segment, for reference only
    pub total_cut_length_mm: f64,
}

pub fn simulate_toolpaths(
    plan: &ToolpathPlan,
    default_passes: u32,
    feed_scaling: f64,
) -> CNCSimulationResult {
    let inverse_feed_sum: f64 = plan
        .segments
        .iter()
        .filter(|s| s.is_cutting())
        .map(|s| 1.0 / s.feed_mm_min)
        .sum();
    let estimated_runtime_sec = inverse_feed_sum * RUNTIME_SCALE * feed_scaling.max(0.0);
    let max_feed_mm_min = plan.max_feed().unwrap_or(0.0).max(0.0);

    let result = CNCSimulationResult {
        passes: default_passes,
        estimated_runtime_sec,
        max_feed_mm_min,
        envelope_ok: true,
        total_cut_length_mm: plan.total_length_mm(),
    };
    tracing::debug!(
        ring_id = plan.ring_id,
        runtime_sec = result.estimated_runtime_sec,
        max_feed = result.max_feed_mm_min,
        "simulated toolpath plan"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosettecam_core::ToolpathSegment;

    fn plan(feeds: &[f64]) -> ToolpathPlan {
        let (start, end) = ((0.0, 0.0, 0.0), (10.0, 0.0, 0.0));
        let segments = feeds
            .iter()
            .enumerate()
            .map(|(i, &f)| ToolpathSegment::new(i, start, end, f))
            .collect();
        ToolpathPlan::new(1, segments)
    }

    #[test]
    fn test_runtime_is_inverse_feed_sum() {
        let r = simulate_toolpaths(&plan(&[500.0, 1000.0]), 1, 1.0);
        // (1/500 + 1/1000) * 1000 = 3
        assert!((r.estimated_runtime_sec - 3.0).abs() < 1e-12);
        assert_eq!(r.max_feed_mm_min, 1000.0);
        assert_eq!(r.passes, 1);
        assert!((r.total_cut_length_mm - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_feed_scaling_multiplies_runtime() {
        let base = simulate_toolpaths(&plan(&[600.0; 8]), 1, 1.0);
        let scaled = simulate_toolpaths(&plan(&[600.0; 8]), 1, 2.5);
        assert!(
            (scaled.estimated_runtime_sec - base.estimated_runtime_sec * 2.5).abs() < 1e-9
        );
    }

    #[test]
    fn test_zero_feed_segments_are_skipped() {
        let r = simulate_toolpaths(&plan(&[0.0, 1000.0, -5.0]), 2, 1.0);
        assert!((r.estimated_runtime_sec - 1.0).abs() < 1e-12);
        assert_eq!(r.passes, 2);
    }

    #[test]
    fn test_empty_plan() {
        let r = simulate_toolpaths(&ToolpathPlan::empty(1), 1, 1.0);
        assert_eq!(r.estimated_runtime_sec, 0.0);
        assert_eq!(r.max_feed_mm_min, 0.0);
        assert!(r.envelope_ok);
    }

    #[test]
    fn test_negative_scaling_clamps_runtime() {
        let r = simulate_toolpaths(&plan(&[600.0]), 1, -1.0);
        assert_eq!(r.estimated_runtime_sec, 0.0);
    }

    #[test]
    fn test_envelope_ok_even_for_out_of_range_geometry() {
        let seg = ToolpathSegment::new(0, (-1e6, 0.0, 100.0), (1e6, 0.0, 100.0), 600.0);
        let far = ToolpathPlan::new(1, vec![seg]);
        assert!(simulate_toolpaths(&far, 1, 1.0).envelope_ok);
    }
}
