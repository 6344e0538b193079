//! Ring toolpath generation.
//!
//! Converts ordered angular slices into linear machine-coordinate moves
//! through the jig alignment. The caller's slice order is the cutting order
//! and is never rearranged here.

use rosettecam_core::{JigAlignment, RingConfig, Slice, ToolpathPlan, ToolpathSegment};

/// One segment per slice at a fixed Z depth.
///
/// Segment indices equal slice positions.
pub fn build_ring_toolpaths(
    ring: &RingConfig,
    slices: &[Slice],
    jig: &JigAlignment,
    z_depth_mm: f64,
    feed_mm_min: f64,
) -> ToolpathPlan {
    build_ring_toolpaths_multipass(ring, slices, jig, &[z_depth_mm], feed_mm_min)
}

/// The single-pass geometry repeated for each Z depth, in the order given.
///
/// Indices run on across passes so every segment in the plan has its own.
pub fn build_ring_toolpaths_multipass(
    ring: &RingConfig,
    slices: &[Slice],
    jig: &JigAlignment,
    z_depths_mm: &[f64],
    feed_mm_min: f64,
) -> ToolpathPlan {
    if slices.is_empty() || z_depths_mm.is_empty() {
        tracing::warn!(
            ring_id = ring.ring_id,
            slices = slices.len(),
            passes = z_depths_mm.len(),
            "nothing to cut, returning empty toolpath plan"
        );
        return ToolpathPlan::empty(ring.ring_id);
    }

    let mut segments = Vec::with_capacity(slices.len() * z_depths_mm.len());
    for &z in z_depths_mm {
        for slice in slices {
            let radius = slice.effective_radius(ring.radius_mm);
            let (x0, y0) = jig.polar_to_machine(radius, slice.start_angle_deg);
            let (x1, y1) = jig.polar_to_machine(radius, slice.end_angle_deg);
            segments.push(ToolpathSegment::new(
                segments.len(),
                (x0, y0, z),
                (x1, y1, z),
                feed_mm_min,
            ));
        }
    }

    tracing::debug!(
        ring_id = ring.ring_id,
        segments = segments.len(),
        passes = z_depths_mm.len(),
        "built ring toolpath plan"
    );
    ToolpathPlan::new(ring.ring_id, segments)
}
