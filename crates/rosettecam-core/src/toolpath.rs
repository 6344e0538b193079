//! Machine-coordinate toolpath model.

use serde::{Deserialize, Serialize};

/// One linear motion in machine coordinates (mm, mm/min).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolpathSegment {
    /// Position of this segment in the plan, unique across passes
    pub segment_index: usize,
    pub x_start_mm: f64,
    pub y_start_mm: f64,
    pub z_start_mm: f64,
    pub x_end_mm: f64,
    pub y_end_mm: f64,
    pub z_end_mm: f64,
    pub feed_mm_min: f64,
}

impl ToolpathSegment {
    /// Creates a new segment between two points.
    pub fn new(
        segment_index: usize,
        start: (f64, f64, f64),
        end: (f64, f64, f64),
        feed_mm_min: f64,
    ) -> Self {
        Self {
            segment_index,
            x_start_mm: start.0,
            y_start_mm: start.1,
            z_start_mm: start.2,
            x_end_mm: end.0,
            y_end_mm: end.1,
            z_end_mm: end.2,
            feed_mm_min,
        }
    }

    pub fn start(&self) -> (f64, f64, f64) {
        (self.x_start_mm, self.y_start_mm, self.z_start_mm)
    }

    pub fn end(&self) -> (f64, f64, f64) {
        (self.x_end_mm, self.y_end_mm, self.z_end_mm)
    }

    /// Straight-line length of the move.
    pub fn length_mm(&self) -> f64 {
        let dx = self.x_end_mm - self.x_start_mm;
        let dy = self.y_end_mm - self.y_start_mm;
        let dz = self.z_end_mm - self.z_start_mm;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Cutting moves carry a positive feed.
    pub fn is_cutting(&self) -> bool {
        self.feed_mm_min > 0.0
    }
}

/// Ordered segments for one ring. Segment order is motion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolpathPlan {
    pub ring_id: u32,
    pub segments: Vec<ToolpathSegment>,
}

impl ToolpathPlan {
    pub fn new(ring_id: u32, segments: Vec<ToolpathSegment>) -> Self {
        Self { ring_id, segments }
    }

    pub fn empty(ring_id: u32) -> Self {
        Self::new(ring_id, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Highest feed across all segments, `None` for an empty plan.
    pub fn max_feed(&self) -> Option<f64> {
        self.segments
            .iter()
            .map(|s| s.feed_mm_min)
            .fold(None, |acc, f| Some(acc.map_or(f, |m: f64| m.max(f))))
    }

    /// Sum of segment lengths.
    pub fn total_length_mm(&self) -> f64 {
        self.segments.iter().map(ToolpathSegment::length_mm).sum()
    }
}
