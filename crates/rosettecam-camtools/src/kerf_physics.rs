//! Angular effect of kerf width on a ring.
//!
//! Each cut removes `kerf_mm` of arc length, which at radius `r` is an angle
//! of `kerf / r` radians. Around a ring of `n` tiles that error accumulates
//! into a cumulative drift of `n` kerf angles.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Derived angular kerf quantities for one ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KerfPhysicsResult {
    pub kerf_mm: f64,
    pub kerf_angle_deg: f64,
    pub drift_total_deg: f64,
}

/// Kerf angle and cumulative drift for a ring.
///
/// A non-positive radius yields a zero angle (and therefore zero drift).
/// Drift is zero when the tile count is unknown.
pub fn compute_kerf_physics(
    kerf_mm: f64,
    radius_mm: f64,
    tile_count: Option<u32>,
) -> KerfPhysicsResult {
    let kerf_angle_deg = if radius_mm <= 0.0 {
        0.0
    } else {
        (kerf_mm / radius_mm) * (180.0 / PI)
    };
    let drift_total_deg = tile_count.map_or(0.0, |n| kerf_angle_deg * n as f64);

    KerfPhysicsResult {
        kerf_mm,
        kerf_angle_deg,
        drift_total_deg,
    }
}

/// Tiles of `tile_length_mm` that fit around the circumference, rounded down.
pub fn estimate_tile_count(radius_mm: f64, tile_length_mm: f64) -> Option<u32> {
    if !(radius_mm > 0.0 && tile_length_mm > 0.0) {
        return None;
    }
    let count = (2.0 * PI * radius_mm / tile_length_mm).floor();
    if count.is_finite() && count >= 1.0 && count <= u32::MAX as f64 {
        Some(count as u32)
    } else {
        None
    }
}
