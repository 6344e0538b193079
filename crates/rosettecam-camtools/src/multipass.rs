//! Multiple pass depth control for ring cuts.
//!
//! Splits a total cut depth into equal steps no deeper than the material's
//! per-pass limit. Depths are returned as machine Z, negative below the
//! stock surface.

/// Most passes a single ring cut may be split into.
pub const MAX_PASSES: u32 = 1000;

/// Configuration for multi-pass depth stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiPassConfig {
    /// Total depth below the surface (mm, positive)
    pub total_depth: f64,
    /// Largest allowed step per pass (mm); non-positive means one pass
    pub max_depth_per_pass: f64,
}

impl MultiPassConfig {
    /// Creates a new multi-pass configuration.
    pub fn new(total_depth: f64, max_depth_per_pass: f64) -> Self {
        Self {
            total_depth: total_depth.abs(),
            max_depth_per_pass,
        }
    }

    /// Calculates the number of passes needed.
    pub fn calculate_passes(&self) -> u32 {
        if !self.total_depth.is_finite() || self.total_depth == 0.0 {
            return 0;
        }
        if !(self.max_depth_per_pass > 0.0) {
            return 1;
        }
        ((self.total_depth / self.max_depth_per_pass).ceil()).max(1.0) as u32
    }

    /// Z for a 1-based pass number.
    pub fn calculate_pass_depth(&self, pass: u32) -> f64 {
        let passes = self.calculate_passes();
        if passes == 0 {
            return 0.0;
        }
        if pass >= passes {
            return -self.total_depth;
        }
        -self.total_depth * pass as f64 / passes as f64
    }

    /// Gets all pass depths, shallowest first.
    pub fn get_all_pass_depths(&self) -> Vec<f64> {
        let passes = self.calculate_passes();
        (1..=passes)
            .map(|pass| self.calculate_pass_depth(pass))
            .collect()
    }
}

/// Depth ladder from the surface down to `-total_depth_mm`.
pub fn plan_pass_depths(total_depth_mm: f64, max_step_mm: f64) -> Vec<f64> {
    MultiPassConfig::new(total_depth_mm, max_step_mm).get_all_pass_depths()
}
