//! Data models for ring geometry and machine limits
//!
//! This module provides:
//! - Ring cut parameters as produced by the segmentation engine
//! - Angular slices of a ring
//! - Jig alignment (ring-local polar frame to machine frame)
//! - The rectangular machine working envelope
//! - Material feed tables

pub mod materials;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Cut parameters for one concentric ring of a rosette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    /// Ring identifier within the rosette
    pub ring_id: u32,
    /// Centre-line radius of the ring (mm)
    pub radius_mm: f64,
    /// Radial width of the ring (mm)
    pub width_mm: f64,
    /// Target tangential length of one tile (mm)
    #[serde(default)]
    pub tile_length_mm: f64,
    /// Width of material removed by the cutter (mm)
    #[serde(default)]
    pub kerf_mm: f64,
    /// Herringbone lay angle (degrees)
    #[serde(default)]
    pub herringbone_angle_deg: f64,
    /// Twist applied to the tile pattern (degrees)
    #[serde(default)]
    pub twist_angle_deg: f64,
    /// Number of tiles around the ring, when the segmentation engine knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_count: Option<u32>,
}

impl RingConfig {
    /// Create a ring with the given radius and width, zero kerf and no angles.
    pub fn new(ring_id: u32, radius_mm: f64, width_mm: f64) -> Self {
        Self {
            ring_id,
            radius_mm,
            width_mm,
            tile_length_mm: 0.0,
            kerf_mm: 0.0,
            herringbone_angle_deg: 0.0,
            twist_angle_deg: 0.0,
            tile_count: None,
        }
    }

    /// Set the kerf width
    pub fn with_kerf(mut self, kerf_mm: f64) -> Self {
        self.kerf_mm = kerf_mm;
        self
    }

    /// Set the target tile length
    pub fn with_tile_length(mut self, tile_length_mm: f64) -> Self {
        self.tile_length_mm = tile_length_mm;
        self
    }

    /// Set the known tile count
    pub fn with_tile_count(mut self, tile_count: u32) -> Self {
        self.tile_count = Some(tile_count);
        self
    }

    /// Radius of the ring's outer edge
    pub fn outer_radius_mm(&self) -> f64 {
        self.radius_mm + self.width_mm.max(0.0) / 2.0
    }

    /// Check radius and kerf are non-negative and finite
    pub fn validate(&self) -> Result<()> {
        if !self.radius_mm.is_finite() || self.radius_mm < 0.0 {
            return Err(Error::invalid_geometry(
                "radius_mm",
                format!("must be a non-negative number, got {}", self.radius_mm),
            ));
        }
        if !self.kerf_mm.is_finite() || self.kerf_mm < 0.0 {
            return Err(Error::invalid_geometry(
                "kerf_mm",
                format!("must be a non-negative number, got {}", self.kerf_mm),
            ));
        }
        Ok(())
    }
}

/// One angular wedge of a ring, in ring-local degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub start_angle_deg: f64,
    pub end_angle_deg: f64,
    /// Overrides the ring radius for this slice only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_mm: Option<f64>,
}

impl Slice {
    /// Creates a slice that follows the ring radius.
    pub fn new(start_angle_deg: f64, end_angle_deg: f64) -> Self {
        Self {
            start_angle_deg,
            end_angle_deg,
            radius_mm: None,
        }
    }

    /// Creates a slice with its own radius. The radius must be positive.
    pub fn with_radius_override(
        start_angle_deg: f64,
        end_angle_deg: f64,
        radius_mm: f64,
    ) -> Result<Self> {
        let slice = Self {
            start_angle_deg,
            end_angle_deg,
            radius_mm: Some(radius_mm),
        };
        slice.validate()?;
        Ok(slice)
    }

    /// Splits a full turn into `count` contiguous, equal wedges starting at `start_deg`.
    pub fn equal_divisions(count: usize, start_deg: f64) -> Vec<Self> {
        if count == 0 {
            return Vec::new();
        }
        let step = 360.0 / count as f64;
        (0..count)
            .map(|i| {
                let start = start_deg + step * i as f64;
                Self::new(start, start + step)
            })
            .collect()
    }

    /// Radius used for this slice: the override if present, else the ring radius.
    pub fn effective_radius(&self, ring_radius_mm: f64) -> f64 {
        self.radius_mm.unwrap_or(ring_radius_mm)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(r) = self.radius_mm {
            if !r.is_finite() || r <= 0.0 {
                return Err(Error::invalid_geometry(
                    "radius_mm",
                    format!("slice radius override must be positive, got {}", r),
                ));
            }
        }
        Ok(())
    }
}

/// Which point of the ring the jig origin refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JigDatum {
    /// Lower-left corner of the ring's bounding square
    #[default]
    Corner,
    /// Ring centre
    Centre,
}

/// Physical offset and rotation of the cutting jig relative to machine origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JigAlignment {
    pub origin_x_mm: f64,
    pub origin_y_mm: f64,
    pub rotation_deg: f64,
}

impl JigAlignment {
    pub fn new(origin_x_mm: f64, origin_y_mm: f64, rotation_deg: f64) -> Self {
        Self {
            origin_x_mm,
            origin_y_mm,
            rotation_deg,
        }
    }

    /// Maps a ring-local polar point into machine XY.
    ///
    /// `x = ox + r·cos(θ + rot)`, `y = oy + r·sin(θ + rot)` with angles in degrees.
    pub fn polar_to_machine(&self, radius_mm: f64, angle_deg: f64) -> (f64, f64) {
        let theta = (angle_deg + self.rotation_deg).to_radians();
        (
            self.origin_x_mm + radius_mm * theta.cos(),
            self.origin_y_mm + radius_mm * theta.sin(),
        )
    }

    /// Alignment whose origin is the ring centre, for a ring of
    /// `outer_radius_mm` held against this jig at `datum`.
    ///
    /// Rotation is about the ring centre, so a corner datum keeps the whole
    /// ring inside `origin .. origin + 2 * outer_radius_mm` on both axes.
    pub fn ring_centred(&self, datum: JigDatum, outer_radius_mm: f64) -> Self {
        match datum {
            JigDatum::Centre => *self,
            JigDatum::Corner => Self {
                origin_x_mm: self.origin_x_mm + outer_radius_mm,
                origin_y_mm: self.origin_y_mm + outer_radius_mm,
                rotation_deg: self.rotation_deg,
            },
        }
    }

    pub fn is_finite(&self) -> bool {
        self.origin_x_mm.is_finite()
            && self.origin_y_mm.is_finite()
            && self.rotation_deg.is_finite()
    }
}

/// Rectangular machine working volume (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineEnvelope {
    pub x_min_mm: f64,
    pub x_max_mm: f64,
    pub y_min_mm: f64,
    pub y_max_mm: f64,
    pub z_min_mm: f64,
    pub z_max_mm: f64,
}

impl MachineEnvelope {
    /// Create an envelope, rejecting any axis whose minimum exceeds its maximum
    pub fn new(
        x: (f64, f64),
        y: (f64, f64),
        z: (f64, f64),
    ) -> Result<Self> {
        let envelope = Self {
            x_min_mm: x.0,
            x_max_mm: x.1,
            y_min_mm: y.0,
            y_max_mm: y.1,
            z_min_mm: z.0,
            z_max_mm: z.1,
        };
        envelope.validate()?;
        Ok(envelope)
    }

    pub fn validate(&self) -> Result<()> {
        let axes = [
            ("x", self.x_min_mm, self.x_max_mm),
            ("y", self.y_min_mm, self.y_max_mm),
            ("z", self.z_min_mm, self.z_max_mm),
        ];
        for (axis, min, max) in axes {
            if min > max {
                return Err(Error::invalid_geometry(
                    axis,
                    format!("min {} exceeds max {}", min, max),
                ));
            }
        }
        Ok(())
    }

    /// Check if a point lies inside the envelope (bounds inclusive)
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        x >= self.x_min_mm
            && x <= self.x_max_mm
            && y >= self.y_min_mm
            && y <= self.y_max_mm
            && z >= self.z_min_mm
            && z <= self.z_max_mm
    }

    /// Get per-axis limit violations for a point
    pub fn violations(&self, x: f64, y: f64, z: f64) -> Vec<String> {
        let mut violations = Vec::new();

        if x < self.x_min_mm {
            violations.push(format!("X below minimum: {:.3} < {:.3}", x, self.x_min_mm));
        }
        if x > self.x_max_mm {
            violations.push(format!("X above maximum: {:.3} > {:.3}", x, self.x_max_mm));
        }
        if y < self.y_min_mm {
            violations.push(format!("Y below minimum: {:.3} < {:.3}", y, self.y_min_mm));
        }
        if y > self.y_max_mm {
            violations.push(format!("Y above maximum: {:.3} > {:.3}", y, self.y_max_mm));
        }
        if z < self.z_min_mm {
            violations.push(format!("Z below minimum: {:.3} < {:.3}", z, self.z_min_mm));
        }
        if z > self.z_max_mm {
            violations.push(format!("Z above maximum: {:.3} > {:.3}", z, self.z_max_mm));
        }

        violations
    }
}

impl Default for MachineEnvelope {
    fn default() -> Self {
        Self {
            x_min_mm: 0.0,
            x_max_mm: 1000.0,
            y_min_mm: 0.0,
            y_max_mm: 1000.0,
            z_min_mm: -50.0,
            z_max_mm: 0.0,
        }
    }
}
