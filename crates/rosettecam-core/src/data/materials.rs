//! Material feed tables
//!
//! This module provides:
//! - Material categories used for rosette stock
//! - Fixed cutting parameters per category
//! - A total lookup that falls back to a generic rule for unknown stock

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

/// Material categories with built-in feed rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    /// Dense hardwoods (maple, ebony, rosewood)
    Hardwood,
    /// Softwoods and tonewoods (spruce, cedar)
    Softwood,
    /// Composites and laminates (fibre, veneer stacks, plastics)
    Composite,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 3] = [Self::Hardwood, Self::Softwood, Self::Composite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hardwood => "hardwood",
            Self::Softwood => "softwood",
            Self::Composite => "composite",
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaterialCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hardwood" => Ok(Self::Hardwood),
            "softwood" => Ok(Self::Softwood),
            "composite" => Ok(Self::Composite),
            other => Err(format!("Unknown material category: {}", other)),
        }
    }
}

/// Cutting parameters for one material category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRule {
    /// Category name, `generic` for the fallback rule
    pub material: String,
    /// Recommended cutting feed (mm/min)
    pub recommended_feed_mm_min: f64,
    /// Highest feed the stock tolerates (mm/min)
    pub max_feed_mm_min: f64,
    /// Spindle speed (RPM)
    pub spindle_rpm: u32,
    /// Maximum depth of a single pass (mm)
    pub max_z_step_mm: f64,
}

impl FeedRule {
    fn new(
        material: &str,
        recommended_feed_mm_min: f64,
        max_feed_mm_min: f64,
        spindle_rpm: u32,
        max_z_step_mm: f64,
    ) -> Self {
        Self {
            material: material.to_string(),
            recommended_feed_mm_min,
            max_feed_mm_min,
            spindle_rpm,
            max_z_step_mm,
        }
    }
}

pub const GENERIC_MATERIAL: &str = "generic";

fn feed_table() -> &'static HashMap<MaterialCategory, FeedRule> {
    static FEED_RULES: OnceLock<HashMap<MaterialCategory, FeedRule>> = OnceLock::new();
    FEED_RULES.get_or_init(|| {
        let mut table = HashMap::new();
        table.insert(
            MaterialCategory::Hardwood,
            FeedRule::new("hardwood", 600.0, 900.0, 18000, 1.0),
        );
        table.insert(
            MaterialCategory::Softwood,
            FeedRule::new("softwood", 900.0, 1400.0, 16000, 1.5),
        );
        table.insert(
            MaterialCategory::Composite,
            FeedRule::new("composite", 450.0, 700.0, 20000, 0.5),
        );
        table
    })
}

/// Rule handed out for any category not in the table
pub fn fallback_feed_rule() -> FeedRule {
    FeedRule::new(GENERIC_MATERIAL, 500.0, 800.0, 16000, 0.75)
}

/// Look up the feed rule for a material name.
///
/// Matching is case-insensitive. Unknown names get [`fallback_feed_rule`].
pub fn select_feed_rule(material: &str) -> FeedRule {
    match material.parse::<MaterialCategory>() {
        Ok(category) => feed_table()
            .get(&category)
            .cloned()
            .unwrap_or_else(fallback_feed_rule),
        Err(_) => {
            tracing::debug!(
                material,
                "no feed rule for material, using generic fallback"
            );
            fallback_feed_rule()
        }
    }
}

/// The built-in rules in category order
pub fn builtin_feed_rules() -> Vec<FeedRule> {
    MaterialCategory::ALL
        .iter()
        .filter_map(|c| feed_table().get(c).cloned())
        .collect()
}
