//! # RosetteCAM Core
//!
//! Core types shared by every stage of the rosette ring pipeline.
//! Provides the ring/slice geometry handed over by the segmentation engine,
//! the machine-coordinate toolpath model, and the material feed tables.

pub mod data;
pub mod error;
pub mod toolpath;

pub use data::materials::{
    builtin_feed_rules, fallback_feed_rule, select_feed_rule, FeedRule, MaterialCategory,
};
pub use data::{JigAlignment, JigDatum, MachineEnvelope, RingConfig, Slice};

pub use error::{Error, Result};

pub use toolpath::{ToolpathPlan, ToolpathSegment};
