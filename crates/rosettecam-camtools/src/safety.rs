//! CNC safety evaluation of a toolpath plan.
//!
//! Checks run in a fixed order: envelope, feed ceiling, kerf drift. An
//! envelope violation blocks the job and ends the evaluation. The other
//! checks can only raise the outcome; decision and risk are ordered enums
//! combined with `max`, so a later passing check never lowers them.

use crate::kerf_physics::KerfPhysicsResult;
use rosettecam_core::{MachineEnvelope, ToolpathPlan};
use serde::{Deserialize, Serialize};

/// Safety classification, ordered from least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyDecision {
    Allow,
    /// An operator must confirm before the job runs
    OverrideRequired,
    Block,
}

impl SafetyDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::OverrideRequired => "override-required",
            Self::Block => "block",
        }
    }
}

impl std::fmt::Display for SafetyDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a safety evaluation, with reasons in the order they were found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CNCSafetyDecision {
    pub decision: SafetyDecision,
    pub risk_level: RiskLevel,
    pub requires_override: bool,
    pub reasons: Vec<String>,
}

impl CNCSafetyDecision {
    pub fn allow() -> Self {
        Self {
            decision: SafetyDecision::Allow,
            risk_level: RiskLevel::Low,
            requires_override: false,
            reasons: Vec::new(),
        }
    }

    /// Raise decision and risk to at least the given levels.
    pub fn escalate(&mut self, decision: SafetyDecision, risk: RiskLevel) {
        self.decision = self.decision.max(decision);
        self.risk_level = self.risk_level.max(risk);
        self.requires_override = self.decision != SafetyDecision::Allow;
    }

    pub fn is_blocked(&self) -> bool {
        self.decision == SafetyDecision::Block
    }
}

impl Default for CNCSafetyDecision {
    fn default() -> Self {
        Self::allow()
    }
}

/// Evaluate whether a plan is safe to run on a machine.
pub fn evaluate_cnc_safety(
    plan: &ToolpathPlan,
    envelope: &MachineEnvelope,
    kerf: Option<&KerfPhysicsResult>,
    max_feed_mm_min: Option<f64>,
    max_drift_deg: Option<f64>,
) -> CNCSafetyDecision {
    let mut result = CNCSafetyDecision::allow();

    for seg in &plan.segments {
        for (label, (x, y, z)) in [("start", seg.start()), ("end", seg.end())] {
            if envelope.contains(x, y, z) {
                continue;
            }
            result.reasons.push(format!(
                "Segment {} {} point ({:.3}, {:.3}, {:.3}) outside machine envelope: {}",
                seg.segment_index,
                label,
                x,
                y,
                z,
                envelope.violations(x, y, z).join("; ")
            ));
        }
    }
    if !result.reasons.is_empty() {
        result.escalate(SafetyDecision::Block, RiskLevel::High);
        tracing::warn!(
            ring_id = plan.ring_id,
            violations = result.reasons.len(),
            "toolpath leaves machine envelope, blocking"
        );
        return result;
    }

    if let (Some(ceiling), Some(observed)) = (max_feed_mm_min, plan.max_feed()) {
        if observed > ceiling {
            result.escalate(SafetyDecision::OverrideRequired, RiskLevel::Medium);
            result.reasons.push(format!(
                "Feed rate {:.1} mm/min exceeds limit {:.1} mm/min",
                observed, ceiling
            ));
        }
    }

    if let (Some(limit), Some(kerf)) = (max_drift_deg, kerf) {
        if kerf.drift_total_deg > limit {
            let risk = if result.decision == SafetyDecision::OverrideRequired {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            };
            result.escalate(SafetyDecision::OverrideRequired, risk);
            result.reasons.push(format!(
                "Cumulative kerf drift {:.3} deg exceeds limit {:.3} deg",
                kerf.drift_total_deg, limit
            ));
        }
    }

    if result.decision == SafetyDecision::Allow {
        tracing::debug!(ring_id = plan.ring_id, "toolpath passed safety checks");
    } else {
        tracing::warn!(
            ring_id = plan.ring_id,
            decision = %result.decision,
            risk = %result.risk_level,
            "toolpath requires operator override"
        );
    }
    result
}
