use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Outcome of sandboxed validation of a proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SandboxResult {
    pub passed: bool,
    pub checks_passed: usize,
    pub checks_total: usize,
    pub syntax_valid: bool,
    pub imports_valid: bool,
    pub errors: Vec<String>,
}

impl SandboxResult {
    pub fn passing(checks: usize) -> Self {
        Self {
            passed: true,
            checks_passed: checks,
            checks_total: checks,
            syntax_valid: true,
            imports_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn failing(checks_passed: usize, checks_total: usize, errors: Vec<String>) -> Self {
        Self {
            passed: false,
            checks_passed,
            checks_total,
            syntax_valid: true,
            imports_valid: true,
            errors,
        }
    }
}

/// Outcome of the perception gate ("mirror" check).
///
/// `immortality_passed` is a hard veto independent of the accuracy score:
/// `success` holds only when the veto passed *and* accuracy met the threshold.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PerceptionReport {
    pub success: bool,
    pub accuracy: f64,
    pub immortality_passed: bool,
    pub metrics: HashMap<String, f64>,
    pub issues: Vec<String>,
}

impl PerceptionReport {
    /// Build a report, deriving `success` from the veto and the threshold so
    /// the invariant cannot be violated at construction.
    pub fn evaluate(
        accuracy: f64,
        immortality_passed: bool,
        accuracy_min: f64,
        metrics: HashMap<String, f64>,
        issues: Vec<String>,
    ) -> Self {
        let accuracy = accuracy.clamp(0.0, 1.0);
        Self {
            success: immortality_passed && accuracy >= accuracy_min,
            accuracy,
            immortality_passed,
            metrics,
            issues,
        }
    }
}

/// Risk level assigned by the reviewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Verdict produced by the reviewer collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewVerdict {
    pub approved: bool,
    pub risk: RiskLevel,
    pub confidence: f64,
    pub reasoning: String,
    pub issues: Vec<String>,
    pub requires_human_review: bool,
}

impl ReviewVerdict {
    pub fn approved(risk: RiskLevel, confidence: f64) -> Self {
        Self {
            approved: true,
            risk,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: String::new(),
            issues: Vec::new(),
            requires_human_review: risk == RiskLevel::High,
        }
    }

    pub fn rejected(reasoning: impl Into<String>, issues: Vec<String>) -> Self {
        Self {
            approved: false,
            risk: RiskLevel::High,
            confidence: 0.0,
            reasoning: reasoning.into(),
            issues,
            requires_human_review: true,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_human_review(mut self, required: bool) -> Self {
        self.requires_human_review = required;
        self
    }
}

/// Post-commit health verdict for one commit at one tier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonitoringResult {
    pub commit_id: String,
    pub tier: Tier,
    pub healthy: bool,
    pub regression_failures: Vec<String>,
    pub visual_anomalies: Vec<String>,
    pub performance_degradations: Vec<String>,
}

impl MonitoringResult {
    pub fn healthy(commit_id: impl Into<String>, tier: Tier) -> Self {
        Self {
            commit_id: commit_id.into(),
            tier,
            healthy: true,
            regression_failures: Vec::new(),
            visual_anomalies: Vec::new(),
            performance_degradations: Vec::new(),
        }
    }

    pub fn unhealthy(commit_id: impl Into<String>, tier: Tier) -> Self {
        Self {
            commit_id: commit_id.into(),
            tier,
            healthy: false,
            regression_failures: Vec::new(),
            visual_anomalies: Vec::new(),
            performance_degradations: Vec::new(),
        }
    }

    pub fn with_regressions(mut self, failures: Vec<String>) -> Self {
        self.healthy = self.healthy && failures.is_empty();
        self.regression_failures = failures;
        self
    }

    pub fn with_visual_anomalies(mut self, anomalies: Vec<String>) -> Self {
        self.healthy = self.healthy && anomalies.is_empty();
        self.visual_anomalies = anomalies;
        self
    }

    pub fn with_degradations(mut self, degradations: Vec<String>) -> Self {
        self.healthy = self.healthy && degradations.is_empty();
        self.performance_degradations = degradations;
        self
    }

    /// All issues across categories, in detection order.
    pub fn issues(&self) -> Vec<String> {
        self.regression_failures
            .iter()
            .chain(self.visual_anomalies.iter())
            .chain(self.performance_degradations.iter())
            .cloned()
            .collect()
    }
}

/// Action taken when post-commit monitoring reports a regression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryAction {
    AutoRevert,
    PauseEvolution,
    Escalate,
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoRevert => write!(f, "auto_revert"),
            Self::PauseEvolution => write!(f, "pause_evolution"),
            Self::Escalate => write!(f, "escalate"),
        }
    }
}
