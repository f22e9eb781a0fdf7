use crate::id::{ArtifactId, TaskId};
use crate::snapshot::GeneticSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an evolution task.
///
/// `Pending` and `InProgress` are the only non-terminal statuses; once a task
/// reaches any other status it is never mutated again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Rejected,
    Reverted,
    AwaitingReview,
    AwaitingVisualReview,
    Paused,
    Error,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Reverted => "reverted",
            Self::AwaitingReview => "awaiting_review",
            Self::AwaitingVisualReview => "awaiting_visual_review",
            Self::Paused => "paused",
            Self::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Expected live state after a committed change, checked by live verification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationIntent {
    /// What the change is expected to look like when live.
    pub description: String,
    /// Key/value pairs that must appear in the telemetry live state.
    pub expected: serde_json::Map<String, serde_json::Value>,
}

impl VerificationIntent {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected: serde_json::Map::new(),
        }
    }

    pub fn expecting(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.expected.insert(key.into(), value);
        self
    }
}

/// Mutable record of one pipeline attempt to apply a proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolutionTask {
    pub id: TaskId,
    pub goal: String,
    pub target_artifact: ArtifactId,
    pub status: TaskStatus,
    /// Human-readable outcome; with `status`, the sole user-facing contract.
    pub result: Option<String>,
    pub changes_applied: Vec<String>,
    pub verification_intent: Option<VerificationIntent>,
    pub verification_attempts: u32,
    /// Pre-change artifact contents, captured before any mutation. Used
    /// exclusively for rollback.
    pub snapshot: Option<GeneticSnapshot>,
}

impl EvolutionTask {
    pub fn new(goal: impl Into<String>, target_artifact: ArtifactId) -> Self {
        Self {
            id: TaskId::generate(),
            goal: goal.into(),
            target_artifact,
            status: TaskStatus::Pending,
            result: None,
            changes_applied: Vec::new(),
            verification_intent: None,
            verification_attempts: 0,
            snapshot: None,
        }
    }

    pub fn with_verification_intent(mut self, intent: VerificationIntent) -> Self {
        self.verification_intent = Some(intent);
        self
    }
}
