use crate::id::{ArtifactId, ProposalId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A proposed change to one or more artifacts.
///
/// Proposals are immutable once created; the orchestrator owns one for the
/// lifetime of a single evolution attempt. The diff payload is supplied by an
/// external reasoning collaborator and is treated as opaque here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Human-readable goal of the change.
    pub goal: String,
    /// Artifacts the change touches.
    pub target_artifacts: Vec<ArtifactId>,
    /// Unified diff payload.
    pub diff: String,
    /// Open metadata map.
    pub metadata: HashMap<String, String>,
    /// Whether the change touches perception-sensitive logic and must pass
    /// the perception gate before review.
    pub affects_perception: bool,
    /// Approximate size of the change, used by the tier router.
    pub lines_changed: usize,
}

impl Proposal {
    pub fn new(goal: impl Into<String>, target_artifacts: Vec<ArtifactId>) -> Self {
        Self {
            id: ProposalId::generate(),
            goal: goal.into(),
            target_artifacts,
            diff: String::new(),
            metadata: HashMap::new(),
            affects_perception: false,
            lines_changed: 0,
        }
    }

    pub fn with_id(mut self, id: ProposalId) -> Self {
        self.id = id;
        self
    }

    pub fn with_diff(mut self, diff: impl Into<String>) -> Self {
        let diff = diff.into();
        self.lines_changed = diff.lines().count();
        self.diff = diff;
        self
    }

    pub fn with_lines_changed(mut self, lines: usize) -> Self {
        self.lines_changed = lines;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn affecting_perception(mut self) -> Self {
        self.affects_perception = true;
        self
    }
}
