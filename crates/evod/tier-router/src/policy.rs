use serde::{Deserialize, Serialize};

/// Thresholds and denylists consulted by the tier router.
///
/// All values are configuration; the defaults below are a starting point, not
/// policy baked into the classifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouterPolicy {
    /// Artifact-id fragments that always demand human review.
    pub denylist: Vec<String>,
    /// Reviewer confidence below this floor demands human review.
    pub confidence_floor: f64,
    /// Changes above this many lines are at least Tier 2.
    pub tier2_lines: usize,
    /// Changes touching more than this many artifacts are at least Tier 2.
    pub tier2_artifacts: usize,
}

impl Default for RouterPolicy {
    fn default() -> Self {
        Self {
            denylist: vec![
                "orchestrator".into(),
                "recovery".into(),
                "breaker".into(),
            ],
            confidence_floor: 0.6,
            tier2_lines: 50,
            tier2_artifacts: 2,
        }
    }
}

impl RouterPolicy {
    pub fn with_denylist(mut self, denylist: Vec<String>) -> Self {
        self.denylist = denylist;
        self
    }

    pub fn with_confidence_floor(mut self, floor: f64) -> Self {
        self.confidence_floor = floor;
        self
    }
}
