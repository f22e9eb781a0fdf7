use serde::{Deserialize, Serialize};

/// Pure predicate deciding whether a live metric has degraded enough to
/// attempt a tectonic shift. Polled by an external scheduler; no side
/// effects, no state beyond the recorded baseline.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ShiftTrigger {
    /// Recorded healthy value of the primary metric (higher is better).
    pub baseline: f64,
    /// Relative degradation that signals a shift, e.g. 0.1 for 10%.
    pub degradation_threshold: f64,
}

impl ShiftTrigger {
    pub fn new(baseline: f64) -> Self {
        Self {
            baseline,
            degradation_threshold: 0.1,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.degradation_threshold = threshold;
        self
    }

    /// Should a shift be attempted given the current live metric?
    pub fn should_trigger(&self, current: f64) -> bool {
        if self.baseline <= 0.0 {
            return false;
        }
        (self.baseline - current) / self.baseline >= self.degradation_threshold
    }
}
