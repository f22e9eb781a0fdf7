use serde::{Deserialize, Serialize};

/// Score of one candidate kernel variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FitnessScore {
    pub candidate_id: String,
    /// Primary performance metric (throughput, higher is better).
    pub throughput: f64,
    /// Secondary metric (latency in milliseconds, lower is better).
    pub latency_ms: f64,
    pub correct: bool,
    /// Weighted combination of normalized metrics; exactly 0.0 whenever
    /// `correct` is false.
    pub fitness: f64,
    pub errors: Vec<String>,
}

impl FitnessScore {
    /// A score for a candidate that failed before any metric was produced.
    pub fn invalid(candidate_id: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            throughput: 0.0,
            latency_ms: 0.0,
            correct: false,
            fitness: 0.0,
            errors,
        }
    }
}
