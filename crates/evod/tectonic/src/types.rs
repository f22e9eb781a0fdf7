use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a tectonic shift was started.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerReason {
    /// The live metric degraded past the trigger threshold.
    Degradation { current_metric: f64 },
    /// Explicit operator request.
    Manual,
    /// Periodic scheduled attempt.
    Scheduled,
}

impl fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degradation { current_metric } => {
                write!(f, "degradation (current metric {:.3})", current_metric)
            }
            Self::Manual => write!(f, "manual"),
            Self::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// Outcome of one generational optimization run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TectonicShiftResult {
    pub success: bool,
    pub trigger: TriggerReason,
    pub generations_run: usize,
    pub baseline_metric: f64,
    pub final_metric: f64,
    /// (final - baseline) / baseline.
    pub improvement: f64,
    /// Champion fitness after each generation, for monotonicity auditing.
    pub champion_trace: Vec<f64>,
    pub best_candidate_id: Option<String>,
    pub best_source: Option<String>,
}
