use crate::error::CollaboratorError;
use async_trait::async_trait;
use evod_types::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, RwLock};
use tracing::debug;

/// Phase-transition and result events broadcast to the visualization sink.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineEvent {
    PhaseEntered { task: TaskId, phase: String },
    TaskFinished { task: TaskId, status: TaskStatus },
    RegressionDetected { commit_id: String, issues: Vec<String> },
}

/// Best-effort telemetry sink plus the live-state feed used by verification.
///
/// `broadcast` is fire-and-forget: implementations must swallow their own
/// failures, and the pipeline never blocks on them.
#[async_trait]
pub trait Telemetry: Send + Sync {
    fn broadcast(&self, event: &PipelineEvent);

    /// Current live system state, for comparing against a verification
    /// intent after a commit.
    async fn live_state(&self) -> Result<serde_json::Value, CollaboratorError>;
}

/// Telemetry sink that drops events and has no live feed.
pub struct NullTelemetry;

#[async_trait]
impl Telemetry for NullTelemetry {
    fn broadcast(&self, event: &PipelineEvent) {
        debug!(?event, "telemetry sink offline, event dropped");
    }

    async fn live_state(&self) -> Result<serde_json::Value, CollaboratorError> {
        Err(CollaboratorError::Unavailable(
            "no live telemetry feed".into(),
        ))
    }
}

/// Recording telemetry for tests and simulation.
pub struct SimulatedTelemetry {
    events: Mutex<Vec<PipelineEvent>>,
    live: RwLock<serde_json::Value>,
}

impl SimulatedTelemetry {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            live: RwLock::new(serde_json::json!({})),
        }
    }

    pub fn with_live_state(self, live: serde_json::Value) -> Self {
        *self.live.write().expect("lock not poisoned") = live;
        self
    }

    pub fn set_live_state(&self, live: serde_json::Value) {
        *self.live.write().expect("lock not poisoned") = live;
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().expect("lock not poisoned").clone()
    }
}

impl Default for SimulatedTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Telemetry for SimulatedTelemetry {
    fn broadcast(&self, event: &PipelineEvent) {
        self.events
            .lock()
            .expect("lock not poisoned")
            .push(event.clone());
    }

    async fn live_state(&self) -> Result<serde_json::Value, CollaboratorError> {
        Ok(self.live.read().expect("lock not poisoned").clone())
    }
}
