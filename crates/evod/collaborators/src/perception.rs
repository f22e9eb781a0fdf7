use crate::error::CollaboratorError;
use async_trait::async_trait;
use evod_types::{PerceptionReport, Proposal};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Runs the perception ("mirror") check for perception-sensitive proposals.
#[async_trait]
pub trait PerceptionProbe: Send + Sync {
    async fn validate(&self, proposal: &Proposal) -> Result<PerceptionReport, CollaboratorError>;
}

/// Wire format the isolated perception process prints on stdout.
#[derive(Debug, Deserialize)]
struct PerceptionWire {
    accuracy: f64,
    immortality_passed: bool,
    #[serde(default)]
    metrics: HashMap<String, f64>,
    #[serde(default)]
    issues: Vec<String>,
}

/// Perception probe that runs an external program in its own process.
///
/// The program receives the proposal as JSON on stdin and must print exactly
/// one JSON report on stdout. A non-zero exit or unparsable output is a hard
/// failure of the perception phase.
pub struct SubprocessPerceptionProbe {
    program: PathBuf,
    args: Vec<String>,
    accuracy_min: f64,
    timeout: Duration,
}

impl SubprocessPerceptionProbe {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            accuracy_min: 0.85,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_accuracy_min(mut self, min: f64) -> Self {
        self.accuracy_min = min;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PerceptionProbe for SubprocessPerceptionProbe {
    async fn validate(&self, proposal: &Proposal) -> Result<PerceptionReport, CollaboratorError> {
        use tokio::io::AsyncWriteExt;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            let payload = serde_json::to_vec(proposal)
                .map_err(|e| CollaboratorError::MalformedOutput(e.to_string()))?;
            // A probe that exits without reading its stdin closes the pipe;
            // that is its prerogative, not a pipeline failure.
            let _ = stdin.write_all(&payload).await;
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CollaboratorError::Timeout {
                phase: "perception".into(),
                timeout_ms: self.timeout.as_millis() as u64,
            })??;

        if !output.status.success() {
            return Err(CollaboratorError::ProcessFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(program = %self.program.display(), "perception probe output received");
        let wire: PerceptionWire = serde_json::from_str(stdout.trim())
            .map_err(|e| CollaboratorError::MalformedOutput(e.to_string()))?;

        Ok(PerceptionReport::evaluate(
            wire.accuracy,
            wire.immortality_passed,
            self.accuracy_min,
            wire.metrics,
            wire.issues,
        ))
    }
}

/// Deterministic perception probe for tests and simulation.
pub struct SimulatedPerception {
    accuracy: f64,
    immortality_passed: bool,
    accuracy_min: f64,
    calls: AtomicUsize,
}

impl SimulatedPerception {
    pub fn passing() -> Self {
        Self {
            accuracy: 0.95,
            immortality_passed: true,
            accuracy_min: 0.85,
            calls: AtomicUsize::new(0),
        }
    }

    /// High accuracy, but the safety veto fires anyway.
    pub fn vetoed(accuracy: f64) -> Self {
        Self {
            accuracy,
            immortality_passed: false,
            accuracy_min: 0.85,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_accuracy_min(mut self, min: f64) -> Self {
        self.accuracy_min = min;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PerceptionProbe for SimulatedPerception {
    async fn validate(&self, _proposal: &Proposal) -> Result<PerceptionReport, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PerceptionReport::evaluate(
            self.accuracy,
            self.immortality_passed,
            self.accuracy_min,
            HashMap::new(),
            if self.immortality_passed {
                vec![]
            } else {
                vec!["immortality check failed".into()]
            },
        ))
    }
}
