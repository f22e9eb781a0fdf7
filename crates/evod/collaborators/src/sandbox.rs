use crate::error::CollaboratorError;
use async_trait::async_trait;
use evod_types::{Proposal, SandboxResult};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Validates a proposal in an isolated environment before anything is applied.
#[async_trait]
pub trait SandboxHarness: Send + Sync {
    async fn validate(&self, proposal: &Proposal) -> Result<SandboxResult, CollaboratorError>;
}

/// Deterministic sandbox for tests and simulation.
///
/// Counts its calls so gate-ordering properties can be asserted against it.
pub struct SimulatedSandbox {
    result: SandboxResult,
    calls: AtomicUsize,
}

impl SimulatedSandbox {
    pub fn passing() -> Self {
        Self {
            result: SandboxResult::passing(5),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(errors: Vec<String>) -> Self {
        Self {
            result: SandboxResult::failing(0, 5, errors),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_result(result: SandboxResult) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SandboxHarness for SimulatedSandbox {
    async fn validate(&self, _proposal: &Proposal) -> Result<SandboxResult, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}
