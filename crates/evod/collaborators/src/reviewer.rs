use crate::error::CollaboratorError;
use async_trait::async_trait;
use evod_types::{Proposal, ReviewVerdict, RiskLevel, SandboxResult};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Produces a review verdict from a proposal and its sandbox evidence.
#[async_trait]
pub trait ChangeReviewer: Send + Sync {
    async fn review(
        &self,
        proposal: &Proposal,
        sandbox: &SandboxResult,
    ) -> Result<ReviewVerdict, CollaboratorError>;
}

/// Deterministic reviewer for tests and simulation.
pub struct SimulatedReviewer {
    verdict: ReviewVerdict,
    calls: AtomicUsize,
}

impl SimulatedReviewer {
    pub fn approving(risk: RiskLevel, confidence: f64) -> Self {
        Self {
            verdict: ReviewVerdict::approved(risk, confidence)
                .with_reasoning("change is consistent with its stated goal"),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(reasoning: impl Into<String>) -> Self {
        Self {
            verdict: ReviewVerdict::rejected(reasoning, vec![]),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_verdict(verdict: ReviewVerdict) -> Self {
        Self {
            verdict,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChangeReviewer for SimulatedReviewer {
    async fn review(
        &self,
        _proposal: &Proposal,
        _sandbox: &SandboxResult,
    ) -> Result<ReviewVerdict, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.verdict.clone())
    }
}
