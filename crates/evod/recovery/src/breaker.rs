use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tracing::{info, warn};

/// One audited state change of the breaker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BreakerTransition {
    pub paused: bool,
    pub reason: Option<String>,
    pub at: DateTime<Utc>,
}

/// Global pause switch for the evolution pipeline.
///
/// Read at the start of every task; while engaged, no new task performs any
/// side effect. Injected explicitly rather than living as ambient process
/// state, so tests can own their breaker.
pub struct EvolutionBreaker {
    paused: AtomicBool,
    reason: RwLock<Option<String>>,
    transitions: RwLock<Vec<BreakerTransition>>,
}

impl EvolutionBreaker {
    pub fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
            reason: RwLock::new(None),
            transitions: RwLock::new(Vec::new()),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn pause_reason(&self) -> Option<String> {
        self.reason.read().expect("lock not poisoned").clone()
    }

    /// Engage the breaker. Idempotent; the latest reason wins.
    pub fn pause(&self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "evolution paused");
        self.paused.store(true, Ordering::SeqCst);
        *self.reason.write().expect("lock not poisoned") = Some(reason.clone());
        self.record(true, Some(reason));
    }

    /// Release the breaker.
    pub fn resume(&self) {
        info!("evolution resumed");
        self.paused.store(false, Ordering::SeqCst);
        *self.reason.write().expect("lock not poisoned") = None;
        self.record(false, None);
    }

    /// Audit trail of every pause/resume, oldest first.
    pub fn transitions(&self) -> Vec<BreakerTransition> {
        self.transitions.read().expect("lock not poisoned").clone()
    }

    fn record(&self, paused: bool, reason: Option<String>) {
        self.transitions
            .write()
            .expect("lock not poisoned")
            .push(BreakerTransition {
                paused,
                reason,
                at: Utc::now(),
            });
    }
}

impl Default for EvolutionBreaker {
    fn default() -> Self {
        Self::new()
    }
}
