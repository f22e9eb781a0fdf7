use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Running pipeline counters.
pub struct PipelineStats {
    attempted: AtomicU64,
    completed: AtomicU64,
    rejected: AtomicU64,
    reverted: AtomicU64,
    branches_created: AtomicU64,
    errored: AtomicU64,
    refused_paused: AtomicU64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self {
            attempted: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            reverted: AtomicU64::new(0),
            branches_created: AtomicU64::new(0),
            errored: AtomicU64::new(0),
            refused_paused: AtomicU64::new(0),
        }
    }

    pub fn record_attempt(&self) {
        self.attempted.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_completed(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_reverted(&self) {
        self.reverted.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_branch_created(&self) {
        self.branches_created.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_error(&self) {
        self.errored.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_refused_paused(&self) {
        self.refused_paused.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> PipelineStatsSnapshot {
        PipelineStatsSnapshot {
            attempted: self.attempted.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            rejected: self.rejected.load(Ordering::SeqCst),
            reverted: self.reverted.load(Ordering::SeqCst),
            branches_created: self.branches_created.load(Ordering::SeqCst),
            errored: self.errored.load(Ordering::SeqCst),
            refused_paused: self.refused_paused.load(Ordering::SeqCst),
        }
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the counters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PipelineStatsSnapshot {
    pub attempted: u64,
    pub completed: u64,
    pub rejected: u64,
    pub reverted: u64,
    pub branches_created: u64,
    pub errored: u64,
    pub refused_paused: u64,
}
