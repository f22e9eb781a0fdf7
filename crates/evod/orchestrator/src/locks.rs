use evod_types::ArtifactId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Per-artifact mutexes serializing the commit and monitoring window.
///
/// Two proposals against the same artifact must not interleave their
/// commit/rollback sequences; tasks touching disjoint artifacts proceed
/// concurrently.
pub struct ArtifactLocks {
    inner: Mutex<HashMap<ArtifactId, Arc<tokio::sync::Mutex<()>>>>,
}

impl ArtifactLocks {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// The lock guarding one artifact, created on first use.
    pub fn lock_for(&self, artifact: &ArtifactId) -> Arc<tokio::sync::Mutex<()>> {
        self.inner
            .lock()
            .expect("lock not poisoned")
            .entry(artifact.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Locks for a set of artifacts in a stable order, so two tasks locking
    /// overlapping sets cannot deadlock.
    pub fn locks_for(&self, artifacts: &[ArtifactId]) -> Vec<Arc<tokio::sync::Mutex<()>>> {
        let mut sorted: Vec<&ArtifactId> = artifacts.iter().collect();
        sorted.sort();
        sorted.dedup();
        sorted.into_iter().map(|a| self.lock_for(a)).collect()
    }
}

impl Default for ArtifactLocks {
    fn default() -> Self {
        Self::new()
    }
}
