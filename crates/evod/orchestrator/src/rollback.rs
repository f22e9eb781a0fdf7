use evod_collaborators::ArtifactStore;
use evod_types::{ArtifactId, GeneticSnapshot};
use std::sync::Arc;
use tracing::{info, warn};

/// Scoped snapshot-then-restore helper.
///
/// Captures the pre-change content of every artifact before any mutation is
/// applied, and owns the single restore path used by both the monitoring
/// phase and the emergency-rollback path. Capture is best-effort: an
/// unreadable artifact is logged and skipped rather than failing the task.
pub struct RollbackGuard {
    store: Arc<dyn ArtifactStore>,
    snapshot: GeneticSnapshot,
}

impl RollbackGuard {
    /// Snapshot the current content of the given artifacts.
    pub async fn capture(store: Arc<dyn ArtifactStore>, artifacts: &[ArtifactId]) -> Self {
        let mut snapshot = GeneticSnapshot::new();
        for artifact in artifacts {
            match store.read(artifact).await {
                Ok(content) => snapshot.insert(artifact.clone(), content),
                Err(e) => {
                    // Best-effort safety net: the pipeline continues without
                    // a snapshot entry for this artifact.
                    warn!(%artifact, error = %e, "snapshot capture skipped artifact");
                }
            }
        }
        Self { store, snapshot }
    }

    /// Rebuild a guard from a previously captured snapshot, e.g. when a
    /// cancelled task's snapshot must still be offered a restore attempt.
    pub fn from_snapshot(store: Arc<dyn ArtifactStore>, snapshot: GeneticSnapshot) -> Self {
        Self { store, snapshot }
    }

    pub fn snapshot(&self) -> &GeneticSnapshot {
        &self.snapshot
    }

    /// Restore every snapshotted artifact to its pre-change content.
    ///
    /// Returns the ids restored. Individual write failures are logged and do
    /// not stop the remaining restores.
    pub async fn restore(&self) -> Vec<ArtifactId> {
        let mut restored = Vec::new();
        for (artifact, entry) in self.snapshot.entries() {
            if !entry.verify() {
                warn!(%artifact, "snapshot entry digest mismatch, refusing to restore it");
                continue;
            }
            match self.store.write(artifact, &entry.content).await {
                Ok(()) => {
                    info!(%artifact, "artifact restored from snapshot");
                    restored.push(artifact.clone());
                }
                Err(e) => warn!(%artifact, error = %e, "artifact restore failed"),
            }
        }
        restored
    }
}
