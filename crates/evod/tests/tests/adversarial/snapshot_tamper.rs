//! Adversarial: a snapshot whose content was corrupted after capture must be
//! detected by its digest and never written back over the live artifact.

use crate::common::{artifact, ORIGINAL_CONTENT};
use evod_collaborators::{ArtifactStore, InMemoryArtifactStore};
use evod_orchestrator::RollbackGuard;
use evod_types::GeneticSnapshot;
use std::sync::Arc;

fn tampered_snapshot() -> GeneticSnapshot {
    let mut snapshot = GeneticSnapshot::new();
    snapshot.insert(artifact(), ORIGINAL_CONTENT);
    let mut json = serde_json::to_value(&snapshot).unwrap();
    json["entries"][artifact().as_str()]["content"] =
        serde_json::Value::String("rm -rf / # payload".into());
    serde_json::from_value(json).unwrap()
}

#[tokio::test]
async fn tampered_entry_is_detected() {
    let snapshot = tampered_snapshot();
    assert_eq!(snapshot.tampered_entries(), vec![artifact()]);
}

#[tokio::test]
async fn tampered_entry_is_not_restored() {
    let store = Arc::new(InMemoryArtifactStore::seeded(vec![(
        artifact(),
        "live content".to_string(),
    )]));
    let guard = RollbackGuard::from_snapshot(store.clone(), tampered_snapshot());

    let restored = guard.restore().await;

    assert!(restored.is_empty());
    // The live artifact was left alone.
    assert_eq!(store.read(&artifact()).await.unwrap(), "live content");
}

#[tokio::test]
async fn intact_snapshot_restores_normally() {
    let store = Arc::new(InMemoryArtifactStore::seeded(vec![(
        artifact(),
        "mutated".to_string(),
    )]));
    let mut snapshot = GeneticSnapshot::new();
    snapshot.insert(artifact(), ORIGINAL_CONTENT);
    let guard = RollbackGuard::from_snapshot(store.clone(), snapshot);

    let restored = guard.restore().await;

    assert_eq!(restored, vec![artifact()]);
    assert_eq!(store.read(&artifact()).await.unwrap(), ORIGINAL_CONTENT);
}
