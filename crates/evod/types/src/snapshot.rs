use crate::digest::ContentDigest;
use crate::id::ArtifactId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pre-change content of a single artifact, digested at capture time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub content: String,
    pub digest: ContentDigest,
}

impl SnapshotEntry {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let digest = ContentDigest::of(content.as_bytes());
        Self { content, digest }
    }

    /// Does the stored content still match its capture-time digest?
    pub fn verify(&self) -> bool {
        ContentDigest::of(self.content.as_bytes()) == self.digest
    }
}

/// Pre-change artifact contents captured before any mutation is applied.
///
/// Retained solely to support rollback; never mutated after capture.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GeneticSnapshot {
    entries: BTreeMap<ArtifactId, SnapshotEntry>,
}

impl GeneticSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, artifact: ArtifactId, content: impl Into<String>) {
        self.entries.insert(artifact, SnapshotEntry::new(content));
    }

    pub fn get(&self, artifact: &ArtifactId) -> Option<&SnapshotEntry> {
        self.entries.get(artifact)
    }

    pub fn contains(&self, artifact: &ArtifactId) -> bool {
        self.entries.contains_key(artifact)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&ArtifactId, &SnapshotEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verify every entry against its capture-time digest, returning the ids
    /// of entries whose content no longer matches.
    pub fn tampered_entries(&self) -> Vec<ArtifactId> {
        self.entries
            .iter()
            .filter(|(_, e)| !e.verify())
            .map(|(id, _)| id.clone())
            .collect()
    }
}
