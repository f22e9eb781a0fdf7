use crate::error::CollaboratorError;
use async_trait::async_trait;
use evod_types::ArtifactId;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Content surface for the artifacts the pipeline snapshots and restores.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn read(&self, artifact: &ArtifactId) -> Result<String, CollaboratorError>;
    async fn write(&self, artifact: &ArtifactId, content: &str) -> Result<(), CollaboratorError>;
}

/// In-memory artifact store for tests and simulation.
pub struct InMemoryArtifactStore {
    contents: RwLock<HashMap<ArtifactId, String>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self {
            contents: RwLock::new(HashMap::new()),
        }
    }

    pub fn seeded(entries: Vec<(ArtifactId, String)>) -> Self {
        Self {
            contents: RwLock::new(entries.into_iter().collect()),
        }
    }
}

impl Default for InMemoryArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn read(&self, artifact: &ArtifactId) -> Result<String, CollaboratorError> {
        self.contents
            .read()
            .await
            .get(artifact)
            .cloned()
            .ok_or_else(|| CollaboratorError::ArtifactNotFound(artifact.to_string()))
    }

    async fn write(&self, artifact: &ArtifactId, content: &str) -> Result<(), CollaboratorError> {
        self.contents
            .write()
            .await
            .insert(artifact.clone(), content.to_string());
        Ok(())
    }
}
