use evod_collaborators::CollaboratorError;

/// Unexpected failures inside the pipeline.
///
/// Gate outcomes (sandbox rejection, reviewer decline, unhealthy monitoring)
/// are not errors; they resolve into task statuses. Only failures outside
/// the defined collaborator contracts surface here, and the pipeline always
/// attempts an emergency rollback first when a snapshot exists.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
    #[error("pipeline failure: {0}")]
    Internal(String),
}
