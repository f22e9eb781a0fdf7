/// Errors from collaborator boundary calls.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("{phase} call timed out after {timeout_ms} ms")]
    Timeout { phase: String, timeout_ms: u64 },
    #[error("collaborator process exited with status {status}: {stderr}")]
    ProcessFailed { status: i32, stderr: String },
    #[error("malformed collaborator output: {0}")]
    MalformedOutput(String),
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
