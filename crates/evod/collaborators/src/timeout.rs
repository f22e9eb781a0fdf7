use crate::error::CollaboratorError;
use std::future::Future;
use std::time::Duration;

/// Run a collaborator call under an explicit deadline.
///
/// A timed-out call is a failure of that phase, never success-by-default.
pub async fn call_with_timeout<T>(
    phase: &str,
    timeout: Duration,
    fut: impl Future<Output = Result<T, CollaboratorError>>,
) -> Result<T, CollaboratorError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(CollaboratorError::Timeout {
            phase: phase.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}
