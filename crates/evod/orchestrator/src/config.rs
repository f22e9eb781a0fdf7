use std::time::Duration;

/// Timeouts and gate thresholds for one pipeline instance.
///
/// Every external collaborator call runs under one of these deadlines; a
/// timed-out call fails its phase.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub sandbox_timeout: Duration,
    pub perception_timeout: Duration,
    pub review_timeout: Duration,
    pub commit_timeout: Duration,
    pub monitor_timeout: Duration,
    pub live_state_timeout: Duration,
    /// Accuracy floor for the perception gate.
    pub perception_accuracy_min: f64,
    /// How many gate errors are quoted in a task result.
    pub max_reported_errors: usize,
    /// Live-verification retries before the failure is recorded as
    /// non-blocking.
    pub max_verification_attempts: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sandbox_timeout: Duration::from_secs(120),
            perception_timeout: Duration::from_secs(60),
            review_timeout: Duration::from_secs(60),
            commit_timeout: Duration::from_secs(30),
            monitor_timeout: Duration::from_secs(120),
            live_state_timeout: Duration::from_secs(10),
            perception_accuracy_min: 0.85,
            max_reported_errors: 3,
            max_verification_attempts: 2,
        }
    }
}

impl PipelineConfig {
    pub fn with_perception_accuracy_min(mut self, min: f64) -> Self {
        self.perception_accuracy_min = min;
        self
    }

    pub fn with_max_verification_attempts(mut self, attempts: u32) -> Self {
        self.max_verification_attempts = attempts;
        self
    }
}
