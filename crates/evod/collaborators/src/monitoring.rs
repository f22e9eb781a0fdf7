use crate::error::CollaboratorError;
use async_trait::async_trait;
use evod_types::{MonitoringResult, Tier};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Post-commit health monitoring against a captured baseline.
#[async_trait]
pub trait HealthMonitor: Send + Sync {
    /// Capture the baseline the next `monitor` call compares against.
    async fn capture_baseline(&self) -> Result<(), CollaboratorError>;

    /// Produce a health verdict for a commit at a given tier.
    async fn monitor(&self, commit_id: &str, tier: Tier)
        -> Result<MonitoringResult, CollaboratorError>;
}

/// Deterministic monitor for tests and simulation.
pub struct SimulatedMonitor {
    healthy: bool,
    regression_failures: Vec<String>,
    visual_anomalies: Vec<String>,
    performance_degradations: Vec<String>,
    baseline_captures: AtomicUsize,
    monitor_calls: AtomicUsize,
}

impl SimulatedMonitor {
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            regression_failures: Vec::new(),
            visual_anomalies: Vec::new(),
            performance_degradations: Vec::new(),
            baseline_captures: AtomicUsize::new(0),
            monitor_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_regressions(mut self, failures: Vec<String>) -> Self {
        self.healthy = false;
        self.regression_failures = failures;
        self
    }

    pub fn with_visual_anomalies(mut self, anomalies: Vec<String>) -> Self {
        self.healthy = false;
        self.visual_anomalies = anomalies;
        self
    }

    pub fn with_degradations(mut self, degradations: Vec<String>) -> Self {
        self.healthy = false;
        self.performance_degradations = degradations;
        self
    }

    pub fn baseline_captures(&self) -> usize {
        self.baseline_captures.load(Ordering::SeqCst)
    }

    pub fn monitor_calls(&self) -> usize {
        self.monitor_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthMonitor for SimulatedMonitor {
    async fn capture_baseline(&self) -> Result<(), CollaboratorError> {
        self.baseline_captures.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn monitor(
        &self,
        commit_id: &str,
        tier: Tier,
    ) -> Result<MonitoringResult, CollaboratorError> {
        self.monitor_calls.fetch_add(1, Ordering::SeqCst);
        let mut result = if self.healthy {
            MonitoringResult::healthy(commit_id, tier)
        } else {
            MonitoringResult::unhealthy(commit_id, tier)
        };
        result = result
            .with_regressions(self.regression_failures.clone())
            .with_visual_anomalies(self.visual_anomalies.clone())
            .with_degradations(self.performance_degradations.clone());
        Ok(result)
    }
}
