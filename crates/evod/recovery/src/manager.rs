use crate::breaker::EvolutionBreaker;
use chrono::{DateTime, Utc};
use evod_types::{MonitoringResult, RecoveryAction, Tier};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::warn;

/// One recorded recovery decision.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecoveryRecord {
    pub commit_id: String,
    pub action: RecoveryAction,
    pub at: DateTime<Utc>,
}

/// Chooses and records the recovery action for an unhealthy monitoring
/// verdict, and owns the pipeline's pause switch.
pub struct RecoveryManager {
    breaker: Arc<EvolutionBreaker>,
    /// Issue fragments that always escalate to a human.
    critical_patterns: Vec<String>,
    history: RwLock<Vec<RecoveryRecord>>,
}

impl RecoveryManager {
    pub fn new(breaker: Arc<EvolutionBreaker>) -> Self {
        Self {
            breaker,
            critical_patterns: vec![
                "security".into(),
                "injection".into(),
                "exploit".into(),
                "vulnerability".into(),
                "crash".into(),
                "segfault".into(),
                "memory leak".into(),
                "data loss".into(),
            ],
            history: RwLock::new(Vec::new()),
        }
    }

    pub fn with_critical_patterns(mut self, patterns: Vec<String>) -> Self {
        self.critical_patterns = patterns;
        self
    }

    pub fn breaker(&self) -> &Arc<EvolutionBreaker> {
        &self.breaker
    }

    /// Decide how to recover from a regression. Exactly one action is chosen;
    /// `PauseEvolution` engages the breaker as its side effect.
    ///
    /// Policy, in priority order: critical issues escalate to a human; pure
    /// test regressions on a lightly-monitored commit are auto-reverted;
    /// anything involving visual anomalies or performance degradation pauses
    /// further evolution, which is also the default.
    pub fn handle_regression(&self, result: &MonitoringResult) -> RecoveryAction {
        warn!(
            commit_id = %result.commit_id,
            issues = result.issues().len(),
            "handling regression"
        );
        let action = self.determine_action(result);

        if action == RecoveryAction::PauseEvolution {
            self.breaker.pause(format!(
                "regression on commit {}: {}",
                result.commit_id,
                result.issues().join("; ")
            ));
        }

        self.history
            .write()
            .expect("lock not poisoned")
            .push(RecoveryRecord {
                commit_id: result.commit_id.clone(),
                action,
                at: Utc::now(),
            });
        action
    }

    pub fn history(&self) -> Vec<RecoveryRecord> {
        self.history.read().expect("lock not poisoned").clone()
    }

    fn determine_action(&self, result: &MonitoringResult) -> RecoveryAction {
        let issues = result.issues();
        let critical = issues.iter().any(|issue| {
            let lower = issue.to_lowercase();
            self.critical_patterns.iter().any(|p| lower.contains(p))
        });
        if critical {
            return RecoveryAction::Escalate;
        }

        if result.tier == Tier::Tier1
            && !result.regression_failures.is_empty()
            && result.visual_anomalies.is_empty()
            && result.performance_degradations.is_empty()
        {
            return RecoveryAction::AutoRevert;
        }

        RecoveryAction::PauseEvolution
    }
}
