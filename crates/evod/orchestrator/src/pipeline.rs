use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::locks::ArtifactLocks;
use crate::rollback::RollbackGuard;
use crate::stats::{PipelineStats, PipelineStatsSnapshot};
use crate::verify::{self, VerificationOutcome};
use evod_collaborators::{
    call_with_timeout, ArtifactStore, ChangeReviewer, HealthMonitor, PerceptionProbe,
    PipelineEvent, SandboxHarness, Telemetry, VersionControl,
};
use evod_recovery::{EvolutionBreaker, RecoveryManager};
use evod_tier_router::TierRouter;
use evod_types::{
    ArtifactId, EvolutionTask, Proposal, ReviewVerdict, SandboxResult, TaskStatus, Tier,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Named pipeline phases, in execution order.
///
/// Each phase carries exactly the inputs the next transition needs, so the
/// no-speculative-side-effects property falls out of the structure: once a
/// gate halts the loop, no later phase can run.
enum Phase {
    Sandbox,
    Perception { sandbox: SandboxResult },
    Review { sandbox: SandboxResult },
    Route { verdict: ReviewVerdict },
    Commit { verdict: ReviewVerdict, tier: Tier },
    LiveVerify { commit_id: String, tier: Tier },
    Monitor { commit_id: String, tier: Tier },
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Perception { .. } => "perception",
            Self::Review { .. } => "review",
            Self::Route { .. } => "tier-routing",
            Self::Commit { .. } => "commit",
            Self::LiveVerify { .. } => "live-verification",
            Self::Monitor { .. } => "monitoring",
        }
    }
}

/// The evolution pipeline: drives one task through the gated phase sequence.
///
/// Collaborators are injected as trait objects; the pipeline owns no policy
/// beyond sequencing, snapshot/rollback, and status bookkeeping.
pub struct EvolutionPipeline {
    sandbox: Arc<dyn SandboxHarness>,
    perception: Arc<dyn PerceptionProbe>,
    reviewer: Arc<dyn ChangeReviewer>,
    version_control: Arc<dyn VersionControl>,
    monitor: Arc<dyn HealthMonitor>,
    telemetry: Arc<dyn Telemetry>,
    store: Arc<dyn ArtifactStore>,
    router: TierRouter,
    recovery: RecoveryManager,
    config: PipelineConfig,
    locks: ArtifactLocks,
    stats: PipelineStats,
    baseline_captured: AtomicBool,
}

impl EvolutionPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sandbox: Arc<dyn SandboxHarness>,
        perception: Arc<dyn PerceptionProbe>,
        reviewer: Arc<dyn ChangeReviewer>,
        version_control: Arc<dyn VersionControl>,
        monitor: Arc<dyn HealthMonitor>,
        telemetry: Arc<dyn Telemetry>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            sandbox,
            perception,
            reviewer,
            version_control,
            monitor,
            telemetry,
            store,
            router: TierRouter::with_default_policy(),
            recovery: RecoveryManager::new(Arc::new(EvolutionBreaker::new())),
            config: PipelineConfig::default(),
            locks: ArtifactLocks::new(),
            stats: PipelineStats::new(),
            baseline_captured: AtomicBool::new(false),
        }
    }

    pub fn with_router(mut self, router: TierRouter) -> Self {
        self.router = router;
        self
    }

    pub fn with_recovery(mut self, recovery: RecoveryManager) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn recovery(&self) -> &RecoveryManager {
        &self.recovery
    }

    pub fn stats(&self) -> PipelineStatsSnapshot {
        self.stats.snapshot()
    }

    /// Run one task to a terminal status.
    ///
    /// Returns whether the evolution succeeded: the change was committed and
    /// stayed healthy, or a review branch was opened for a human.
    pub async fn run(&self, task: &mut EvolutionTask, proposal: &Proposal) -> bool {
        self.stats.record_attempt();

        if self.recovery.breaker().is_paused() {
            let reason = self
                .recovery
                .breaker()
                .pause_reason()
                .unwrap_or_else(|| "unspecified".into());
            warn!(task = %task.id, %reason, "pipeline paused, refusing task");
            task.status = TaskStatus::Paused;
            task.result = Some(format!("evolution paused: {}", reason));
            self.stats.record_refused_paused();
            self.emit_finished(task);
            return false;
        }

        task.status = TaskStatus::InProgress;
        info!(task = %task.id, proposal = %proposal.id, goal = %task.goal, "evolution starting");

        // Capture the genetic snapshot before any further phase runs.
        let guard = RollbackGuard::capture(self.store.clone(), &proposal.target_artifacts).await;
        task.snapshot = Some(guard.snapshot().clone());

        match self.drive(task, proposal, &guard).await {
            Ok(success) => {
                self.emit_finished(task);
                success
            }
            Err(e) => {
                error!(task = %task.id, error = %e, "unexpected pipeline failure");
                let restored = guard.restore().await;
                if !restored.is_empty() {
                    info!(count = restored.len(), "emergency rollback restored artifacts");
                }
                task.status = TaskStatus::Error;
                task.result = Some(format!("pipeline error: {}", e));
                self.stats.record_error();
                self.emit_finished(task);
                false
            }
        }
    }

    /// Restore a cancelled in-flight task's snapshot, if one was captured.
    ///
    /// Hosts tearing down mid-task call this so a partially applied change is
    /// never left live without a restore attempt.
    pub async fn emergency_rollback(&self, task: &EvolutionTask) -> Vec<ArtifactId> {
        match &task.snapshot {
            Some(snapshot) => {
                RollbackGuard::from_snapshot(self.store.clone(), snapshot.clone())
                    .restore()
                    .await
            }
            None => Vec::new(),
        }
    }

    async fn drive(
        &self,
        task: &mut EvolutionTask,
        proposal: &Proposal,
        guard: &RollbackGuard,
    ) -> Result<bool, PipelineError> {
        // Held from commit through monitoring so two tasks against the same
        // artifact cannot interleave their commit/rollback sequences.
        let mut commit_guards = Vec::new();
        let mut phase = Phase::Sandbox;

        loop {
            self.telemetry.broadcast(&PipelineEvent::PhaseEntered {
                task: task.id.clone(),
                phase: phase.name().into(),
            });

            phase = match phase {
                Phase::Sandbox => {
                    match call_with_timeout(
                        "sandbox",
                        self.config.sandbox_timeout,
                        self.sandbox.validate(proposal),
                    )
                    .await
                    {
                        Ok(result) if result.passed => {
                            info!(
                                task = %task.id,
                                checks = result.checks_passed,
                                "sandbox validation passed"
                            );
                            Phase::Perception { sandbox: result }
                        }
                        Ok(result) => {
                            self.reject(
                                task,
                                format!(
                                    "sandbox validation failed: {}",
                                    self.quote_errors(&result.errors)
                                ),
                            );
                            return Ok(false);
                        }
                        Err(e) => {
                            self.reject(task, format!("sandbox validation failed: {}", e));
                            return Ok(false);
                        }
                    }
                }

                Phase::Perception { sandbox } => {
                    if !proposal.affects_perception {
                        Phase::Review { sandbox }
                    } else {
                        match call_with_timeout(
                            "perception",
                            self.config.perception_timeout,
                            self.perception.validate(proposal),
                        )
                        .await
                        {
                            Ok(report) if report.success => {
                                info!(task = %task.id, accuracy = report.accuracy, "perception gate passed");
                                Phase::Review { sandbox }
                            }
                            Ok(report) => {
                                // The reviewer is never consulted for a
                                // perception failure.
                                let why = if !report.immortality_passed {
                                    "immortality check failed".to_string()
                                } else {
                                    format!(
                                        "accuracy {:.2} below threshold {:.2}",
                                        report.accuracy, self.config.perception_accuracy_min
                                    )
                                };
                                self.reject(task, format!("perception validation failed: {}", why));
                                return Ok(false);
                            }
                            Err(e) => {
                                self.reject(
                                    task,
                                    format!("perception validation failed: {}", e),
                                );
                                return Ok(false);
                            }
                        }
                    }
                }

                Phase::Review { sandbox } => {
                    let verdict = call_with_timeout(
                        "review",
                        self.config.review_timeout,
                        self.reviewer.review(proposal, &sandbox),
                    )
                    .await?;
                    if !verdict.approved {
                        self.reject(task, format!("review rejected: {}", verdict.reasoning));
                        return Ok(false);
                    }
                    info!(
                        task = %task.id,
                        risk = %verdict.risk,
                        confidence = verdict.confidence,
                        "review approved"
                    );
                    Phase::Route { verdict }
                }

                Phase::Route { verdict } => {
                    let tier = self.router.classify(proposal, &verdict);
                    info!(task = %task.id, %tier, "change classified");
                    Phase::Commit { verdict, tier }
                }

                Phase::Commit { verdict, tier } => {
                    if tier == Tier::Tier3 {
                        // A review branch is this phase's successful outcome;
                        // commit is never called for tier 3.
                        let branch = call_with_timeout(
                            "review-branch",
                            self.config.commit_timeout,
                            self.version_control.create_review_branch(proposal),
                        )
                        .await?;
                        info!(task = %task.id, %branch, "review branch created");
                        task.status = TaskStatus::AwaitingReview;
                        task.result = Some(format!(
                            "change requires human review; branch {} created",
                            branch
                        ));
                        self.stats.record_branch_created();
                        return Ok(true);
                    }

                    for lock in self.locks.locks_for(&proposal.target_artifacts) {
                        commit_guards.push(lock.lock_owned().await);
                    }

                    match call_with_timeout(
                        "commit",
                        self.config.commit_timeout,
                        self.version_control.commit(proposal, &verdict, tier),
                    )
                    .await
                    {
                        Ok(commit_id) => {
                            for artifact in &proposal.target_artifacts {
                                task.changes_applied.push(format!("modified {}", artifact));
                            }
                            task.changes_applied.push(format!("committed {}", commit_id));
                            info!(task = %task.id, %commit_id, "change committed");
                            Phase::LiveVerify { commit_id, tier }
                        }
                        Err(e) => {
                            // Nothing was applied; no rollback needed.
                            warn!(task = %task.id, error = %e, "commit failed");
                            task.status = TaskStatus::Error;
                            task.result = Some(format!("commit failed: {}", e));
                            self.stats.record_error();
                            return Ok(false);
                        }
                    }
                }

                Phase::LiveVerify { commit_id, tier } => {
                    if task.verification_intent.is_some() {
                        self.verify_live(task).await;
                    }
                    Phase::Monitor { commit_id, tier }
                }

                Phase::Monitor { commit_id, tier } => {
                    if !self.baseline_captured.swap(true, Ordering::SeqCst) {
                        call_with_timeout(
                            "baseline",
                            self.config.monitor_timeout,
                            self.monitor.capture_baseline(),
                        )
                        .await?;
                    }
                    let result = call_with_timeout(
                        "monitor",
                        self.config.monitor_timeout,
                        self.monitor.monitor(&commit_id, tier),
                    )
                    .await?;

                    if !result.healthy {
                        warn!(
                            task = %task.id,
                            %commit_id,
                            issues = result.issues().len(),
                            "post-commit regression detected"
                        );
                        self.telemetry.broadcast(&PipelineEvent::RegressionDetected {
                            commit_id: commit_id.clone(),
                            issues: result.issues(),
                        });
                        let restored = guard.restore().await;
                        let action = self.recovery.handle_regression(&result);
                        task.status = TaskStatus::Reverted;
                        task.result = Some(format!(
                            "regression detected ({}); restored {} artifact(s); recovery action: {}",
                            self.quote_errors(&result.issues()),
                            restored.len(),
                            action
                        ));
                        self.stats.record_reverted();
                        return Ok(false);
                    }

                    if task.status == TaskStatus::AwaitingVisualReview {
                        // The commit is live and healthy; only human
                        // attention was requested.
                        let note = task.result.take().unwrap_or_default();
                        task.result = Some(format!("{} (commit healthy)", note));
                    } else {
                        task.status = TaskStatus::Completed;
                        task.result = Some("evolution completed and healthy".into());
                    }
                    self.stats.record_completed();
                    return Ok(true);
                }
            };
        }
    }

    /// Compare the telemetry live state against the task's intent.
    ///
    /// Telemetry is best-effort; its unavailability records a note and never
    /// blocks the pipeline. Only a contradiction escalates.
    async fn verify_live(&self, task: &mut EvolutionTask) {
        let Some(intent) = task.verification_intent.clone() else {
            return;
        };

        loop {
            task.verification_attempts += 1;
            let live = match call_with_timeout(
                "live-state",
                self.config.live_state_timeout,
                self.telemetry.live_state(),
            )
            .await
            {
                Ok(live) => live,
                Err(e) => {
                    warn!(task = %task.id, error = %e, "live state unavailable, verification skipped");
                    task.changes_applied
                        .push(format!("live verification skipped: {}", e));
                    return;
                }
            };

            match verify::evaluate(&intent, &live) {
                VerificationOutcome::Pass => {
                    info!(task = %task.id, "live verification passed");
                    task.changes_applied.push("live verification passed".into());
                    return;
                }
                VerificationOutcome::Retry
                    if task.verification_attempts < self.config.max_verification_attempts =>
                {
                    continue;
                }
                VerificationOutcome::Retry => {
                    task.changes_applied
                        .push("live verification did not converge".into());
                    return;
                }
                VerificationOutcome::Escalate => {
                    warn!(task = %task.id, "live state contradicts intent, requesting visual review");
                    task.status = TaskStatus::AwaitingVisualReview;
                    task.result = Some(format!(
                        "live state contradicts intent \"{}\"; visual review requested",
                        intent.description
                    ));
                    return;
                }
            }
        }
    }

    fn reject(&self, task: &mut EvolutionTask, reason: String) {
        warn!(task = %task.id, %reason, "task rejected");
        task.status = TaskStatus::Rejected;
        task.result = Some(reason);
        self.stats.record_rejected();
    }

    fn quote_errors(&self, errors: &[String]) -> String {
        let quoted: Vec<&str> = errors
            .iter()
            .take(self.config.max_reported_errors)
            .map(String::as_str)
            .collect();
        if errors.len() > self.config.max_reported_errors {
            format!("{}, ...", quoted.join("; "))
        } else {
            quoted.join("; ")
        }
    }

    fn emit_finished(&self, task: &EvolutionTask) {
        self.telemetry.broadcast(&PipelineEvent::TaskFinished {
            task: task.id.clone(),
            status: task.status,
        });
    }
}
