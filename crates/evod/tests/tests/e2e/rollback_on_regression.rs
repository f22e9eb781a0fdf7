//! End-to-end: an unhealthy post-commit verdict restores the genetic
//! snapshot and a recovery action is chosen and recorded.

use crate::common::{artifact, proposal, task, PipelineFixture, ORIGINAL_CONTENT};
use evod_collaborators::{ArtifactStore, SimulatedMonitor, SimulatedReviewer};
use evod_types::{RecoveryAction, RiskLevel, TaskStatus};
use std::sync::Arc;

#[tokio::test]
async fn regression_restores_snapshot_and_auto_reverts() {
    let mut fixture = PipelineFixture::passing();
    fixture.monitor =
        Arc::new(SimulatedMonitor::healthy().with_regressions(vec!["latency regression".into()]));
    let pipeline = fixture.pipeline();
    let mut task = task();

    let success = pipeline.run(&mut task, &proposal()).await;

    assert!(!success);
    assert_eq!(task.status, TaskStatus::Reverted);
    // Every snapshotted artifact is back at its pre-change content.
    assert_eq!(
        fixture.store.read(&artifact()).await.unwrap(),
        ORIGINAL_CONTENT
    );
    // Tier-1 pure test regression: auto-revert, recorded in the result.
    let result = task.result.unwrap();
    assert!(result.contains("latency regression"));
    assert!(result.contains("auto_revert"));

    let history = pipeline.recovery().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, RecoveryAction::AutoRevert);
}

#[tokio::test]
async fn tier2_degradation_pauses_further_evolution() {
    let mut fixture = PipelineFixture::passing();
    fixture.reviewer = Arc::new(SimulatedReviewer::approving(RiskLevel::Medium, 0.8));
    fixture.monitor = Arc::new(
        SimulatedMonitor::healthy().with_degradations(vec!["p99 latency up 40%".into()]),
    );
    let pipeline = fixture.pipeline();

    let mut first = task();
    assert!(!pipeline.run(&mut first, &proposal()).await);
    assert_eq!(first.status, TaskStatus::Reverted);
    assert!(pipeline.recovery().breaker().is_paused());

    // The breaker now refuses the next task outright.
    let mut second = task();
    assert!(!pipeline.run(&mut second, &proposal()).await);
    assert_eq!(second.status, TaskStatus::Paused);
    // Only the first task reached the sandbox.
    assert_eq!(fixture.sandbox.call_count(), 1);
}

#[tokio::test]
async fn critical_issue_escalates_to_human() {
    let mut fixture = PipelineFixture::passing();
    fixture.monitor = Arc::new(
        SimulatedMonitor::healthy().with_regressions(vec!["possible data loss in journal".into()]),
    );
    let pipeline = fixture.pipeline();
    let mut task = task();

    pipeline.run(&mut task, &proposal()).await;

    assert_eq!(task.status, TaskStatus::Reverted);
    assert!(task.result.unwrap().contains("escalate"));
    assert_eq!(
        pipeline.recovery().history()[0].action,
        RecoveryAction::Escalate
    );
}

#[tokio::test]
async fn healthy_monitoring_leaves_change_in_place() {
    let fixture = PipelineFixture::passing();
    let pipeline = fixture.pipeline();
    let mut task = task();

    assert!(pipeline.run(&mut task, &proposal()).await);
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(pipeline.recovery().history().is_empty());
    assert!(!pipeline.recovery().breaker().is_paused());
}
