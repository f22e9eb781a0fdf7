//! End-to-end: tier-3 changes open a review branch and never commit.

use crate::common::{proposal, task, PipelineFixture};
use evod_collaborators::SimulatedReviewer;
use evod_types::{Proposal, RiskLevel, TaskStatus};
use std::sync::Arc;

#[tokio::test]
async fn high_risk_change_awaits_review_on_a_branch() {
    let mut fixture = PipelineFixture::passing();
    fixture.reviewer = Arc::new(SimulatedReviewer::approving(RiskLevel::High, 0.95));
    let pipeline = fixture.pipeline();
    let mut task = task();
    let p = proposal();

    // Branch creation is itself a successful outcome.
    assert!(pipeline.run(&mut task, &p).await);
    assert_eq!(task.status, TaskStatus::AwaitingReview);
    assert_eq!(fixture.version_control.commit_count(), 0);
    assert_eq!(fixture.version_control.branches(), vec![format!("evo-{}", p.id)]);
    // Monitoring only runs after a direct commit.
    assert_eq!(fixture.monitor.monitor_calls(), 0);
}

#[tokio::test]
async fn denylisted_artifact_awaits_review() {
    let fixture = PipelineFixture::passing();
    let pipeline = fixture.pipeline();
    let mut task = task();
    let p = Proposal::new(
        "rewire recovery policy",
        vec!["pipeline/recovery/manager.rs".into()],
    )
    .with_diff("+patched\n");

    assert!(pipeline.run(&mut task, &p).await);
    assert_eq!(task.status, TaskStatus::AwaitingReview);
    assert_eq!(fixture.version_control.commit_count(), 0);
    assert_eq!(fixture.version_control.branch_count(), 1);
}

#[tokio::test]
async fn low_confidence_awaits_review() {
    let mut fixture = PipelineFixture::passing();
    fixture.reviewer = Arc::new(SimulatedReviewer::approving(RiskLevel::Low, 0.3));
    let pipeline = fixture.pipeline();
    let mut task = task();

    assert!(pipeline.run(&mut task, &proposal()).await);
    assert_eq!(task.status, TaskStatus::AwaitingReview);
    assert_eq!(fixture.version_control.commit_count(), 0);
}

#[tokio::test]
async fn medium_risk_commits_directly_at_tier2() {
    let mut fixture = PipelineFixture::passing();
    fixture.reviewer = Arc::new(SimulatedReviewer::approving(RiskLevel::Medium, 0.8));
    let pipeline = fixture.pipeline();
    let mut task = task();

    assert!(pipeline.run(&mut task, &proposal()).await);
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(fixture.version_control.commit_count(), 1);
    assert_eq!(fixture.version_control.branch_count(), 0);
}
