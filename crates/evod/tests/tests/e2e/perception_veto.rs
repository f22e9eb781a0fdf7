//! End-to-end: the perception gate's immortality veto rejects a change no
//! matter how high its accuracy, and the reviewer is never consulted.

use crate::common::{proposal, task, PipelineFixture};
use evod_collaborators::SimulatedPerception;
use evod_types::TaskStatus;
use std::sync::Arc;

#[tokio::test]
async fn immortality_veto_rejects_despite_high_accuracy() {
    let mut fixture = PipelineFixture::passing();
    fixture.perception = Arc::new(SimulatedPerception::vetoed(0.92));
    let pipeline = fixture.pipeline();
    let mut task = task();

    let success = pipeline
        .run(&mut task, &proposal().affecting_perception())
        .await;

    assert!(!success);
    assert_eq!(task.status, TaskStatus::Rejected);
    assert!(task.result.unwrap().contains("immortality"));
}

#[tokio::test]
async fn reviewer_never_invoked_on_perception_failure() {
    let mut fixture = PipelineFixture::passing();
    fixture.perception = Arc::new(SimulatedPerception::vetoed(0.92));
    let pipeline = fixture.pipeline();
    let mut task = task();

    pipeline
        .run(&mut task, &proposal().affecting_perception())
        .await;

    assert_eq!(fixture.perception.call_count(), 1);
    assert_eq!(fixture.reviewer.call_count(), 0);
    assert_eq!(fixture.version_control.commit_count(), 0);
}

#[tokio::test]
async fn low_accuracy_also_rejects() {
    let mut fixture = PipelineFixture::passing();
    fixture.perception = Arc::new(SimulatedPerception::passing().with_accuracy(0.4));
    let pipeline = fixture.pipeline();
    let mut task = task();

    pipeline
        .run(&mut task, &proposal().affecting_perception())
        .await;

    assert_eq!(task.status, TaskStatus::Rejected);
    assert!(task.result.unwrap().contains("accuracy"));
}

#[tokio::test]
async fn untagged_proposal_skips_perception_entirely() {
    let mut fixture = PipelineFixture::passing();
    fixture.perception = Arc::new(SimulatedPerception::vetoed(0.92));
    let pipeline = fixture.pipeline();
    let mut task = task();

    // The proposal does not touch perception-sensitive logic.
    assert!(pipeline.run(&mut task, &proposal()).await);
    assert_eq!(fixture.perception.call_count(), 0);
    assert_eq!(task.status, TaskStatus::Completed);
}
