//! End-to-end: a failed sandbox gate rejects the task and nothing downstream
//! of the gate is ever invoked.

use crate::common::{proposal, task, PipelineFixture};
use evod_collaborators::SimulatedSandbox;
use evod_types::TaskStatus;
use std::sync::Arc;

#[tokio::test]
async fn failed_sandbox_rejects_task() {
    let mut fixture = PipelineFixture::passing();
    fixture.sandbox = Arc::new(SimulatedSandbox::failing(vec![
        "heartbeat test 1 failed".into(),
        "heartbeat test 2 failed".into(),
        "heartbeat test 3 failed".into(),
        "heartbeat test 4 failed".into(),
        "heartbeat test 5 failed".into(),
    ]));
    let pipeline = fixture.pipeline();
    let mut task = task();

    let success = pipeline.run(&mut task, &proposal()).await;

    assert!(!success);
    assert_eq!(task.status, TaskStatus::Rejected);
    let result = task.result.unwrap();
    assert!(result.contains("sandbox validation failed"));
    // At most the first few errors are quoted.
    assert!(result.contains("heartbeat test 3 failed"));
    assert!(!result.contains("heartbeat test 4 failed"));
}

#[tokio::test]
async fn no_speculative_side_effects_after_sandbox_failure() {
    let mut fixture = PipelineFixture::passing();
    fixture.sandbox = Arc::new(SimulatedSandbox::failing(vec!["0/5 checks passed".into()]));
    let pipeline = fixture.pipeline();
    let mut task = task();

    pipeline.run(&mut task, &proposal()).await;

    assert_eq!(fixture.sandbox.call_count(), 1);
    assert_eq!(fixture.reviewer.call_count(), 0);
    assert_eq!(fixture.version_control.commit_count(), 0);
    assert_eq!(fixture.version_control.branch_count(), 0);
    assert_eq!(fixture.monitor.monitor_calls(), 0);
    assert_eq!(fixture.monitor.baseline_captures(), 0);
}

#[tokio::test]
async fn passing_sandbox_continues_to_completion() {
    let fixture = PipelineFixture::passing();
    let pipeline = fixture.pipeline();
    let mut task = task();

    assert!(pipeline.run(&mut task, &proposal()).await);
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(fixture.version_control.commit_count(), 1);
}
