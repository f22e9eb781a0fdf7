
#[path = "e2e/sandbox_rejection.rs"]
mod sandbox_rejection;

#[path = "e2e/perception_veto.rs"]
mod perception_veto;

#[path = "e2e/tier3_review_branch.rs"]
mod tier3_review_branch;

#[path = "e2e/rollback_on_regression.rs"]
mod rollback_on_regression;

#[path = "e2e/tectonic_shift.rs"]
mod tectonic_shift;
