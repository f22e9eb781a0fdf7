use crate::error::CollaboratorError;
use async_trait::async_trait;
use evod_types::{ContentDigest, Proposal, ReviewVerdict, Tier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Version-control operations the pipeline may perform on an approved change.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Apply and commit the change; returns the commit id.
    async fn commit(
        &self,
        proposal: &Proposal,
        verdict: &ReviewVerdict,
        tier: Tier,
    ) -> Result<String, CollaboratorError>;

    /// Create a branch carrying the change for human review; returns the
    /// branch name. Never commits to the mainline.
    async fn create_review_branch(&self, proposal: &Proposal) -> Result<String, CollaboratorError>;
}

/// In-memory version control for tests and simulation.
///
/// Records every commit and branch so the tier-3-never-commits property can
/// be asserted directly.
pub struct SimulatedVersionControl {
    commits: Mutex<Vec<(String, Tier)>>,
    branches: Mutex<Vec<String>>,
    commit_calls: AtomicUsize,
    branch_calls: AtomicUsize,
    fail_commits: bool,
}

impl SimulatedVersionControl {
    pub fn new() -> Self {
        Self {
            commits: Mutex::new(Vec::new()),
            branches: Mutex::new(Vec::new()),
            commit_calls: AtomicUsize::new(0),
            branch_calls: AtomicUsize::new(0),
            fail_commits: false,
        }
    }

    /// Variant whose commits always fail, for error-path tests.
    pub fn failing_commits() -> Self {
        Self {
            fail_commits: true,
            ..Self::new()
        }
    }

    pub fn commit_count(&self) -> usize {
        self.commit_calls.load(Ordering::SeqCst)
    }

    pub fn branch_count(&self) -> usize {
        self.branch_calls.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> Vec<(String, Tier)> {
        self.commits.lock().expect("lock not poisoned").clone()
    }

    pub fn branches(&self) -> Vec<String> {
        self.branches.lock().expect("lock not poisoned").clone()
    }
}

impl Default for SimulatedVersionControl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionControl for SimulatedVersionControl {
    async fn commit(
        &self,
        proposal: &Proposal,
        _verdict: &ReviewVerdict,
        tier: Tier,
    ) -> Result<String, CollaboratorError> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_commits {
            return Err(CollaboratorError::Unavailable(
                "remote rejected the commit".into(),
            ));
        }
        let digest = ContentDigest::of(proposal.diff.as_bytes());
        let commit_id = format!("c{}", &digest.to_hex()[..10]);
        self.commits
            .lock()
            .expect("lock not poisoned")
            .push((commit_id.clone(), tier));
        Ok(commit_id)
    }

    async fn create_review_branch(&self, proposal: &Proposal) -> Result<String, CollaboratorError> {
        self.branch_calls.fetch_add(1, Ordering::SeqCst);
        let branch = format!("evo-{}", proposal.id);
        self.branches
            .lock()
            .expect("lock not poisoned")
            .push(branch.clone());
        Ok(branch)
    }
}
