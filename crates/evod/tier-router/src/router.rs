use crate::policy::RouterPolicy;
use evod_types::{MonitoringProfile, Proposal, ReviewVerdict, RiskLevel, Tier};

/// Classifies approved changes into commit-policy tiers.
pub struct TierRouter {
    policy: RouterPolicy,
}

impl TierRouter {
    pub fn new(policy: RouterPolicy) -> Self {
        Self { policy }
    }

    pub fn with_default_policy() -> Self {
        Self::new(RouterPolicy::default())
    }

    pub fn policy(&self) -> &RouterPolicy {
        &self.policy
    }

    /// Classify a (proposal, verdict) pair.
    ///
    /// Rules, evaluated in priority order:
    /// - **Tier 3**: a target artifact matches a denylist fragment, the
    ///   reviewer rated the risk high or demanded human review, or reviewer
    ///   confidence is below the configured floor.
    /// - **Tier 2**: medium risk, or the change exceeds the configured line
    ///   or artifact-count thresholds.
    /// - **Tier 1**: everything else.
    pub fn classify(&self, proposal: &Proposal, verdict: &ReviewVerdict) -> Tier {
        let denylisted = proposal.target_artifacts.iter().any(|artifact| {
            self.policy
                .denylist
                .iter()
                .any(|fragment| artifact.as_str().contains(fragment.as_str()))
        });

        if denylisted
            || verdict.risk == RiskLevel::High
            || verdict.requires_human_review
            || verdict.confidence < self.policy.confidence_floor
        {
            Tier::Tier3
        } else if verdict.risk == RiskLevel::Medium
            || proposal.lines_changed > self.policy.tier2_lines
            || proposal.target_artifacts.len() > self.policy.tier2_artifacts
        {
            Tier::Tier2
        } else {
            Tier::Tier1
        }
    }

    /// Monitoring requirements for a classified tier.
    pub fn monitoring_profile(&self, tier: Tier) -> MonitoringProfile {
        tier.monitoring_profile()
    }
}
