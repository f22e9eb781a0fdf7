use serde::{Deserialize, Serialize};
use std::fmt;

/// Commit-policy tier for an approved change.
///
/// Tier 1: direct commit, light post-commit monitoring.
/// Tier 2: direct commit, heavier monitoring (visual and performance checks).
/// Tier 3: never committed directly; a review branch is opened for a human.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
}

impl Tier {
    pub fn commits_directly(&self) -> bool {
        matches!(self, Self::Tier1 | Self::Tier2)
    }

    pub fn requires_human_review(&self) -> bool {
        matches!(self, Self::Tier3)
    }

    /// What post-commit monitoring this tier demands.
    pub fn monitoring_profile(&self) -> MonitoringProfile {
        match self {
            Self::Tier1 => MonitoringProfile {
                regression_tests: true,
                visual_checks: false,
                performance_checks: false,
                human_review: false,
            },
            Self::Tier2 => MonitoringProfile {
                regression_tests: true,
                visual_checks: true,
                performance_checks: true,
                human_review: false,
            },
            Self::Tier3 => MonitoringProfile {
                regression_tests: true,
                visual_checks: true,
                performance_checks: true,
                human_review: true,
            },
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tier1 => write!(f, "Tier 1 (direct commit)"),
            Self::Tier2 => write!(f, "Tier 2 (direct commit, heavy monitoring)"),
            Self::Tier3 => write!(f, "Tier 3 (human review)"),
        }
    }
}

/// Monitoring requirements associated with a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringProfile {
    pub regression_tests: bool,
    pub visual_checks: bool,
    pub performance_checks: bool,
    pub human_review: bool,
}
