#![deny(unsafe_code)]
//! # evod-types
//!
//! Shared data model for the evod code-evolution pipeline: proposals, tasks,
//! gate results, risk tiers, genetic snapshots, and recovery actions.

pub mod digest;
pub mod id;
pub mod proposal;
pub mod report;
pub mod snapshot;
pub mod task;
pub mod tier;

pub use digest::{ContentDigest, DigestError};
pub use id::{ArtifactId, ProposalId, TaskId};
pub use proposal::Proposal;
pub use report::{
    MonitoringResult, PerceptionReport, RecoveryAction, ReviewVerdict, RiskLevel, SandboxResult,
};
pub use snapshot::{GeneticSnapshot, SnapshotEntry};
pub use task::{EvolutionTask, TaskStatus, VerificationIntent};
pub use tier::{MonitoringProfile, Tier};
