#![deny(unsafe_code)]
//! # evod-collaborators
//!
//! Boundary contracts for the external collaborators the evolution pipeline
//! calls into: sandbox, perception, reviewer, version control, monitoring,
//! telemetry, and the artifact store. Each collaborator is a small trait with
//! injected implementations, so the orchestrator can be exercised entirely
//! against simulated (call-counting, deterministic) fakes.

pub mod error;
pub mod monitoring;
pub mod perception;
pub mod reviewer;
pub mod sandbox;
pub mod store;
pub mod telemetry;
pub mod timeout;
pub mod version_control;

pub use error::CollaboratorError;
pub use monitoring::{HealthMonitor, SimulatedMonitor};
pub use perception::{PerceptionProbe, SimulatedPerception, SubprocessPerceptionProbe};
pub use reviewer::{ChangeReviewer, SimulatedReviewer};
pub use sandbox::{SandboxHarness, SimulatedSandbox};
pub use store::{ArtifactStore, InMemoryArtifactStore};
pub use telemetry::{NullTelemetry, PipelineEvent, SimulatedTelemetry, Telemetry};
pub use timeout::call_with_timeout;
pub use version_control::{SimulatedVersionControl, VersionControl};
