#![deny(unsafe_code)]
//! # evod-fitness
//!
//! Scores one candidate kernel variant: structural validation, a pluggable
//! performance benchmark, and a fixed correctness suite. Fitness is a single
//! scalar over normalized metrics, and always exactly zero for a candidate
//! that fails correctness.

pub mod benchmark;
pub mod correctness;
pub mod error;
pub mod scorer;
pub mod types;
pub mod validator;

pub use benchmark::{BenchmarkBackend, BenchmarkSample, SimulatedBenchmark};
pub use correctness::CorrectnessSuite;
pub use error::FitnessError;
pub use scorer::{FitnessScorer, FitnessWeights};
pub use types::FitnessScore;
pub use validator::StructuralValidator;
