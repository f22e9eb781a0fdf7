#![deny(unsafe_code)]
//! # evod-mutation
//!
//! Mechanical mutation of compute-kernel source text. A fixed operator set
//! derives candidate variants from a parent kernel; every operator is
//! idempotent-by-marker, so repeated application across generations can never
//! double-apply the same structural change.

pub mod engine;
pub mod operators;

pub use engine::{Candidate, MutationEngine};
pub use operators::MutationOperator;
