#![deny(unsafe_code)]
//! # evod-recovery
//!
//! The global evolution circuit breaker and the regression-recovery policy.
//! The breaker's paused flag is the only cross-task shared mutable state in
//! the pipeline; it is read and written through atomics, and every state
//! transition is audited.

pub mod breaker;
pub mod manager;

pub use breaker::{BreakerTransition, EvolutionBreaker};
pub use manager::{RecoveryManager, RecoveryRecord};
