#![deny(unsafe_code)]
//! # evod-tier-router
//!
//! Pure classification of (proposal, review verdict) into a commit-policy
//! tier. The router holds no state and performs no side effects; every
//! threshold it consults is configuration.

pub mod policy;
pub mod router;

pub use policy::RouterPolicy;
pub use router::TierRouter;
