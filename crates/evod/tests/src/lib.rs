//! Integration, adversarial, and property tests for the evod pipeline.
//!
//! The tests live under `tests/`; this library is intentionally empty.
