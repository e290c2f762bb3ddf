//! Strength-curve models (log / asymptotic).
//!
//! Curves are implemented as small, pure functions so that the service can
//! evaluate the same curve against both maturity indices.

pub mod strength;

pub use strength::*;
