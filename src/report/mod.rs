//! Reporting: text rendering of maturity runs.

pub mod format;

pub use format::*;
