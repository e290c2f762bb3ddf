//! Maturity mathematics: interval decomposition and the two maturity indices.

pub mod intervals;
pub mod maturity;

pub use intervals::*;
pub use maturity::*;
