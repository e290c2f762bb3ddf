//! Input/output helpers.
//!
//! - readings CSV ingest + validation (`ingest`)
//! - request / run JSON files (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
