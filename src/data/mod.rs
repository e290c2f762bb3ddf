//! Temperature-history sources.
//!
//! The engine only sees the `TemperatureSource` trait; concrete backends are:
//!
//! - `SyntheticSource`: deterministic curing profile (demos, smoke tests)
//! - `MemorySource`: in-memory map, also produced by the readings CSV ingest
//! - `HttpSource`: a remote time-series API

pub mod http;
pub mod source;
pub mod synthetic;

pub use http::HttpSource;
pub use source::{MemorySource, TemperatureSource};
pub use synthetic::SyntheticSource;
