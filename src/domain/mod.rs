//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - temperature history inputs (`TemperatureSample`, `TemperatureSeries`)
//! - strength-curve selection (`CurveKind`, `CurveParams`)
//! - the request/response contracts (`MaturityRequest`, `MaturityResult`, `StrengthEstimate`)
//! - run diagnostics (`ModelParameters`, `SeriesStats`, `MaturityRun`)

pub mod types;

pub use types::*;
