//! `cmm-maturity` library crate.
//!
//! Concrete maturity engine: temperature-time factor, Arrhenius equivalent
//! age and strength-curve prediction over a pour's temperature history.
//!
//! The binary (`cmm`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the service can be embedded behind other front-ends

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod report;
