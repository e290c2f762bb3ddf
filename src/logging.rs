//! Logging setup (`tracing` + `tracing-subscriber`).
//!
//! The level comes from `RUST_LOG` (default `info`), e.g.
//! `RUST_LOG=cmm_maturity=debug`. Logs go to stderr so JSON on stdout stays
//! machine-readable.

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging for the `cmm` binary.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Initialize verbose logging for tests (captured by the test harness).
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
