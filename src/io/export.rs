//! JSON request/result files.
//!
//! Requests use the same wire shape as the service payload, so a request file
//! can be replayed against any front-end. Run exports carry the response
//! contract plus the resolved parameters and series statistics.

use std::fs::File;
use std::path::Path;

use crate::domain::{MaturityRequest, MaturityRun};
use crate::error::AppError;

/// Read a maturity request JSON file.
pub fn read_request_json(path: &Path) -> Result<MaturityRequest, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open request JSON '{}': {e}", path.display())))?;
    let req: MaturityRequest =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid request JSON: {e}")))?;
    Ok(req)
}

/// Write one or more maturity runs as pretty JSON.
pub fn write_runs_json(path: &Path, runs: &[MaturityRun]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let result = match runs {
        [single] => serde_json::to_writer_pretty(file, single),
        _ => serde_json::to_writer_pretty(file, runs),
    };
    result.map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    tracing::info!(path = %path.display(), runs = runs.len(), "wrote maturity export");
    Ok(())
}
