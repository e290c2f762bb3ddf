//! Readings CSV ingest.
//!
//! Turns a readings export into a `MemorySource` the engine can query.
//!
//! Schema (header names are case-insensitive, a UTF-8 BOM is tolerated, extra
//! columns such as `sensor_id` are ignored):
//!
//! ```text
//! pour_id,ts,celsius
//! P-001,2025-01-01T00:00:00Z,22.0
//! ```
//!
//! - **Strict schema** for the three required columns (exit code 2)
//! - **Row-level validation**: bad rows are skipped and reported
//! - A pour id seen on any row is known, even if none of its rows survive

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::data::MemorySource;
use crate::domain::TemperatureSample;
use crate::error::AppError;

pub use crate::domain::parse_timestamp;

/// Accepted physical range for a reading, °C.
pub const MIN_CELSIUS: f64 = -200.0;
pub const MAX_CELSIUS: f64 = 300.0;

const REQUIRED_COLUMNS: [&str; 3] = ["pour_id", "ts", "celsius"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub pour_id: Option<String>,
    pub message: String,
}

/// Ingest output: the populated source + what happened along the way.
#[derive(Debug, Clone)]
pub struct IngestedReadings {
    pub source: MemorySource,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a readings CSV file.
pub fn load_readings_csv(path: &Path) -> Result<IngestedReadings, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open readings CSV '{}': {e}", path.display()))
    })?;
    let ingested = read_readings(file)?;
    tracing::info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_used = ingested.rows_used,
        row_errors = ingested.row_errors.len(),
        "loaded readings CSV"
    );
    Ok(ingested)
}

/// Parse readings CSV from any reader.
pub fn read_readings<R: Read>(reader: R) -> Result<IngestedReadings, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(AppError::new(2, format!("Missing required column: `{column}`")));
        }
    }

    let mut source = MemorySource::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_used = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header; CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    pour_id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let pour_id = match get_required(&record, &header_map, "pour_id") {
            Ok(id) => id.to_string(),
            Err(message) => {
                row_errors.push(RowError {
                    line,
                    pour_id: None,
                    message,
                });
                continue;
            }
        };
        source.register(&pour_id);

        match parse_sample(&record, &header_map) {
            Ok(sample) => {
                source.push(&pour_id, sample);
                rows_used += 1;
            }
            Err(message) => row_errors.push(RowError {
                line,
                pour_id: Some(pour_id),
                message,
            }),
        }
    }

    for err in &row_errors {
        tracing::warn!(line = err.line, pour_id = ?err.pour_id, "skipped reading: {}", err.message);
    }

    Ok(IngestedReadings {
        source,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_sample(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<TemperatureSample, String> {
    let ts = parse_timestamp(get_required(record, header_map, "ts")?)?;
    let raw = get_required(record, header_map, "celsius")?;
    let celsius = raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid `celsius` value '{raw}'."))?;
    if !celsius.is_finite() || !(MIN_CELSIUS..=MAX_CELSIUS).contains(&celsius) {
        return Err(format!(
            "`celsius` {celsius} outside [{MIN_CELSIUS}, {MAX_CELSIUS}]."
        ));
    }
    Ok(TemperatureSample::new(ts, celsius))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}
