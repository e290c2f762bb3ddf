//! Deterministic synthetic temperature history.
//!
//! Stand-in for a real time-series backend: every pour gets the same 25-hour
//! hourly curing profile starting 2025-01-01T00:00Z:
//!
//! - hours 0..8:   warming, `22 + 1.5·h` °C
//! - hours 8..16:  slow rise, `34 + 0.5·(h - 8)` °C
//! - hours 16..=24: cooling, `38 - (h - 16)` °C

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::data::source::TemperatureSource;
use crate::domain::{TemperatureSample, TemperatureSeries};
use crate::error::MaturityError;

/// Number of hourly samples produced.
pub const SYNTHETIC_HOURS: usize = 25;

#[derive(Debug, Clone)]
pub struct SyntheticSource {
    start: DateTime<Utc>,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> TemperatureSeries {
        (0..SYNTHETIC_HOURS)
            .map(|hour| {
                let ts = self.start + Duration::hours(hour as i64);
                TemperatureSample::new(ts, profile_celsius(hour))
            })
            .collect()
    }
}

fn profile_celsius(hour: usize) -> f64 {
    let h = hour as f64;
    if hour < 8 {
        22.0 + h * 1.5
    } else if hour < 16 {
        34.0 + (h - 8.0) * 0.5
    } else {
        38.0 - (h - 16.0)
    }
}

impl TemperatureSource for SyntheticSource {
    fn fetch_temperature_series(&self, pour_id: &str) -> Result<TemperatureSeries, MaturityError> {
        if pour_id.trim().is_empty() {
            return Err(MaturityError::NotFound(pour_id.to_string()));
        }
        tracing::debug!(pour_id, samples = SYNTHETIC_HOURS, "serving synthetic temperature profile");
        Ok(self.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_shape() {
        let series = SyntheticSource::new().profile();
        assert_eq!(series.len(), SYNTHETIC_HOURS);
        assert_eq!(series[0].celsius, 22.0);
        assert_eq!(series[8].celsius, 34.0);
        assert_eq!(series[16].celsius, 38.0);
        assert_eq!(series[24].celsius, 30.0);
        assert_eq!(series[24].ts - series[0].ts, Duration::hours(24));
    }

    #[test]
    fn blank_pour_is_not_found() {
        let source = SyntheticSource::new();
        assert!(matches!(
            source.fetch_temperature_series("  "),
            Err(MaturityError::NotFound(_))
        ));
        assert!(source.fetch_temperature_series("P-1").is_ok());
    }
}
