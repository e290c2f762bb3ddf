//! The temperature-history collaborator contract.

use std::collections::HashMap;

use crate::domain::{TemperatureSample, TemperatureSeries};
use crate::error::MaturityError;

/// Anything that can produce the temperature history of a pour.
///
/// Contract: a finite, possibly empty, series in any order, or
/// `MaturityError::NotFound` when the pour is unknown.
pub trait TemperatureSource: Send + Sync {
    fn fetch_temperature_series(&self, pour_id: &str) -> Result<TemperatureSeries, MaturityError>;
}

impl<S: TemperatureSource + ?Sized> TemperatureSource for &S {
    fn fetch_temperature_series(&self, pour_id: &str) -> Result<TemperatureSeries, MaturityError> {
        (**self).fetch_temperature_series(pour_id)
    }
}

impl<S: TemperatureSource + ?Sized> TemperatureSource for Box<S> {
    fn fetch_temperature_series(&self, pour_id: &str) -> Result<TemperatureSeries, MaturityError> {
        (**self).fetch_temperature_series(pour_id)
    }
}

/// In-memory pour → series map.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    series: HashMap<String, TemperatureSeries>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pour_id` (possibly with an empty history) and return the source.
    pub fn with_series(mut self, pour_id: impl Into<String>, samples: TemperatureSeries) -> Self {
        self.insert(pour_id, samples);
        self
    }

    pub fn insert(&mut self, pour_id: impl Into<String>, samples: TemperatureSeries) {
        self.series.insert(pour_id.into(), samples);
    }

    /// Append one reading, registering the pour if needed.
    pub fn push(&mut self, pour_id: &str, sample: TemperatureSample) {
        self.series.entry(pour_id.to_string()).or_default().push(sample);
    }

    /// Register a pour without readings.
    pub fn register(&mut self, pour_id: &str) {
        self.series.entry(pour_id.to_string()).or_default();
    }

    /// Known pour ids, sorted.
    pub fn pour_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.series.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl TemperatureSource for MemorySource {
    fn fetch_temperature_series(&self, pour_id: &str) -> Result<TemperatureSeries, MaturityError> {
        self.series
            .get(pour_id)
            .cloned()
            .ok_or_else(|| MaturityError::NotFound(pour_id.to_string()))
    }
}
