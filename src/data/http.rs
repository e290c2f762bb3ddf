//! HTTP time-series backend.
//!
//! Fetches `GET {base_url}/pours/{pour_id}/readings`, which must answer with a
//! JSON array of `{"ts": RFC 3339, "celsius": number}` objects. A 404 maps to
//! `MaturityError::NotFound`; any other failure is a `MaturityError::Source`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};

use crate::data::source::TemperatureSource;
use crate::domain::TemperatureSeries;
use crate::error::{AppError, MaturityError};

pub const ENV_READINGS_URL: &str = "MATURITY_READINGS_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "MATURITY_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim())
            .map_err(|e| AppError::new(2, format!("Invalid {ENV_READINGS_URL} '{raw}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::new(2, format!("Invalid {ENV_READINGS_URL} '{raw}': not a base URL")));
        }
        Ok(Self { client, base_url })
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(ENV_READINGS_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(2, format!("Missing {ENV_READINGS_URL} in environment (.env)."))
            })?;

        let timeout_secs = match std::env::var(ENV_HTTP_TIMEOUT_SECS) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::new(
                    2,
                    format!("Invalid {ENV_HTTP_TIMEOUT_SECS}='{raw}' (expected whole seconds)."),
                )
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    /// `{base}/pours/{pour_id}/readings`, with `pour_id` percent-encoded as one segment.
    pub fn readings_url(&self, pour_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["pours", pour_id, "readings"]);
        }
        url
    }
}

impl TemperatureSource for HttpSource {
    fn fetch_temperature_series(&self, pour_id: &str) -> Result<TemperatureSeries, MaturityError> {
        let url = self.readings_url(pour_id);
        tracing::debug!(pour_id, %url, "fetching temperature readings");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| MaturityError::Source(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MaturityError::NotFound(pour_id.to_string()));
        }
        if !status.is_success() {
            return Err(MaturityError::Source(format!("{url} answered HTTP {status}")));
        }

        let series: TemperatureSeries = resp
            .json()
            .map_err(|e| MaturityError::Source(format!("invalid readings payload from {url}: {e}")))?;
        tracing::debug!(pour_id, samples = series.len(), "received temperature readings");
        Ok(series)
    }
}
