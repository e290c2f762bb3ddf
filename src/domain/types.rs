//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a maturity computation
//! - decoded from request JSON / readings feeds
//! - exported to JSON for downstream reporting

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MaturityError;

/// Strength units reported alongside every estimate.
pub const STRENGTH_UNITS: &str = "MPa";

/// One temperature reading of a pour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSample {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub ts: DateTime<Utc>,
    pub celsius: f64,
}

impl TemperatureSample {
    pub fn new(ts: DateTime<Utc>, celsius: f64) -> Self {
        Self { ts, celsius }
    }
}

/// Parse an RFC 3339 timestamp, or a naive one interpreted as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    const FMTS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FMTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!(
        "Invalid timestamp '{s}'. Expected RFC 3339 or YYYY-MM-DD HH:MM[:SS] (UTC)."
    ))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(raw.trim()).map_err(serde::de::Error::custom)
}

/// Temperature history of one pour, in any order.
///
/// Consumers sort by timestamp before integrating; callers never need to.
pub type TemperatureSeries = Vec<TemperatureSample>;

/// Strength-curve family relating maturity to compressive strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// `mean = a * ln(max(m, max(min_maturity, ε))) + b`
    Log,
    /// `mean = f_u * (1 - exp(-k * m))`
    Asymptotic,
}

impl CurveKind {
    pub const ALL: [CurveKind; 2] = [CurveKind::Log, CurveKind::Asymptotic];

    /// Wire tag used in requests (`curve_type`).
    pub fn as_str(self) -> &'static str {
        match self {
            CurveKind::Log => "log",
            CurveKind::Asymptotic => "asymptotic",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveKind {
    type Err = MaturityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurveKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| MaturityError::UnsupportedCurve(s.to_string()))
    }
}

fn default_min_maturity() -> f64 {
    1.0
}

/// Already-fitted strength-curve parameters.
///
/// Which fields are required depends on the curve: `a`/`b` for `log`,
/// `f_u`/`k` for `asymptotic`. `sigma` only controls the confidence interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    #[serde(default)]
    pub a: Option<f64>,
    #[serde(default)]
    pub b: Option<f64>,
    #[serde(default)]
    pub f_u: Option<f64>,
    #[serde(default)]
    pub k: Option<f64>,
    #[serde(default)]
    pub sigma: Option<f64>,
    /// Lower clamp applied to maturity before the logarithm (log curve only).
    #[serde(default = "default_min_maturity")]
    pub min_maturity: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            a: None,
            b: None,
            f_u: None,
            k: None,
            sigma: None,
            min_maturity: default_min_maturity(),
        }
    }
}

impl CurveParams {
    pub fn log(a: f64, b: f64) -> Self {
        Self {
            a: Some(a),
            b: Some(b),
            ..Self::default()
        }
    }

    pub fn asymptotic(f_u: f64, k: f64) -> Self {
        Self {
            f_u: Some(f_u),
            k: Some(k),
            ..Self::default()
        }
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }
}

/// Request payload for a maturity computation.
///
/// Every field is optional. Strength prediction runs only when both
/// `curve_type` and `curve_params` are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaturityRequest {
    #[serde(default)]
    pub curve_type: Option<String>,
    #[serde(default)]
    pub curve_params: Option<CurveParams>,
    /// Datum temperature override (°C).
    #[serde(default, rename = "T0_c")]
    pub t0_c: Option<f64>,
    /// Activation energy override (J/mol).
    #[serde(default, rename = "Ea")]
    pub ea: Option<f64>,
    /// Reference temperature override (°C).
    #[serde(default, rename = "Tr_c")]
    pub tr_c: Option<f64>,
}

impl MaturityRequest {
    /// The curve selection, if one was explicitly requested.
    pub fn curve(&self) -> Option<(&str, &CurveParams)> {
        match (&self.curve_type, &self.curve_params) {
            (Some(curve_type), Some(params)) => Some((curve_type.as_str(), params)),
            _ => None,
        }
    }
}

/// Effective maturity-model parameters for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Datum temperature (°C) for TTF.
    pub t0_c: f64,
    /// Activation energy (J/mol) for equivalent age.
    pub ea: f64,
    /// Reference temperature (°C) for equivalent age.
    pub tr_c: f64,
}

/// Symmetric 95% confidence interval around a strength mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Output of the strength-curve evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthPrediction {
    pub mean: f64,
    /// `None` when no `sigma` was supplied (distinct from a zero-width interval).
    pub interval: Option<ConfidenceInterval>,
}

/// Strength estimate as reported in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthEstimate {
    pub mean: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    pub units: String,
}

impl From<StrengthPrediction> for StrengthEstimate {
    fn from(prediction: StrengthPrediction) -> Self {
        Self {
            mean: prediction.mean,
            lower: prediction.interval.map(|ci| ci.lower),
            upper: prediction.interval.map(|ci| ci.upper),
            units: STRENGTH_UNITS.to_string(),
        }
    }
}

/// Response contract of `MaturityService::compute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityResult {
    pub pour_id: String,
    /// Nurse-Saul time-temperature factor, °C·h.
    pub ttf_c_h: f64,
    /// Arrhenius equivalent age, h.
    pub eq_age_h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength_ttf: Option<StrengthEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength_eq: Option<StrengthEstimate>,
}

/// Descriptive statistics of a temperature series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub n_samples: usize,
    /// Last minus first timestamp, in hours.
    pub duration_h: f64,
    /// Consecutive pairs with a non-positive time delta (not integrated).
    pub skipped_intervals: usize,
    pub min_c: f64,
    pub max_c: f64,
    pub mean_c: f64,
}

/// A computed result plus the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityRun {
    pub result: MaturityResult,
    pub parameters: ModelParameters,
    pub stats: SeriesStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_kind_parses_known_tags_only() {
        assert_eq!("log".parse::<CurveKind>().unwrap(), CurveKind::Log);
        assert_eq!("asymptotic".parse::<CurveKind>().unwrap(), CurveKind::Asymptotic);
        assert_eq!(
            "Log".parse::<CurveKind>(),
            Err(MaturityError::UnsupportedCurve("Log".to_string()))
        );
    }

    #[test]
    fn request_uses_wire_names_and_defaults() {
        let req: MaturityRequest = serde_json::from_str(
            r#"{"curve_type":"log","curve_params":{"a":4.2,"b":-6.0},"T0_c":0.0,"Ea":40000.0,"Tr_c":25.0,"extra":1}"#,
        )
        .unwrap();
        assert_eq!(req.t0_c, Some(0.0));
        assert_eq!(req.ea, Some(40000.0));
        assert_eq!(req.tr_c, Some(25.0));
        let params = req.curve_params.as_ref().unwrap();
        assert_eq!(params.min_maturity, 1.0);
        assert_eq!(params.sigma, None);

        let empty: MaturityRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, MaturityRequest::default());
        assert!(empty.curve().is_none());
    }

    #[test]
    fn curve_requires_both_type_and_params() {
        let only_type = MaturityRequest {
            curve_type: Some("log".to_string()),
            ..MaturityRequest::default()
        };
        assert!(only_type.curve().is_none());

        let empty_params = MaturityRequest {
            curve_type: Some("log".to_string()),
            curve_params: Some(CurveParams::default()),
            ..MaturityRequest::default()
        };
        assert!(empty_params.curve().is_some());
    }

    #[test]
    fn absent_strength_fields_are_omitted() {
        let result = MaturityResult {
            pour_id: "P1".to_string(),
            ttf_c_h: 10.0,
            eq_age_h: 2.0,
            strength_ttf: Some(StrengthEstimate::from(StrengthPrediction {
                mean: 12.0,
                interval: None,
            })),
            strength_eq: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("strength_eq").is_none());
        let ttf = &value["strength_ttf"];
        assert_eq!(ttf["units"], "MPa");
        assert!(ttf.get("lower").is_none());
        assert!(ttf.get("upper").is_none());
    }
}
