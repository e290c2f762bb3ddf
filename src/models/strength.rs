//! Strength-curve evaluation.
//!
//! Maps a maturity scalar (TTF or equivalent age) through an already-fitted
//! curve to a mean compressive strength, with an optional symmetric 95%
//! interval `mean ± 1.96·σ`.
//!
//! Numerical notes:
//! - The log curve clamps maturity to `max(m, max(min_maturity, ε))` before
//!   `ln`, so zero/negative maturity and a zero/negative `min_maturity` never
//!   hit a domain error.
//! - Evaluation is pure; identical inputs give bit-identical outputs.

use crate::domain::{ConfidenceInterval, CurveKind, CurveParams, StrengthPrediction};
use crate::error::MaturityError;

/// Floor under `min_maturity` guarding `ln(0)`.
const MIN_MATURITY_EPS: f64 = 1e-9;

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

/// Predict strength for a curve given by its wire tag (`"log"` / `"asymptotic"`).
pub fn predict_strength(
    maturity: f64,
    curve_type: &str,
    params: &CurveParams,
) -> Result<StrengthPrediction, MaturityError> {
    let kind: CurveKind = curve_type.parse()?;
    predict_with_kind(maturity, kind, params)
}

/// Predict strength for an already-resolved curve kind.
pub fn predict_with_kind(
    maturity: f64,
    kind: CurveKind,
    params: &CurveParams,
) -> Result<StrengthPrediction, MaturityError> {
    let mean = match kind {
        CurveKind::Log => {
            let a = require(params.a, kind, "a")?;
            let b = require(params.b, kind, "b")?;
            let floor = params.min_maturity.max(MIN_MATURITY_EPS);
            a * maturity.max(floor).ln() + b
        }
        CurveKind::Asymptotic => {
            let f_u = require(params.f_u, kind, "f_u")?;
            let k = require(params.k, kind, "k")?;
            f_u * (1.0 - (-k * maturity).exp())
        }
    };

    let interval = params.sigma.map(|sigma| {
        let delta = Z_95 * sigma;
        ConfidenceInterval {
            lower: mean - delta,
            upper: mean + delta,
        }
    });

    Ok(StrengthPrediction { mean, interval })
}

fn require(value: Option<f64>, curve: CurveKind, parameter: &'static str) -> Result<f64, MaturityError> {
    value.ok_or(MaturityError::MissingParameter { curve, parameter })
}
