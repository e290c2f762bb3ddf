//! The maturity pipeline, shared by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch history -> resolve parameters -> sort once: stats, TTF, equivalent age
//! -> check sample count -> optional strength prediction for both indices
//!
//! The service holds no mutable state; concurrent calls need no coordination.

use rayon::prelude::*;

use crate::config::MaturityDefaults;
use crate::data::TemperatureSource;
use crate::domain::{MaturityRequest, MaturityResult, MaturityRun, StrengthEstimate};
use crate::error::MaturityError;
use crate::math::{SeriesMaturity, analyze_series};
use crate::models::predict_strength;

/// Minimum number of samples for a reportable maturity.
pub const MIN_SAMPLES: usize = 2;

/// Orchestrates a temperature source, the configured defaults and the math library.
#[derive(Debug, Clone)]
pub struct MaturityService<S> {
    source: S,
    defaults: MaturityDefaults,
}

impl<S: TemperatureSource> MaturityService<S> {
    pub fn new(source: S, defaults: MaturityDefaults) -> Self {
        Self { source, defaults }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Compute both maturity indices (and strengths, if requested) for a pour.
    pub fn compute(&self, pour_id: &str, req: &MaturityRequest) -> Result<MaturityResult, MaturityError> {
        self.run(pour_id, req).map(|run| run.result)
    }

    /// Like `compute`, also returning the resolved parameters and series stats.
    pub fn run(&self, pour_id: &str, req: &MaturityRequest) -> Result<MaturityRun, MaturityError> {
        let samples = self.source.fetch_temperature_series(pour_id)?;
        let parameters = self.defaults.resolve(req);
        let series = match analyze_series(&samples, &parameters) {
            Some(series) if series.stats.n_samples >= MIN_SAMPLES => series,
            _ => {
                tracing::info!(pour_id, samples = samples.len(), "not enough temperature samples");
                return Err(MaturityError::InsufficientData {
                    pour_id: pour_id.to_string(),
                    samples: samples.len(),
                });
            }
        };
        let stats = series.stats;
        if stats.skipped_intervals > 0 {
            tracing::warn!(
                pour_id,
                skipped = stats.skipped_intervals,
                "temperature history has duplicate timestamps; those intervals were not integrated"
            );
        }

        let result = evaluate(pour_id, &series, req)?;

        tracing::debug!(
            pour_id,
            t0_c = parameters.t0_c,
            ea = parameters.ea,
            tr_c = parameters.tr_c,
            ttf_c_h = result.ttf_c_h,
            eq_age_h = result.eq_age_h,
            strength = result.strength_ttf.is_some(),
            "computed maturity"
        );

        Ok(MaturityRun {
            result,
            parameters,
            stats,
        })
    }

    /// Evaluate several pours in parallel with the same request.
    ///
    /// Each pour succeeds or fails on its own; output order follows `pour_ids`.
    pub fn compute_many(
        &self,
        pour_ids: &[String],
        req: &MaturityRequest,
    ) -> Vec<(String, Result<MaturityRun, MaturityError>)> {
        pour_ids
            .par_iter()
            .map(|id| (id.clone(), self.run(id, req)))
            .collect()
    }
}

/// Attach strength predictions to the computed indices.
fn evaluate(pour_id: &str, series: &SeriesMaturity, req: &MaturityRequest) -> Result<MaturityResult, MaturityError> {
    let SeriesMaturity { ttf_c_h, eq_age_h, .. } = *series;

    // Both predictions must succeed before either is reported.
    let (strength_ttf, strength_eq) = match req.curve() {
        Some((curve_type, params)) => {
            let ttf = predict_strength(ttf_c_h, curve_type, params)?;
            let eq = predict_strength(eq_age_h, curve_type, params)?;
            (Some(StrengthEstimate::from(ttf)), Some(StrengthEstimate::from(eq)))
        }
        None => (None, None),
    };

    Ok(MaturityResult {
        pour_id: pour_id.to_string(),
        ttf_c_h,
        eq_age_h,
        strength_ttf,
        strength_eq,
    })
}
