//! Process-wide maturity-model defaults.
//!
//! Defaults are read once at startup and handed to `MaturityService` at
//! construction time. Environment variables (optionally from `.env`):
//!
//! - `MATURITY_T0_C` datum temperature, °C (default `-10.0`)
//! - `MATURITY_EA`   activation energy, J/mol (default `33500`)
//! - `MATURITY_TR_C` reference temperature, °C (default `20.0`)

use crate::domain::{MaturityRequest, ModelParameters};
use crate::error::AppError;

pub const ENV_T0_C: &str = "MATURITY_T0_C";
pub const ENV_EA: &str = "MATURITY_EA";
pub const ENV_TR_C: &str = "MATURITY_TR_C";

/// Fallback values for parameters a request does not override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaturityDefaults {
    pub t0_c: f64,
    pub ea: f64,
    pub tr_c: f64,
}

impl Default for MaturityDefaults {
    fn default() -> Self {
        Self {
            t0_c: -10.0,
            ea: 33_500.0,
            tr_c: 20.0,
        }
    }
}

impl MaturityDefaults {
    /// Load defaults from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load defaults through an arbitrary key lookup.
    ///
    /// Unset or blank keys keep the built-in default; anything else must parse
    /// to a finite number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();
        Ok(Self {
            t0_c: read_f64(&lookup, ENV_T0_C, base.t0_c)?,
            ea: read_f64(&lookup, ENV_EA, base.ea)?,
            tr_c: read_f64(&lookup, ENV_TR_C, base.tr_c)?,
        })
    }

    /// Merge request overrides over these defaults.
    pub fn resolve(&self, req: &MaturityRequest) -> ModelParameters {
        ModelParameters {
            t0_c: req.t0_c.unwrap_or(self.t0_c),
            ea: req.ea.unwrap_or(self.ea),
            tr_c: req.tr_c.unwrap_or(self.tr_c),
        }
    }
}

fn read_f64<F>(lookup: &F, key: &str, default: f64) -> Result<f64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AppError::new(
            2,
            format!("Invalid {key}='{raw}' (expected a finite number)."),
        )),
    }
}
