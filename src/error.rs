//! Error types.
//!
//! Two layers:
//!
//! - `MaturityError`: the engine/service taxonomy. Every variant is a
//!   deterministic function of the input, so nothing here is retried.
//! - `AppError`: the CLI boundary error carrying a process exit code.

use thiserror::Error;

use crate::domain::CurveKind;

/// Failures of the maturity engine and its collaborators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaturityError {
    /// Fewer than two temperature samples are available for the pour.
    #[error("insufficient temperature samples for pour '{pour_id}': got {samples}, need at least 2")]
    InsufficientData { pour_id: String, samples: usize },

    /// The selected curve lacks a parameter it needs.
    #[error("{curve} curve requires parameter '{parameter}'")]
    MissingParameter {
        curve: CurveKind,
        parameter: &'static str,
    },

    /// The curve tag is not one of `log` / `asymptotic`.
    #[error("unsupported curve_type '{0}' (expected 'log' or 'asymptotic')")]
    UnsupportedCurve(String),

    /// The temperature collaborator does not know the pour.
    #[error("pour '{0}' not found")]
    NotFound(String),

    /// The temperature collaborator failed to deliver a series (transport, decoding).
    #[error("temperature source error: {0}")]
    Source(String),
}

impl MaturityError {
    /// True for failures caused by the request itself (bad curve selection).
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            MaturityError::MissingParameter { .. } | MaturityError::UnsupportedCurve(_)
        )
    }

    /// Exit code used by the `cmm` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            MaturityError::MissingParameter { .. } | MaturityError::UnsupportedCurve(_) => 2,
            MaturityError::InsufficientData { .. } => 3,
            MaturityError::Source(_) => 4,
            MaturityError::NotFound(_) => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<MaturityError> for AppError {
    fn from(err: MaturityError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
