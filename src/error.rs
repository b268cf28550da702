//! Error types.
//!
//! - `ModelError`: rejected calls into the model/search/curve code (bad parameters).
//! - `AppError`: what the binary reports, carrying the process exit code.

use thiserror::Error;

/// Invalid parameters reaching the model layer, or curve data that breaks its invariants.
///
/// Numeric degeneracy (an undefined efficiency at a single slip ratio) is *not* an
/// error; it is represented as `None` in the evaluated value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("ground coefficient must be finite and > 0 (got {0})")]
    InvalidCoefficient(f64),
    #[error("target efficiency must lie strictly inside (0, 1) (got {0})")]
    InvalidTarget(f64),
    #[error("{what} must be >= 2 (got {got})")]
    TooFewSamples { what: &'static str, got: usize },
    #[error("invalid slip range: min={min}, max={max} (must be finite and max>min)")]
    InvalidRange { min: f64, max: f64 },
    #[error("curve Cn = {cn} is inconsistent: {reason}")]
    InconsistentCurve { cn: f64, reason: &'static str },
    #[error("curve Cn = {cn} has the wrong selected flag for requested Cn = {requested}")]
    SelectionMismatch { requested: f64, cn: f64 },
}

#[derive(Clone, Error)]
#[error("{message}")]
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

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::new(2, format!("Invalid input: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_map_to_input_exit_code() {
        let err: AppError = ModelError::InvalidCoefficient(-3.0).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("-3"));
    }
}
