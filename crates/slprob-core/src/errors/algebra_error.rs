//! Weight algebra errors.

use super::error_code::{self, SlProbErrorCode};

/// Errors raised by the Beta and opinion algebras.
///
/// Near-singular denominators are floored locally and never surface here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlgebraError {
    #[error("Error with negation: mean {mean} outside [0, 1] (variance {variance})")]
    InvalidMean { mean: f64, variance: f64 },
}

impl SlProbErrorCode for AlgebraError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMean { .. } => error_code::INVALID_MEAN,
        }
    }
}
