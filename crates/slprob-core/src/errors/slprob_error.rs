//! Top-level error aggregating every subsystem.

use super::error_code::SlProbErrorCode;
use super::{AlgebraError, ConfigError, EvaluationError, ProgramError, WeightParseError};

/// Any error a full run can produce.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SlProbError {
    #[error("Algebra error: {0}")]
    Algebra(#[from] AlgebraError),

    #[error("Weight parse error: {0}")]
    Weight(#[from] WeightParseError),

    #[error("Program error: {0}")]
    Program(#[from] ProgramError),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SlProbErrorCode for SlProbError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Algebra(e) => e.error_code(),
            Self::Weight(e) => e.error_code(),
            Self::Program(e) => e.error_code(),
            Self::Evaluation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
