//! Evaluation errors raised while folding a weighted formula.

use super::error_code::{self, SlProbErrorCode};
use super::{AlgebraError, ProgramError, WeightParseError};

/// Errors that can occur while evaluating queries over a weighted formula.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Reference to node {node}, which does not exist")]
    DanglingNode { node: usize },

    #[error("Atom refers to weighted fact {index}, which the program does not have")]
    UnknownFact { index: usize },

    #[error("Algebra error: {0}")]
    Algebra(#[from] AlgebraError),

    #[error("Weight parse error: {0}")]
    Weight(#[from] WeightParseError),

    #[error("Program error: {0}")]
    Program(#[from] ProgramError),
}

impl SlProbErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Algebra(e) => e.error_code(),
            Self::Weight(e) => e.error_code(),
            Self::Program(e) => e.error_code(),
            _ => error_code::EVALUATION_ERROR,
        }
    }
}
