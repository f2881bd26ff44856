//! Weighted-program conversion errors.

use super::error_code::{self, SlProbErrorCode};
use super::WeightParseError;

/// Errors that can occur while rewriting weight annotations in a program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("Problem with line {line_no}: {line}")]
    MalformedLine { line_no: usize, line: String },

    #[error("Problem with weight on line {line_no}: {source}")]
    Weight {
        line_no: usize,
        #[source]
        source: WeightParseError,
    },

    #[error("Cannot convert both to SL and to Beta")]
    ConflictingConversion,
}

impl SlProbErrorCode for ProgramError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConflictingConversion => error_code::CONFLICTING_CONVERSION,
            _ => error_code::PROGRAM_ERROR,
        }
    }
}
