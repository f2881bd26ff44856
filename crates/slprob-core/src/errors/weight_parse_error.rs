//! Weight literal parse errors.

use super::error_code::{self, SlProbErrorCode};

/// Errors that can occur while parsing a `b(..)` or `w(..)` weight literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeightParseError {
    #[error("Malformed weight literal `{literal}`: {message}")]
    Malformed { literal: String, message: String },

    #[error("Unknown weight tag in `{literal}` (expected `b` or `w`)")]
    UnknownTag { literal: String },

    #[error("Weight literal `{literal}` has {found} components, expected {expected}")]
    Arity {
        literal: String,
        expected: String,
        found: usize,
    },

    #[error("Invalid number `{token}` in weight literal `{literal}`")]
    InvalidNumber { literal: String, token: String },
}

impl SlProbErrorCode for WeightParseError {
    fn error_code(&self) -> &'static str {
        error_code::WEIGHT_PARSE_ERROR
    }
}
