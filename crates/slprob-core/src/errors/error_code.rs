//! SlProbErrorCode trait for stable error codes at the evaluator boundary.

/// Trait for mapping slprob errors to stable error code strings.
/// Every error enum implements this so callers that only see text
/// (the external evaluator, log pipelines) can match on a code.
pub trait SlProbErrorCode {
    /// Returns the error code string (e.g., "INVALID_MEAN").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted coded string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const INVALID_MEAN: &str = "INVALID_MEAN";
pub const WEIGHT_PARSE_ERROR: &str = "WEIGHT_PARSE_ERROR";
pub const PROGRAM_ERROR: &str = "PROGRAM_ERROR";
pub const CONFLICTING_CONVERSION: &str = "CONFLICTING_CONVERSION";
pub const EVALUATION_ERROR: &str = "EVALUATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
