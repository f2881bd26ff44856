//! Error handling for slprob.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod algebra_error;
pub mod config_error;
pub mod error_code;
pub mod evaluation_error;
pub mod program_error;
pub mod slprob_error;
pub mod weight_parse_error;

pub use algebra_error::AlgebraError;
pub use config_error::ConfigError;
pub use error_code::SlProbErrorCode;
pub use evaluation_error::EvaluationError;
pub use program_error::ProgramError;
pub use slprob_error::SlProbError;
pub use weight_parse_error::WeightParseError;
