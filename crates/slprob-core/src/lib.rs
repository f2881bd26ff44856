//! slprob-core: shared infrastructure for the slprob weight algebras
//!
//! - Errors: one `thiserror` enum per subsystem plus the `SlProbError` aggregate
//! - Config: layered TOML configuration and the resolved `AlgebraConfig`
//! - Tracing: `SLPROB_LOG`-driven subscriber setup
//! - Constants: numeric defaults and floors

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;

pub use config::{AlgebraConfig, PrecisionProfile, SlProbConfig};
pub use errors::{SlProbError, SlProbErrorCode};
