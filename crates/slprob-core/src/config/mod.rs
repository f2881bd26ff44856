//! Configuration system for slprob.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod algebra_config;
pub mod output_config;
pub mod slprob_config;

pub use algebra_config::{AlgebraConfig, AlgebraSection, PrecisionProfile};
pub use output_config::OutputSection;
pub use slprob_config::{CliOverrides, SlProbConfig};
