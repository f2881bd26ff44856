//! Top-level slprob configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AlgebraConfig, AlgebraSection, OutputSection, PrecisionProfile};
use crate::constants::MAX_PRECISION;
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "slprob.toml";

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SLPROB_*`)
/// 3. Project config (`slprob.toml` in project root)
/// 4. User config (`~/.slprob/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SlProbConfig {
    pub algebra: AlgebraSection,
    pub output: OutputSection,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub profile: Option<PrecisionProfile>,
    pub precision: Option<u32>,
    pub epsilon: Option<f64>,
    pub sl_output: Option<bool>,
    pub moment_matching: Option<bool>,
}

impl SlProbConfig {
    /// Load configuration with layered resolution.
    ///
    /// Resolution order (highest priority first):
    /// 1. CLI flags
    /// 2. Environment variables (`SLPROB_*`)
    /// 3. Project config (`slprob.toml` in `root`)
    /// 4. User config (`~/.slprob/config.toml`)
    /// 5. Compiled defaults
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(
            profile = %config.algebra.effective_profile(),
            moment_matching = config.output.effective_moment_matching(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// The resolved numeric parameters for algebra constructors.
    pub fn algebra_config(&self) -> AlgebraConfig {
        self.algebra.resolve()
    }

    /// Validate the configuration values.
    pub fn validate(config: &SlProbConfig) -> Result<(), ConfigError> {
        let resolved = config.algebra.resolve();
        if !(resolved.epsilon > 0.0 && resolved.epsilon < 0.5) {
            return Err(ConfigError::ValidationFailed {
                field: "algebra.epsilon".to_string(),
                message: "must be greater than 0.0 and less than 0.5".to_string(),
            });
        }
        if resolved.precision == 0 || resolved.precision > MAX_PRECISION {
            return Err(ConfigError::ValidationFailed {
                field: "algebra.precision".to_string(),
                message: format!("must be between 1 and {MAX_PRECISION}"),
            });
        }
        if !(resolved.identity_variance >= 0.0 && resolved.identity_variance.is_finite()) {
            return Err(ConfigError::ValidationFailed {
                field: "algebra.identity_variance".to_string(),
                message: "must be a finite non-negative number".to_string(),
            });
        }
        if !(resolved.prior_weight > 0.0 && resolved.prior_weight.is_finite()) {
            return Err(ConfigError::ValidationFailed {
                field: "algebra.prior_weight".to_string(),
                message: "must be greater than 0.0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&resolved.base_rate) {
            return Err(ConfigError::ValidationFailed {
                field: "algebra.base_rate".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.slprob/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut SlProbConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
                path: path.display().to_string(),
                source,
            })?;

        let file_config: SlProbConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut SlProbConfig, other: &SlProbConfig) {
        // Algebra
        if other.algebra.profile.is_some() {
            base.algebra.profile = other.algebra.profile;
        }
        if other.algebra.precision.is_some() {
            base.algebra.precision = other.algebra.precision;
        }
        if other.algebra.epsilon.is_some() {
            base.algebra.epsilon = other.algebra.epsilon;
        }
        if other.algebra.identity_variance.is_some() {
            base.algebra.identity_variance = other.algebra.identity_variance;
        }
        if other.algebra.prior_weight.is_some() {
            base.algebra.prior_weight = other.algebra.prior_weight;
        }
        if other.algebra.base_rate.is_some() {
            base.algebra.base_rate = other.algebra.base_rate;
        }

        // Output
        if other.output.moment_matching.is_some() {
            base.output.moment_matching = other.output.moment_matching;
        }
        if other.output.sl_output.is_some() {
            base.output.sl_output = other.output.sl_output;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SLPROB_ALGEBRA_EPSILON`, `SLPROB_OUTPUT_SL_OUTPUT`, etc.
    /// Unparsable numbers are ignored; an unknown profile name is an error.
    fn apply_env_overrides(config: &mut SlProbConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SLPROB_ALGEBRA_PROFILE") {
            config.algebra.profile = Some(val.parse::<PrecisionProfile>()?);
        }
        if let Ok(val) = std::env::var("SLPROB_ALGEBRA_PRECISION") {
            if let Ok(v) = val.parse::<u32>() {
                config.algebra.precision = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SLPROB_ALGEBRA_EPSILON") {
            if let Ok(v) = val.parse::<f64>() {
                config.algebra.epsilon = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SLPROB_ALGEBRA_PRIOR_WEIGHT") {
            if let Ok(v) = val.parse::<f64>() {
                config.algebra.prior_weight = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SLPROB_ALGEBRA_BASE_RATE") {
            if let Ok(v) = val.parse::<f64>() {
                config.algebra.base_rate = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SLPROB_OUTPUT_MOMENT_MATCHING") {
            if let Ok(v) = val.parse::<bool>() {
                config.output.moment_matching = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SLPROB_OUTPUT_SL_OUTPUT") {
            if let Ok(v) = val.parse::<bool>() {
                config.output.sl_output = Some(v);
            }
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut SlProbConfig, cli: &CliOverrides) {
        if let Some(v) = cli.profile {
            config.algebra.profile = Some(v);
        }
        if let Some(v) = cli.precision {
            config.algebra.precision = Some(v);
        }
        if let Some(v) = cli.epsilon {
            config.algebra.epsilon = Some(v);
        }
        if let Some(v) = cli.sl_output {
            config.output.sl_output = Some(v);
        }
        if let Some(v) = cli.moment_matching {
            config.output.moment_matching = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Returns the user-level slprob config directory: `~/.slprob/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".slprob"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
