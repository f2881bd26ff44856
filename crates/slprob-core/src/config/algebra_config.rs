//! Numeric configuration for the weight algebras.
//!
//! `AlgebraSection` is the `[algebra]` table as it appears on disk, every
//! field optional. `AlgebraConfig` is the resolved value handed to each
//! algebra constructor, so several precision regimes can coexist in one
//! process without global state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_RATE, DEFAULT_EPSILON, DEFAULT_IDENTITY_VARIANCE, DEFAULT_PRECISION,
    DEFAULT_PRIOR_WEIGHT, WIDE_EPSILON, WIDE_IDENTITY_VARIANCE, WIDE_PRECISION,
};
use crate::errors::ConfigError;

/// Named precision regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionProfile {
    /// 15 significant digits, epsilon 1e-4.
    #[default]
    Standard,
    /// 17 significant digits, epsilon 1e-100.
    Wide,
}

impl PrecisionProfile {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for PrecisionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrecisionProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "wide" => Ok(Self::Wide),
            other => Err(ConfigError::InvalidValue {
                field: "algebra.profile".to_string(),
                message: format!("unknown profile `{other}` (expected standard or wide)"),
            }),
        }
    }
}

/// Resolved numeric parameters of an algebra.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlgebraConfig {
    /// Significant digits used when rendering weights as text.
    pub precision: u32,
    /// Near-zero floor for divisors and the complete-belief tolerance.
    pub epsilon: f64,
    /// Variance of the Beta identity elements.
    pub identity_variance: f64,
    /// Prior weight W of the Beta-opinion mapping.
    pub prior_weight: f64,
    /// Base rate assumed when projecting a Beta onto an opinion.
    pub base_rate: f64,
}

impl AlgebraConfig {
    pub fn standard() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            epsilon: DEFAULT_EPSILON,
            identity_variance: DEFAULT_IDENTITY_VARIANCE,
            prior_weight: DEFAULT_PRIOR_WEIGHT,
            base_rate: DEFAULT_BASE_RATE,
        }
    }

    pub fn wide() -> Self {
        Self {
            precision: WIDE_PRECISION,
            epsilon: WIDE_EPSILON,
            identity_variance: WIDE_IDENTITY_VARIANCE,
            prior_weight: DEFAULT_PRIOR_WEIGHT,
            base_rate: DEFAULT_BASE_RATE,
        }
    }

    pub fn for_profile(profile: PrecisionProfile) -> Self {
        match profile {
            PrecisionProfile::Standard => Self::standard(),
            PrecisionProfile::Wide => Self::wide(),
        }
    }

    /// Builder-style override of the rendering precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder-style override of the near-zero floor.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

impl Default for AlgebraConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// The `[algebra]` table of a config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlgebraSection {
    /// Precision profile. Default: standard.
    pub profile: Option<PrecisionProfile>,
    /// Significant digits for rendering. Default: from profile.
    pub precision: Option<u32>,
    /// Near-zero floor. Default: from profile.
    pub epsilon: Option<f64>,
    /// Variance of the Beta identity elements. Default: from profile.
    pub identity_variance: Option<f64>,
    /// Prior weight W. Default: 2.0.
    pub prior_weight: Option<f64>,
    /// Base rate for Beta-to-opinion projection. Default: 0.5.
    pub base_rate: Option<f64>,
}

impl AlgebraSection {
    /// Returns the effective profile, defaulting to standard.
    pub fn effective_profile(&self) -> PrecisionProfile {
        self.profile.unwrap_or_default()
    }

    /// Resolve against the profile defaults; explicit fields win.
    pub fn resolve(&self) -> AlgebraConfig {
        let base = AlgebraConfig::for_profile(self.effective_profile());
        AlgebraConfig {
            precision: self.precision.unwrap_or(base.precision),
            epsilon: self.epsilon.unwrap_or(base.epsilon),
            identity_variance: self.identity_variance.unwrap_or(base.identity_variance),
            prior_weight: self.prior_weight.unwrap_or(base.prior_weight),
            base_rate: self.base_rate.unwrap_or(base.base_rate),
        }
    }
}
