//! Beta algebra: weights are (mean, variance) pairs.

use slprob_core::config::AlgebraConfig;
use slprob_core::errors::{AlgebraError, WeightParseError};

use super::WeightAlgebra;
use crate::beta::BetaDistribution;
use crate::weight::WeightLiteral;

/// Weight algebra over [`BetaDistribution`].
///
/// The identities carry the configured identity variance rather than zero,
/// so their strength stays finite.
#[derive(Debug, Clone, Default)]
pub struct BetaAlgebra {
    config: AlgebraConfig,
}

impl BetaAlgebra {
    pub fn new(config: AlgebraConfig) -> Self {
        Self { config }
    }

    fn make(&self, mean: f64, variance: f64) -> BetaDistribution {
        BetaDistribution::with_epsilon(mean, variance, self.config.epsilon)
    }
}

impl WeightAlgebra for BetaAlgebra {
    type Weight = BetaDistribution;

    fn config(&self) -> &AlgebraConfig {
        &self.config
    }

    fn one(&self) -> BetaDistribution {
        self.make(1.0, self.config.identity_variance)
    }

    fn zero(&self) -> BetaDistribution {
        self.make(0.0, self.config.identity_variance)
    }

    fn plus(&self, a: &BetaDistribution, b: &BetaDistribution) -> BetaDistribution {
        a.sum(b)
    }

    fn times(&self, a: &BetaDistribution, b: &BetaDistribution) -> BetaDistribution {
        a.product(b)
    }

    fn negate(&self, a: &BetaDistribution) -> Result<BetaDistribution, AlgebraError> {
        a.negate()
    }

    /// Evidence that is complete belief leaves `a` unchanged.
    fn normalize(&self, a: &BetaDistribution, z: &BetaDistribution) -> BetaDistribution {
        if z.is_complete_belief() {
            return *a;
        }
        a.conditioning(z)
    }

    fn is_dsp(&self) -> bool {
        true
    }

    fn parse(&self, literal: &str) -> Result<BetaDistribution, WeightParseError> {
        match WeightLiteral::parse_with(literal, &self.config)? {
            WeightLiteral::Beta(b) => Ok(b),
            WeightLiteral::Opinion(_) => Err(WeightParseError::Malformed {
                literal: literal.to_string(),
                message: "opinion literal given to the Beta algebra".to_string(),
            }),
        }
    }

    fn format(&self, a: &BetaDistribution) -> String {
        a.render(self.config.precision)
    }
}
