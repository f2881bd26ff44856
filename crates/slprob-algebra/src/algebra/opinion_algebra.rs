//! Subjective Logic algebra: weights are opinions.

use slprob_core::config::AlgebraConfig;
use slprob_core::errors::{AlgebraError, WeightParseError};

use super::WeightAlgebra;
use crate::opinion::Opinion;
use crate::weight::WeightLiteral;

/// Weight algebra over [`Opinion`].
#[derive(Debug, Clone, Default)]
pub struct OpinionAlgebra {
    config: AlgebraConfig,
}

impl OpinionAlgebra {
    pub fn new(config: AlgebraConfig) -> Self {
        Self { config }
    }
}

impl WeightAlgebra for OpinionAlgebra {
    type Weight = Opinion;

    fn config(&self) -> &AlgebraConfig {
        &self.config
    }

    fn one(&self) -> Opinion {
        Opinion::one().with_floor(self.config.epsilon)
    }

    fn zero(&self) -> Opinion {
        Opinion::zero().with_floor(self.config.epsilon)
    }

    fn plus(&self, a: &Opinion, b: &Opinion) -> Opinion {
        a.plus(b)
    }

    fn times(&self, a: &Opinion, b: &Opinion) -> Opinion {
        a.times(b)
    }

    fn negate(&self, a: &Opinion) -> Result<Opinion, AlgebraError> {
        Ok(a.negate())
    }

    fn normalize(&self, a: &Opinion, z: &Opinion) -> Opinion {
        a.normalize(z)
    }

    fn is_dsp(&self) -> bool {
        true
    }

    fn parse(&self, literal: &str) -> Result<Opinion, WeightParseError> {
        match WeightLiteral::parse_with(literal, &self.config)? {
            WeightLiteral::Opinion(o) => Ok(o),
            WeightLiteral::Beta(_) => Err(WeightParseError::Malformed {
                literal: literal.to_string(),
                message: "Beta literal given to the opinion algebra".to_string(),
            }),
        }
    }

    fn format(&self, a: &Opinion) -> String {
        a.render(self.config.precision)
    }
}
