//! Textual weight literals: `b(mean,variance)` and `w(b,d,u,a)`.
//!
//! The leading tag decides the representation. `w(b,d,a)` with three
//! components is an opinion whose uncertainty is `1 - b - d`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use slprob_core::config::AlgebraConfig;
use slprob_core::constants::DEFAULT_PRECISION;
use slprob_core::errors::WeightParseError;

use crate::beta::BetaDistribution;
use crate::conversion::{from_sl_opinion, to_sl_opinion};
use crate::opinion::Opinion;

/// A parsed weight annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WeightLiteral {
    Beta(BetaDistribution),
    Opinion(Opinion),
}

/// Which representation a literal uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightTag {
    Beta,
    Opinion,
}

impl WeightTag {
    /// Tag of a literal, judged by its first non-blank character.
    pub fn of(literal: &str) -> Option<Self> {
        match literal.trim_start().chars().next() {
            Some('b') => Some(Self::Beta),
            Some('w') => Some(Self::Opinion),
            _ => None,
        }
    }
}

impl WeightLiteral {
    /// Parse a literal, giving the parsed value the config's epsilon floor.
    pub fn parse_with(text: &str, config: &AlgebraConfig) -> Result<Self, WeightParseError> {
        let tag = WeightTag::of(text).ok_or_else(|| WeightParseError::UnknownTag {
            literal: text.to_string(),
        })?;
        let numbers = components(text)?;
        let eps = config.epsilon;

        match (tag, numbers.as_slice()) {
            (WeightTag::Beta, &[mean, variance]) => Ok(Self::Beta(
                BetaDistribution::with_epsilon(mean, variance, eps),
            )),
            (WeightTag::Opinion, &[b, d, a]) => {
                Ok(Self::Opinion(Opinion::from_belief(b, d, a).with_floor(eps)))
            }
            (WeightTag::Opinion, &[b, d, u, a]) => {
                Ok(Self::Opinion(Opinion::with_epsilon(b, d, u, a, eps)))
            }
            (WeightTag::Beta, _) => Err(WeightParseError::Arity {
                literal: text.to_string(),
                expected: "2".to_string(),
                found: numbers.len(),
            }),
            (WeightTag::Opinion, _) => Err(WeightParseError::Arity {
                literal: text.to_string(),
                expected: "3 or 4".to_string(),
                found: numbers.len(),
            }),
        }
    }

    pub fn tag(&self) -> WeightTag {
        match self {
            Self::Beta(_) => WeightTag::Beta,
            Self::Opinion(_) => WeightTag::Opinion,
        }
    }

    pub fn as_beta(&self) -> Option<&BetaDistribution> {
        match self {
            Self::Beta(b) => Some(b),
            Self::Opinion(_) => None,
        }
    }

    pub fn as_opinion(&self) -> Option<&Opinion> {
        match self {
            Self::Opinion(o) => Some(o),
            Self::Beta(_) => None,
        }
    }

    /// The value as a Beta, converting opinions with the config's prior weight.
    pub fn into_beta(self, config: &AlgebraConfig) -> BetaDistribution {
        match self {
            Self::Beta(b) => b,
            Self::Opinion(o) => from_sl_opinion(&o, config.prior_weight),
        }
    }

    /// The value as an opinion, converting Betas with the config's base rate
    /// and prior weight.
    pub fn into_opinion(self, config: &AlgebraConfig) -> Opinion {
        match self {
            Self::Opinion(o) => o,
            Self::Beta(b) => to_sl_opinion(&b, config.base_rate, config.prior_weight),
        }
    }

    pub fn render(&self, precision: u32) -> String {
        match self {
            Self::Beta(b) => b.render(precision),
            Self::Opinion(o) => o.render(precision),
        }
    }
}

impl From<BetaDistribution> for WeightLiteral {
    fn from(value: BetaDistribution) -> Self {
        Self::Beta(value)
    }
}

impl From<Opinion> for WeightLiteral {
    fn from(value: Opinion) -> Self {
        Self::Opinion(value)
    }
}

impl FromStr for WeightLiteral {
    type Err = WeightParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &AlgebraConfig::default())
    }
}

impl fmt::Display for WeightLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().map(|p| p as u32).unwrap_or(DEFAULT_PRECISION);
        f.write_str(&self.render(precision))
    }
}

/// The comma-separated numbers between the literal's parentheses.
fn components(literal: &str) -> Result<Vec<f64>, WeightParseError> {
    let malformed = |message: &str| WeightParseError::Malformed {
        literal: literal.to_string(),
        message: message.to_string(),
    };

    let body = literal.trim();
    let body = &body[1..];
    let body = body
        .trim_start()
        .strip_prefix('(')
        .ok_or_else(|| malformed("expected `(` after the tag"))?;
    let body = body
        .trim_end()
        .strip_suffix(')')
        .ok_or_else(|| malformed("expected closing `)`"))?;

    if body.trim().is_empty() {
        return Err(malformed("no components"));
    }

    body.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<f64>()
                .map_err(|_| WeightParseError::InvalidNumber {
                    literal: literal.to_string(),
                    token: token.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_beta() {
        let w: WeightLiteral = "b(0.6,0.0002)".parse().unwrap();
        assert_eq!(w, WeightLiteral::Beta(BetaDistribution::new(0.6, 0.0002)));
        assert_eq!(w.tag(), WeightTag::Beta);
    }

    #[test]
    fn test_parse_opinion_with_whitespace() {
        let w: WeightLiteral = "  w( 0.7, 0.1 ,0.2, 0.5 ) ".parse().unwrap();
        assert_eq!(w.as_opinion(), Some(&Opinion::new(0.7, 0.1, 0.2, 0.5)));
    }

    #[test]
    fn test_parse_three_component_opinion() {
        let w: WeightLiteral = "w(0.6,0.3,0.5)".parse().unwrap();
        let o = w.as_opinion().copied().unwrap();
        assert!((o.uncertainty - 0.1).abs() < 1e-12);
        assert_eq!(o.base_rate, 0.5);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "x(0.1,0.2)".parse::<WeightLiteral>(),
            Err(WeightParseError::UnknownTag { .. })
        ));
        assert!(matches!(
            "".parse::<WeightLiteral>(),
            Err(WeightParseError::UnknownTag { .. })
        ));
        assert!(matches!(
            "b0.1,0.2)".parse::<WeightLiteral>(),
            Err(WeightParseError::Malformed { .. })
        ));
        assert!(matches!(
            "b(0.1,0.2".parse::<WeightLiteral>(),
            Err(WeightParseError::Malformed { .. })
        ));
        assert!(matches!(
            "b()".parse::<WeightLiteral>(),
            Err(WeightParseError::Malformed { .. })
        ));
        assert_eq!(
            "b(0.1,0.2,0.3)".parse::<WeightLiteral>(),
            Err(WeightParseError::Arity {
                literal: "b(0.1,0.2,0.3)".to_string(),
                expected: "2".to_string(),
                found: 3,
            })
        );
        assert!(matches!(
            "w(0.1,0.2)".parse::<WeightLiteral>(),
            Err(WeightParseError::Arity { found: 2, .. })
        ));
        assert_eq!(
            "b(0.1,abc)".parse::<WeightLiteral>(),
            Err(WeightParseError::InvalidNumber {
                literal: "b(0.1,abc)".to_string(),
                token: "abc".to_string(),
            })
        );
    }

    #[test]
    fn test_display_reserializes() {
        let w: WeightLiteral = "b( 0.6 , 0.0002 )".parse().unwrap();
        assert_eq!(w.to_string(), "b(0.6,0.0002)");
        let w: WeightLiteral = "w(0.7,0.1,0.2,0.5)".parse().unwrap();
        assert_eq!(w.to_string(), "w(0.7,0.1,0.2,0.5)");
    }

    #[test]
    fn test_parse_with_carries_epsilon() {
        let config = AlgebraConfig::wide();
        let w = WeightLiteral::parse_with("b(0.5,0.01)", &config).unwrap();
        assert_eq!(w.as_beta().map(|b| b.epsilon()), Some(config.epsilon));
    }

    #[test]
    fn test_conversions() {
        let config = AlgebraConfig::default();
        let w: WeightLiteral = "b(0.6,0.0002)".parse().unwrap();
        let o = w.into_opinion(&config);
        let back = WeightLiteral::from(o).into_beta(&config);
        assert!((back.mean() - 0.6).abs() < 1e-9);
    }
}
