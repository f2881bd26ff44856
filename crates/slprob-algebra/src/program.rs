//! Weight annotations in a program text, and rewriting them between the
//! Beta and opinion representations.
//!
//! A weighted line is `label::clause`. Lines without `::` are left alone;
//! lines with more than one `::` are rejected.

use std::fmt;

use slprob_core::config::AlgebraConfig;
use slprob_core::errors::ProgramError;

use crate::conversion::{from_sl_opinion, to_sl_opinion};
use crate::weight::{WeightLiteral, WeightTag};

const LABEL_SEPARATOR: &str = "::";

/// Representation every weight of a program is rewritten into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionTarget {
    Beta,
    Opinion,
}

impl ConversionTarget {
    /// Target selected by a pair of flags. Neither flag means no conversion.
    pub fn from_flags(to_sl: bool, to_beta: bool) -> Result<Option<Self>, ProgramError> {
        match (to_sl, to_beta) {
            (true, true) => Err(ProgramError::ConflictingConversion),
            (true, false) => Ok(Some(Self::Opinion)),
            (false, true) => Ok(Some(Self::Beta)),
            (false, false) => Ok(None),
        }
    }

    fn tag(self) -> WeightTag {
        match self {
            Self::Beta => WeightTag::Beta,
            Self::Opinion => WeightTag::Opinion,
        }
    }
}

/// One weighted line of a program.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedFact {
    /// 1-based line number.
    pub line_no: usize,
    /// The label text as written, trimmed.
    pub label: String,
    pub weight: WeightLiteral,
    pub clause: String,
}

/// A program whose facts carry `b(..)` or `w(..)` labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeightedProgram {
    source: String,
}

enum Line<'a> {
    Plain,
    Weighted { label: &'a str, clause: &'a str },
}

fn split_line(line_no: usize, line: &str) -> Result<Line<'_>, ProgramError> {
    let mut parts = line.split(LABEL_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), None, _) => Ok(Line::Plain),
        (Some(label), Some(clause), None) => {
            if WeightTag::of(label).is_none() {
                return Err(malformed(line_no, line));
            }
            Ok(Line::Weighted {
                label: label.trim(),
                clause,
            })
        }
        _ => Err(malformed(line_no, line)),
    }
}

fn malformed(line_no: usize, line: &str) -> ProgramError {
    ProgramError::MalformedLine {
        line_no,
        line: line.to_string(),
    }
}

impl WeightedProgram {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every weighted line, parsed under `config`.
    pub fn weighted_facts(&self, config: &AlgebraConfig) -> Result<Vec<WeightedFact>, ProgramError> {
        let mut facts = Vec::new();
        for (idx, line) in self.source.lines().enumerate() {
            let line_no = idx + 1;
            if let Line::Weighted { label, clause } = split_line(line_no, line)? {
                let weight = WeightLiteral::parse_with(label, config)
                    .map_err(|source| ProgramError::Weight { line_no, source })?;
                facts.push(WeightedFact {
                    line_no,
                    label: label.to_string(),
                    weight,
                    clause: clause.to_string(),
                });
            }
        }
        Ok(facts)
    }

    /// Rewrite every label into `target`'s representation.
    ///
    /// Labels already in the target representation are kept verbatim.
    /// Converted labels are rendered at the config's precision.
    pub fn convert(
        &self,
        target: ConversionTarget,
        config: &AlgebraConfig,
    ) -> Result<WeightedProgram, ProgramError> {
        let mut lines = Vec::new();
        let mut converted = 0usize;

        for (idx, line) in self.source.lines().enumerate() {
            let line_no = idx + 1;
            let (label, clause) = match split_line(line_no, line)? {
                Line::Plain => {
                    lines.push(line.to_string());
                    continue;
                }
                Line::Weighted { label, clause } => (label, clause),
            };

            if WeightTag::of(label) == Some(target.tag()) {
                lines.push(line.to_string());
                continue;
            }

            let weight = WeightLiteral::parse_with(label, config)
                .map_err(|source| ProgramError::Weight { line_no, source })?;
            let rewritten = match (target, weight) {
                (ConversionTarget::Opinion, WeightLiteral::Beta(b)) => {
                    WeightLiteral::Opinion(to_sl_opinion(&b, config.base_rate, config.prior_weight))
                }
                (ConversionTarget::Beta, WeightLiteral::Opinion(o)) => {
                    WeightLiteral::Beta(from_sl_opinion(&o, config.prior_weight))
                }
                (_, same) => same,
            };
            lines.push(format!(
                "{}{}{}",
                rewritten.render(config.precision),
                LABEL_SEPARATOR,
                clause
            ));
            converted += 1;
        }

        tracing::debug!(?target, converted, "converted program weights");
        Ok(WeightedProgram::new(lines.join("\n")))
    }
}

impl From<&str> for WeightedProgram {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WeightedProgram {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for WeightedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
