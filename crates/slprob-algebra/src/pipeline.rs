//! Run orchestration: convert a program's weights into one representation,
//! evaluate it with the matching algebra, and post-process the results.
//!
//! Evaluation itself belongs to an external weighted-formula evaluator,
//! abstracted by [`WeightedEvaluator`]. [`TemplateEvaluator`] is a reference
//! implementation over a caller-built [`Circuit`].

use std::collections::BTreeMap;

use slprob_core::config::{AlgebraConfig, OutputSection, SlProbConfig};
use slprob_core::errors::{EvaluationError, SlProbError};

use crate::algebra::{BetaAlgebra, OpinionAlgebra, WeightAlgebra};
use crate::circuit::Circuit;
use crate::conversion::{from_sl_opinion, moment_matching, to_sl_opinion};
use crate::program::{ConversionTarget, WeightedProgram};
use crate::report::QueryResults;

/// Something that folds a weighted program into per-query weights.
pub trait WeightedEvaluator {
    fn evaluate<A: WeightAlgebra>(
        &self,
        program: &WeightedProgram,
        algebra: &A,
    ) -> Result<BTreeMap<String, A::Weight>, EvaluationError>;
}

/// Evaluates a fixed formula whose atoms are indices into the program's
/// weighted facts, in line order.
///
/// Each fact's label is parsed by the algebra in use, so the same template
/// serves a Beta and an opinion version of one program.
#[derive(Debug, Clone, Default)]
pub struct TemplateEvaluator {
    circuit: Circuit<usize>,
}

impl TemplateEvaluator {
    pub fn new(circuit: Circuit<usize>) -> Self {
        Self { circuit }
    }

    pub fn circuit(&self) -> &Circuit<usize> {
        &self.circuit
    }
}

impl WeightedEvaluator for TemplateEvaluator {
    fn evaluate<A: WeightAlgebra>(
        &self,
        program: &WeightedProgram,
        algebra: &A,
    ) -> Result<BTreeMap<String, A::Weight>, EvaluationError> {
        let facts = program.weighted_facts(algebra.config())?;
        let weighted = self
            .circuit
            .map_atoms(|&index| -> Result<A::Weight, EvaluationError> {
                let fact = facts
                    .get(index)
                    .ok_or(EvaluationError::UnknownFact { index })?;
                Ok(algebra.parse(&fact.label)?)
            })?;
        weighted.evaluate(algebra)
    }
}

/// Post-processing applied to query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Report results as opinions.
    pub sl_output: bool,
    /// Moment-match Beta results before reporting them.
    pub moment_matching: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sl_output: false,
            moment_matching: true,
        }
    }
}

impl From<&OutputSection> for RunOptions {
    fn from(section: &OutputSection) -> Self {
        Self {
            sl_output: section.effective_sl_output(),
            moment_matching: section.effective_moment_matching(),
        }
    }
}

/// A weighted program with the numeric and output settings to run it under.
#[derive(Debug, Clone)]
pub struct SlProbLog {
    program: WeightedProgram,
    config: AlgebraConfig,
    options: RunOptions,
}

impl SlProbLog {
    pub fn new(program: impl Into<WeightedProgram>) -> Self {
        Self {
            program: program.into(),
            config: AlgebraConfig::default(),
            options: RunOptions::default(),
        }
    }

    /// Program with the algebra and output settings of a resolved config.
    pub fn from_config(program: impl Into<WeightedProgram>, config: &SlProbConfig) -> Self {
        Self::new(program)
            .with_config(config.algebra_config())
            .with_options(RunOptions::from(&config.output))
    }

    pub fn with_config(mut self, config: AlgebraConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn program(&self) -> &WeightedProgram {
        &self.program
    }

    pub fn config(&self) -> &AlgebraConfig {
        &self.config
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    /// Evaluate with the opinion operators.
    ///
    /// Beta labels are converted to opinions first. Results are reported as
    /// Betas unless `sl_output` is set.
    pub fn run_sl<E: WeightedEvaluator>(&self, evaluator: &E) -> Result<QueryResults, SlProbError> {
        let program = self.program.convert(ConversionTarget::Opinion, &self.config)?;
        let algebra = OpinionAlgebra::new(self.config);
        let raw = evaluator.evaluate(&program, &algebra)?;
        tracing::debug!(queries = raw.len(), sl_output = self.options.sl_output, "run_sl evaluated");

        let mut results = QueryResults::new(self.config.precision);
        for (query, opinion) in raw {
            if self.options.sl_output {
                results.insert(query, opinion);
            } else {
                results.insert(query, from_sl_opinion(&opinion, self.config.prior_weight));
            }
        }
        Ok(results)
    }

    /// Evaluate with the Beta operators.
    ///
    /// Opinion labels are converted to Betas first. Results are moment
    /// matched when the options ask for it, and reported as opinions when
    /// `sl_output` is set.
    pub fn run_beta<E: WeightedEvaluator>(
        &self,
        evaluator: &E,
    ) -> Result<QueryResults, SlProbError> {
        let program = self.program.convert(ConversionTarget::Beta, &self.config)?;
        let algebra = BetaAlgebra::new(self.config);
        let raw = evaluator.evaluate(&program, &algebra)?;
        tracing::debug!(
            queries = raw.len(),
            moment_matching = self.options.moment_matching,
            sl_output = self.options.sl_output,
            "run_beta evaluated"
        );

        let mut results = QueryResults::new(self.config.precision);
        for (query, beta) in raw {
            let beta = if self.options.moment_matching {
                moment_matching(&beta)
            } else {
                beta
            };
            if self.options.sl_output {
                results.insert(
                    query,
                    to_sl_opinion(&beta, self.config.base_rate, self.config.prior_weight),
                );
            } else {
                results.insert(query, beta);
            }
        }
        Ok(results)
    }
}
