//! Beta-distribution and Subjective Logic weight algebras.
//!
//! Uncertain probabilities are carried either as Beta distributions in
//! moment form or as SL opinions, combined through the [`WeightAlgebra`]
//! interface a weighted-formula evaluator folds with, and converted between
//! the two representations at the program and result boundaries.

pub mod algebra;
pub mod beta;
pub mod circuit;
pub mod conversion;
pub mod numeric;
pub mod opinion;
pub mod pipeline;
pub mod program;
pub mod report;
pub mod weight;

pub use algebra::{BetaAlgebra, OpinionAlgebra, WeightAlgebra};
pub use beta::BetaDistribution;
pub use circuit::{Circuit, Node, NodeId};
pub use conversion::{from_sl_opinion, moment_matching, to_sl_opinion};
pub use opinion::Opinion;
pub use pipeline::{RunOptions, SlProbLog, TemplateEvaluator, WeightedEvaluator};
pub use program::{ConversionTarget, WeightedFact, WeightedProgram};
pub use report::{QueryResults, QueryValue};
pub use weight::{WeightLiteral, WeightTag};
