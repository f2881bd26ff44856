//! The algebra interface a weighted-formula evaluator folds with.
//!
//! An evaluator sees weights only through this trait: identities, the two
//! binary operations, complement, evidence conditioning, and the textual
//! boundary. Each implementation is built from an [`AlgebraConfig`].

pub mod beta_algebra;
pub mod opinion_algebra;

pub use beta_algebra::BetaAlgebra;
pub use opinion_algebra::OpinionAlgebra;

use std::fmt::Debug;

use slprob_core::config::AlgebraConfig;
use slprob_core::errors::{AlgebraError, WeightParseError};

/// Commutative weight algebra with evidence conditioning.
///
/// `Send + Sync` so independent queries can be evaluated from several
/// threads against one algebra instance.
pub trait WeightAlgebra: Send + Sync {
    type Weight: Clone + Debug + PartialEq + Send + Sync;

    fn config(&self) -> &AlgebraConfig;

    /// Neutral element of `times`.
    fn one(&self) -> Self::Weight;

    /// Neutral element of `plus`.
    fn zero(&self) -> Self::Weight;

    fn plus(&self, a: &Self::Weight, b: &Self::Weight) -> Self::Weight;

    fn times(&self, a: &Self::Weight, b: &Self::Weight) -> Self::Weight;

    fn negate(&self, a: &Self::Weight) -> Result<Self::Weight, AlgebraError>;

    /// Final value of a query weight. Identity for both algebras here.
    fn value(&self, a: &Self::Weight) -> Self::Weight {
        a.clone()
    }

    /// Condition `a` on evidence `z`.
    fn normalize(&self, a: &Self::Weight, z: &Self::Weight) -> Self::Weight;

    /// True when `normalize` does real conditioning rather than nothing.
    fn is_dsp(&self) -> bool;

    fn parse(&self, literal: &str) -> Result<Self::Weight, WeightParseError>;

    /// Render a weight as a literal `parse` accepts.
    fn format(&self, a: &Self::Weight) -> String;

    /// Whether `parse` accepts this literal's representation.
    fn accepts(&self, literal: &str) -> bool {
        self.parse(literal).is_ok()
    }
}
