//! Subjective Logic opinions: (belief, disbelief, uncertainty, base rate).
//!
//! `plus` is cumulative fusion for disjunction, `times` independent
//! conjunction, `negate` the complement, and `normalize` conditions an
//! opinion on evidence. Conditioning is only defined for evidence that
//! dominates the opinion; otherwise the result is the vacuous opinion.

use std::fmt;

use serde::{Deserialize, Serialize};

use slprob_core::constants::{DEFAULT_EPSILON, DEFAULT_PRECISION, VACUOUS_OPINION};

use crate::numeric::{almost_eq, render_significant};

/// A Subjective Logic opinion about a binary proposition.
///
/// `belief + disbelief + uncertainty = 1` is enforced by [`Opinion::from_belief`];
/// [`Opinion::new`] takes the tuple as given.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Opinion {
    pub belief: f64,
    pub disbelief: f64,
    pub uncertainty: f64,
    pub base_rate: f64,
    #[serde(skip, default = "default_epsilon")]
    epsilon: f64,
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

impl PartialEq for Opinion {
    fn eq(&self, other: &Self) -> bool {
        self.as_tuple() == other.as_tuple()
    }
}

impl Opinion {
    pub fn new(belief: f64, disbelief: f64, uncertainty: f64, base_rate: f64) -> Self {
        Self::with_epsilon(belief, disbelief, uncertainty, base_rate, DEFAULT_EPSILON)
    }

    pub fn with_epsilon(
        belief: f64,
        disbelief: f64,
        uncertainty: f64,
        base_rate: f64,
        epsilon: f64,
    ) -> Self {
        Self {
            belief,
            disbelief,
            uncertainty,
            base_rate,
            epsilon,
        }
    }

    /// Opinion whose uncertainty is whatever belief and disbelief leave over.
    pub fn from_belief(belief: f64, disbelief: f64, base_rate: f64) -> Self {
        Self::new(belief, disbelief, 1.0 - belief - disbelief, base_rate)
    }

    /// Certain truth `(1, 0, 0, 1)`.
    pub fn one() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0)
    }

    /// Certain falsity `(0, 1, 0, 0)`.
    pub fn zero() -> Self {
        Self::new(0.0, 1.0, 0.0, 0.0)
    }

    /// Total ignorance `(0, 0, 1, 0.5)`.
    pub fn vacuous() -> Self {
        let (b, d, u, a) = VACUOUS_OPINION;
        Self::new(b, d, u, a)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Same components under another epsilon floor.
    pub fn with_floor(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    fn derive(&self, belief: f64, disbelief: f64, uncertainty: f64, base_rate: f64) -> Self {
        Self::with_epsilon(belief, disbelief, uncertainty, base_rate, self.epsilon)
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.belief, self.disbelief, self.uncertainty, self.base_rate)
    }

    /// Projected probability `b + u·a`.
    pub fn expectation(&self) -> f64 {
        self.belief + self.uncertainty * self.base_rate
    }

    /// True when every component is within epsilon of `(1, 0, 0, 1)`.
    pub fn is_one(&self) -> bool {
        let eps = self.epsilon;
        almost_eq(self.belief, 1.0, eps)
            && almost_eq(self.disbelief, 0.0, eps)
            && almost_eq(self.uncertainty, 0.0, eps)
            && almost_eq(self.base_rate, 1.0, eps)
    }

    /// True when every component is within epsilon of `(0, 1, 0, 0)`.
    pub fn is_zero(&self) -> bool {
        let eps = self.epsilon;
        almost_eq(self.belief, 0.0, eps)
            && almost_eq(self.disbelief, 1.0, eps)
            && almost_eq(self.uncertainty, 0.0, eps)
            && almost_eq(self.base_rate, 0.0, eps)
    }

    /// Cumulative fusion for the disjunction of independent causes.
    pub fn plus(&self, other: &Self) -> Self {
        if other.is_zero() {
            return *self;
        }
        if self.is_zero() {
            return other.with_floor(self.epsilon);
        }

        let (b1, d1, u1, a1) = self.as_tuple();
        let (b2, d2, u2, a2) = other.as_tuple();

        // Base-rate weights. With both base rates at 0 the sources weigh evenly.
        let (w1, w2) = if a1 + a2 <= self.epsilon {
            (0.5, 0.5)
        } else {
            (a1 / (a1 + a2), a2 / (a1 + a2))
        };

        let u = w1 * u1 + w2 * u2;
        let d = (w1 * (d1 - b2) + w2 * (d2 - b1)).max(0.0);
        let b = (b1 + b2).min(1.0);
        let a = (a1 + a2).min(1.0);
        self.derive(b, d, u, a)
    }

    /// Independent conjunction.
    pub fn times(&self, other: &Self) -> Self {
        if other.is_one() {
            return *self;
        }
        if self.is_one() {
            return other.with_floor(self.epsilon);
        }

        let (b1, d1, u1, a1) = self.as_tuple();
        let (b2, d2, u2, a2) = other.as_tuple();

        let a = a1 * a2;
        // Both base rates near 1 leave the bracketed terms without a denominator.
        let denom = {
            let raw = 1.0 - a;
            if raw.abs() <= self.epsilon {
                self.epsilon
            } else {
                raw
            }
        };

        let b = b1 * b2 + ((1.0 - a1) * a2 * b1 * u2 + a1 * (1.0 - a2) * u1 * b2) / denom;
        let u = u1 * u2 + ((1.0 - a2) * b1 * u2 + (1.0 - a1) * u1 * b2) / denom;
        let d = (d1 + d2 - d1 * d2).min(1.0);
        self.derive(b, d, u, a)
    }

    /// Complement: swap belief and disbelief, complement the base rate.
    pub fn negate(&self) -> Self {
        self.derive(
            self.disbelief,
            self.belief,
            self.uncertainty,
            1.0 - self.base_rate,
        )
    }

    /// Whether `self` can be conditioned on `evidence`.
    pub fn conditionable_on(&self, evidence: &Self) -> bool {
        let (b1, d1, u1, a1) = self.as_tuple();
        let (b2, d2, u2, a2) = evidence.as_tuple();

        a1 <= a2
            && d1 >= d2
            && b1 * (1.0 - a1) * a2 * (1.0 - d2) >= a1 * (1.0 - a2) * (1.0 - d1) * b2
            && u1 * (1.0 - a1) * (1.0 - d2) >= u2 * (1.0 - a2) * (1.0 - d1)
            && a2 != 0.0
    }

    /// Condition on `evidence`.
    ///
    /// Evidence equal to `one` leaves the opinion untouched. Evidence the
    /// opinion does not fit under yields the vacuous opinion.
    pub fn normalize(&self, evidence: &Self) -> Self {
        if evidence.is_one() {
            return *self;
        }

        if !self.conditionable_on(evidence) {
            tracing::warn!(
                opinion = %self,
                evidence = %evidence,
                "evidence inconsistent with opinion, returning vacuous opinion"
            );
            return Opinion::vacuous().with_floor(self.epsilon);
        }

        let (b1, d1, u1, a1) = self.as_tuple();
        let (b2, d2, u2, a2) = evidence.as_tuple();
        let e1 = b1 + u1 * a1;
        let e2 = b2 + u2 * a2;

        let a = a1 / a2;
        if e1 == 0.0 {
            return self.derive(0.0, 1.0, 0.0, a);
        }
        if a == 1.0 {
            return self.derive(1.0, 0.0, 0.0, a);
        }

        let e = e1 / e2;
        let d = ((d1 - d2) / (1.0 - d2)).clamp(0.0, 1.0);
        let u = ((1.0 - d - e) / (1.0 - a)).clamp(0.0, 1.0);
        let b = (1.0 - d - u).clamp(0.0, 1.0);
        self.derive(b, d, u, a)
    }

    /// `w(b,d,u,a)` at `precision` significant digits.
    pub fn render(&self, precision: u32) -> String {
        format!(
            "w({},{},{},{})",
            render_significant(self.belief, precision),
            render_significant(self.disbelief, precision),
            render_significant(self.uncertainty, precision),
            render_significant(self.base_rate, precision)
        )
    }
}

/// Formats as `w(b,d,u,a)`. The formatter precision, when given, is the
/// number of significant digits.
impl fmt::Display for Opinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().map(|p| p as u32).unwrap_or(DEFAULT_PRECISION);
        f.write_str(&self.render(precision))
    }
}
