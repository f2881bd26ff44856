//! Beta-distributed probabilities summarized by their first two moments.
//!
//! X OR Y, X AND Y, NOT X and X given Y are approximated by matching mean
//! and variance. No closed form exists for sums, products or quotients of
//! Beta variables, so every result is re-projected onto the variance a
//! Beta with the resulting mean can actually have.
//!
//! Credible intervals come from the `statrs` inverse CDF of the Beta with
//! the implied shape parameters.

use std::fmt;

use serde::{Deserialize, Serialize};
use statrs::distribution::{Beta, ContinuousCDF, Normal};

use slprob_core::constants::{
    CONDITIONING_FLOOR, CONDITIONING_MEAN_CAP, DEFAULT_EPSILON, DEFAULT_PRECISION,
};
use slprob_core::errors::AlgebraError;

use crate::numeric::{almost_eq, floor_near_zero, render_significant};

/// Upper bound on the variance of a Beta-consistent pair with this mean.
///
/// `min(m²(1-m)/(1+m), (1-m)²m/(2-m))`.
pub fn max_variance(mean: f64) -> f64 {
    let lower_tail = mean * mean * (1.0 - mean) / (1.0 + mean);
    let upper_tail = (1.0 - mean) * (1.0 - mean) * mean / (2.0 - mean);
    lower_tail.min(upper_tail)
}

/// Total shape `α + β` past which credible intervals use the normal
/// approximation.
const NORMAL_APPROX_STRENGTH: f64 = 1e4;

/// Clamp `variance` to the Beta-consistent bound for `mean`.
#[inline]
pub fn clamp_variance(mean: f64, variance: f64) -> f64 {
    variance.min(max_variance(mean))
}

/// An uncertain probability as (mean, variance).
///
/// Immutable: every operation returns a new value carrying the receiver's
/// epsilon floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BetaDistribution {
    mean: f64,
    variance: f64,
    #[serde(skip, default = "default_epsilon")]
    epsilon: f64,
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

impl PartialEq for BetaDistribution {
    fn eq(&self, other: &Self) -> bool {
        self.mean == other.mean && self.variance == other.variance
    }
}

impl BetaDistribution {
    /// Create a distribution with the default epsilon floor.
    pub fn new(mean: f64, variance: f64) -> Self {
        Self::with_epsilon(mean, variance, DEFAULT_EPSILON)
    }

    /// Create a distribution with an explicit epsilon floor.
    pub fn with_epsilon(mean: f64, variance: f64, epsilon: f64) -> Self {
        Self {
            mean,
            variance,
            epsilon,
        }
    }

    /// Parse mean and variance from decimal strings.
    pub fn from_decimal_strs(mean: &str, variance: &str) -> Result<Self, std::num::ParseFloatError> {
        Ok(Self::new(mean.trim().parse()?, variance.trim().parse()?))
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn derive(&self, mean: f64, variance: f64) -> Self {
        Self::with_epsilon(mean, variance, self.epsilon)
    }

    /// True iff the mean is within epsilon of 1.
    pub fn is_complete_belief(&self) -> bool {
        almost_eq(self.mean, 1.0, self.epsilon)
    }

    /// Implied α+β: `m(1-m)/var - 1`, near-zero variance floored to epsilon.
    pub fn strength(&self) -> f64 {
        let var = floor_near_zero(self.variance, self.epsilon);
        (self.mean * (1.0 - self.mean)) / var - 1.0
    }

    /// Shape parameter α, floored to epsilon.
    pub fn alpha(&self) -> f64 {
        self.epsilon.max(self.mean * self.strength())
    }

    /// Shape parameter β, floored to epsilon.
    pub fn beta(&self) -> f64 {
        self.epsilon.max((1.0 - self.mean) * self.strength())
    }

    /// X OR Y for independent, mutually exclusive contributions.
    pub fn sum(&self, other: &Self) -> Self {
        let mean = self.mean + other.mean;
        let var = self.variance + other.variance;
        self.derive(mean, clamp_variance(mean, var))
    }

    /// X AND Y for independent X, Y.
    pub fn product(&self, other: &Self) -> Self {
        let mean = self.mean * other.mean;
        let var = self.variance * other.variance
            + self.variance * other.mean * other.mean
            + other.variance * self.mean * self.mean;
        self.derive(mean, clamp_variance(mean, var))
    }

    /// NOT X. Fails when the mean is outside [0, 1].
    pub fn negate(&self) -> Result<Self, AlgebraError> {
        if !(0.0..=1.0).contains(&self.mean) {
            return Err(AlgebraError::InvalidMean {
                mean: self.mean,
                variance: self.variance,
            });
        }
        Ok(self.derive(1.0 - self.mean, self.variance))
    }

    /// X / Y, the posterior of X given evidence Y.
    ///
    /// The variance is a delta-method propagation of the quotient, using the
    /// variance of X times `(Y - X)` as the covariance term. Floors are applied
    /// after the auxiliary product is formed, and the clamp comes last.
    pub fn conditioning(&self, other: &Self) -> Self {
        let evidence_mean = if other.mean <= 0.0 {
            tracing::warn!(mean = other.mean, "conditioning on evidence with non-positive mean");
            CONDITIONING_FLOOR
        } else {
            other.mean
        };
        let mean = CONDITIONING_MEAN_CAP.min(self.mean / evidence_mean);

        let muneg = other.mean - self.mean;
        let varneg = other.variance - self.variance;
        let covariance = self.product(&self.derive(muneg, varneg)).variance;

        let mu = if self.mean <= 0.0 {
            tracing::debug!(mean = self.mean, "flooring query mean in conditioning variance");
            CONDITIONING_FLOOR
        } else {
            self.mean
        };
        let muneg = if muneg <= 0.0 {
            tracing::debug!(muneg, "flooring evidence-minus-query mean in conditioning variance");
            CONDITIONING_FLOOR
        } else {
            muneg
        };

        let var = mean * mean
            * (1.0 - mean)
            * (1.0 - mean)
            * (self.variance / (mu * mu) + varneg / (muneg * muneg)
                - 2.0 * (covariance / (mu * muneg)));

        self.derive(mean, clamp_variance(mean, var))
    }

    /// Re-project onto a Beta-consistent pair.
    ///
    /// The mean is clamped to [0, 1] and the variance recomputed from the
    /// floored shape parameters, then held to the same bound every other
    /// operation respects.
    pub fn moment_matching(&self) -> Self {
        let mean = self.mean.clamp(0.0, 1.0);
        let clamped = self.derive(mean, self.variance);
        let total = clamped.alpha() + clamped.beta();
        let variance = mean * (1.0 - mean) / (total + 1.0);
        self.derive(mean, clamp_variance(mean, variance))
    }

    /// Central interval holding `level` of the probability mass.
    ///
    /// Read off the Beta with this value's shape parameters. Above
    /// `NORMAL_APPROX_STRENGTH` the shape is treated as normal around the
    /// mean. `None` for a level outside (0, 1) or shapes statrs rejects.
    pub fn credible_interval(&self, level: f64) -> Option<(f64, f64)> {
        if !(level > 0.0 && level < 1.0) {
            return None;
        }
        let upper = 1.0 - (1.0 - level) / 2.0;
        let (a, b) = (self.alpha(), self.beta());

        let (low, high) = if a + b > NORMAL_APPROX_STRENGTH {
            let z = Normal::new(0.0, 1.0).ok()?.inverse_cdf(upper);
            let spread = z * self.variance.max(0.0).sqrt();
            (self.mean - spread, self.mean + spread)
        } else {
            let shape = Beta::new(a, b).ok()?;
            (shape.inverse_cdf(1.0 - upper), shape.inverse_cdf(upper))
        };

        if low.is_finite() && high.is_finite() {
            Some((low.clamp(0.0, 1.0), high.clamp(0.0, 1.0)))
        } else {
            None
        }
    }

    /// `b(mean,variance)` at `precision` significant digits.
    pub fn render(&self, precision: u32) -> String {
        format!(
            "b({},{})",
            render_significant(self.mean, precision),
            render_significant(self.variance, precision)
        )
    }
}

/// Formats as `b(mean,variance)`. The formatter precision, when given, is the
/// number of significant digits.
impl fmt::Display for BetaDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().map(|p| p as u32).unwrap_or(DEFAULT_PRECISION);
        f.write_str(&self.render(precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_sum_mean() {
        let a = BetaDistribution::new(0.3, 0.3);
        let b = BetaDistribution::new(0.4, 0.2);
        assert!(close(a.sum(&b).mean(), 0.7));
    }

    #[test]
    fn test_product_mean() {
        let a = BetaDistribution::new(0.3, 0.3);
        let b = BetaDistribution::new(0.4, 0.2);
        assert!(close(a.product(&b).mean(), 0.12));
    }

    #[test]
    fn test_negate() {
        let a = BetaDistribution::new(0.3, 0.3);
        let n = a.negate().unwrap();
        assert!(close(n.mean(), 0.7));
        assert_eq!(n.variance(), 0.3);
    }

    #[test]
    fn test_negate_out_of_range_fails() {
        let a = BetaDistribution::new(1.2, 0.01);
        match a.negate() {
            Err(AlgebraError::InvalidMean { mean, variance }) => {
                assert_eq!(mean, 1.2);
                assert_eq!(variance, 0.01);
            }
            other => panic!("expected InvalidMean, got {:?}", other),
        }
    }

    #[test]
    fn test_conditioning_mean() {
        let a = BetaDistribution::new(0.3, 0.3);
        let b = BetaDistribution::new(0.4, 0.2);
        assert!(close(a.conditioning(&b).mean(), 0.75));
    }

    #[test]
    fn test_conditioning_mean_is_capped() {
        let a = BetaDistribution::new(0.5, 0.01);
        let b = BetaDistribution::new(0.25, 0.01);
        assert_eq!(a.conditioning(&b).mean(), CONDITIONING_MEAN_CAP);
    }

    #[test]
    fn test_conditioning_reference_variance() {
        // X = b(0.2, 0.01), Y = b(0.5, 0.02): muneg = 0.3, varneg = 0.01.
        let x = BetaDistribution::new(0.2, 0.01);
        let y = BetaDistribution::new(0.5, 0.02);
        let r = x.conditioning(&y);

        let aux_mean: f64 = 0.2 * 0.3;
        let aux_var = (0.01 * 0.01 + 0.01 * 0.09 + 0.01 * 0.04_f64).min(max_variance(aux_mean));
        let m: f64 = 0.4;
        let expected = m * m * (1.0 - m) * (1.0 - m)
            * (0.01 / 0.04 + 0.01 / 0.09 - 2.0 * aux_var / (0.2 * 0.3));
        let expected = expected.min(max_variance(m));

        assert!(close(r.mean(), 0.4));
        assert!(close(r.variance(), expected), "{} vs {}", r.variance(), expected);
    }

    #[test]
    fn test_variance_clamped_to_bound() {
        let a = BetaDistribution::new(0.3, 0.3);
        let b = BetaDistribution::new(0.4, 0.2);
        let s = a.sum(&b);
        assert!(s.variance() <= max_variance(s.mean()));
        let p = a.product(&b);
        assert!(p.variance() <= max_variance(p.mean()));
    }

    #[test]
    fn test_strength_alpha_beta() {
        let d = BetaDistribution::new(0.6, 0.0002);
        assert!((d.strength() - 1199.0).abs() < 1e-6);
        assert!((d.alpha() - 719.4).abs() < 1e-6);
        assert!((d.beta() - 479.6).abs() < 1e-6);
    }

    #[test]
    fn test_strength_floors_near_zero_variance() {
        let d = BetaDistribution::new(0.5, 0.0);
        assert!((d.strength() - (0.25 / DEFAULT_EPSILON - 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_complete_belief() {
        assert!(BetaDistribution::new(1.0, 1e-9).is_complete_belief());
        assert!(BetaDistribution::new(1.0 - 1e-5, 1e-9).is_complete_belief());
        assert!(!BetaDistribution::new(0.99, 1e-9).is_complete_belief());
    }

    #[test]
    fn test_moment_matching_restores_valid_pair() {
        let drifted = BetaDistribution::new(1.3, 0.5);
        let fixed = drifted.moment_matching();
        assert_eq!(fixed.mean(), 1.0);
        assert!(fixed.variance() >= 0.0);
        assert!(fixed.variance() <= max_variance(fixed.mean()) + 1e-12);

        let too_wide = BetaDistribution::new(0.5, 0.4);
        let fixed = too_wide.moment_matching();
        assert_eq!(fixed.mean(), 0.5);
        assert!(fixed.variance() <= max_variance(0.5));
    }

    #[test]
    fn test_moment_matching_keeps_consistent_pair() {
        let d = BetaDistribution::new(0.6, 0.0002);
        let m = d.moment_matching();
        assert!(close(m.mean(), 0.6));
        assert!((m.variance() - 0.0002).abs() < 1e-15);
    }

    #[test]
    fn test_display() {
        assert_eq!(BetaDistribution::new(0.3, 0.3).to_string(), "b(0.3,0.3)");
        let long = BetaDistribution::from_decimal_strs("0.33333333333333", "0.2").unwrap();
        assert_eq!(long.to_string(), "b(0.33333333333333,0.2)");
        assert_eq!(format!("{:.3}", BetaDistribution::new(2.0 / 3.0, 0.1)), "b(0.667,0.1)");
    }

    #[test]
    fn test_credible_interval_narrows_with_strength() {
        let (low1, high1) = BetaDistribution::new(0.5, 0.05).credible_interval(0.95).unwrap();
        let (low2, high2) = BetaDistribution::new(0.5, 0.005).credible_interval(0.95).unwrap();
        assert!(low1 <= 0.5 && 0.5 <= high1);
        assert!(high2 - low2 < high1 - low1);
    }

    #[test]
    fn test_credible_interval_concentrated_is_normal() {
        // strength = 0.24 / 1e-6 - 1, far past the Beta inverse CDF cutoff.
        let b = BetaDistribution::new(0.6, 1e-6);
        let (low, high) = b.credible_interval(0.95).unwrap();
        let spread = 1.959963984540054 * 1e-3;
        assert!((low - (0.6 - spread)).abs() < 1e-9);
        assert!((high - (0.6 + spread)).abs() < 1e-9);
    }

    #[test]
    fn test_credible_interval_invalid_level() {
        let b = BetaDistribution::new(0.5, 0.05);
        assert_eq!(b.credible_interval(1.5), None);
        assert_eq!(b.credible_interval(0.0), None);
    }

    #[test]
    fn test_conditioning_on_itself_stays_bounded() {
        let x = BetaDistribution::new(0.3, 0.01);
        let r = x.conditioning(&x);
        assert_eq!(r.mean(), CONDITIONING_MEAN_CAP);
        assert!(r.variance().is_finite());
        assert!(r.variance() <= max_variance(r.mean()));
    }

    #[test]
    fn test_conditioning_impossible_query() {
        let r = BetaDistribution::new(0.0, 0.0).conditioning(&BetaDistribution::new(0.4, 0.01));
        assert_eq!(r.mean(), 0.0);
        assert_eq!(r.variance(), 0.0);
    }
}
