//! Mapping between opinions and Beta distributions.
//!
//! An opinion with uncertainty `u` and prior weight `W` carries `W/u` units of
//! evidence. Both directions go through the Beta shape parameters, so the
//! round trip is only exact for Beta-consistent pairs with α, β at least the
//! prior contribution.

use slprob_core::constants::{DEFAULT_BASE_RATE, DEFAULT_PRIOR_WEIGHT};

use crate::beta::BetaDistribution;
use crate::numeric::floor_near_zero;
use crate::opinion::Opinion;

/// Opinion to moment-matched Beta distribution.
///
/// Near-zero belief, disbelief and uncertainty are floored to the opinion's
/// epsilon first. For a well-formed opinion the mean is `b + u·a` and the
/// variance `mean(1-mean)/(W/u + 1)`.
pub fn from_sl_opinion(opinion: &Opinion, prior_weight: f64) -> BetaDistribution {
    let eps = opinion.epsilon();
    let belief = floor_near_zero(opinion.belief, eps);
    let disbelief = floor_near_zero(opinion.disbelief, eps);
    let uncertainty = floor_near_zero(opinion.uncertainty, eps);
    let base_rate = opinion.base_rate;

    let alpha = prior_weight / uncertainty * belief + prior_weight * base_rate;
    let beta = prior_weight / uncertainty * disbelief + prior_weight * (1.0 - base_rate);
    let strength = alpha + beta;

    let mean = alpha / strength;
    let variance = mean * (1.0 - mean) / (strength + 1.0);

    tracing::trace!(%opinion, mean, variance, "opinion to beta");
    BetaDistribution::with_epsilon(mean, variance, eps)
}

/// Beta distribution to opinion under base rate `a` and prior weight `W`.
///
/// `rx = max(0, α - aW)`, `sx = max(0, β - (1-a)W)`, and the opinion is
/// `(rx, sx, W) / (rx + sx + W)` with base rate `a`.
pub fn to_sl_opinion(beta: &BetaDistribution, base_rate: f64, prior_weight: f64) -> Opinion {
    let rx = (beta.alpha() - base_rate * prior_weight).max(0.0);
    let sx = (beta.beta() - (1.0 - base_rate) * prior_weight).max(0.0);
    let total = rx + sx + prior_weight;

    let opinion = Opinion::with_epsilon(
        rx / total,
        sx / total,
        prior_weight / total,
        base_rate,
        beta.epsilon(),
    );
    tracing::trace!(%beta, %opinion, "beta to opinion");
    opinion
}

/// [`to_sl_opinion`] with `a = 0.5`, `W = 2`.
pub fn to_default_opinion(beta: &BetaDistribution) -> Opinion {
    to_sl_opinion(beta, DEFAULT_BASE_RATE, DEFAULT_PRIOR_WEIGHT)
}

/// [`from_sl_opinion`] with `W = 2`.
pub fn from_default_opinion(opinion: &Opinion) -> BetaDistribution {
    from_sl_opinion(opinion, DEFAULT_PRIOR_WEIGHT)
}

/// Re-project a drifted (mean, variance) pair onto a valid Beta.
pub fn moment_matching(beta: &BetaDistribution) -> BetaDistribution {
    let matched = beta.moment_matching();
    tracing::trace!(before = %beta, after = %matched, "moment matching");
    matched
}
