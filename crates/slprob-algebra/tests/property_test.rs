//! Property tests for the Beta and opinion algebras.

use proptest::prelude::*;

use slprob_algebra::beta::max_variance;
use slprob_algebra::{BetaDistribution, Opinion, OpinionAlgebra, WeightAlgebra};
use slprob_core::constants::CONDITIONING_MEAN_CAP;

fn beta() -> impl Strategy<Value = BetaDistribution> {
    (0.0..=1.0f64, 0.0..0.05f64).prop_map(|(m, v)| BetaDistribution::new(m, v))
}

/// Base rates including both ends, which `plus` reaches by saturating.
fn base_rate() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0f64), Just(1.0f64), 0.0..=1.0f64]
}

fn opinion() -> impl Strategy<Value = Opinion> {
    (0.0..=1.0f64, 0.0..=1.0f64, base_rate()).prop_map(|(x, y, a)| {
        let b = x;
        let d = (1.0 - b) * y;
        Opinion::new(b, d, 1.0 - b - d, a)
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12
}

proptest! {
    #[test]
    fn sum_and_product_means_are_exact(p in beta(), q in beta()) {
        prop_assert_eq!(p.sum(&q).mean(), p.mean() + q.mean());
        prop_assert_eq!(p.product(&q).mean(), p.mean() * q.mean());
    }

    #[test]
    fn double_negation_restores_mean(p in beta()) {
        let n = p.negate().unwrap();
        prop_assert_eq!(n.variance(), p.variance());
        let nn = n.negate().unwrap();
        prop_assert!(close(nn.mean(), p.mean()));
        prop_assert_eq!(nn.variance(), p.variance());
    }

    #[test]
    fn conditioning_mean_is_capped_ratio(p in beta(), q in beta()) {
        prop_assume!(q.mean() > 0.0);
        let r = p.conditioning(&q);
        prop_assert_eq!(r.mean(), CONDITIONING_MEAN_CAP.min(p.mean() / q.mean()));
    }

    #[test]
    fn variance_never_exceeds_bound(p in beta(), q in beta()) {
        for r in [p.sum(&q), p.product(&q), p.conditioning(&q)] {
            prop_assert!(
                r.variance() <= max_variance(r.mean()),
                "{} exceeds bound {}",
                r,
                max_variance(r.mean())
            );
        }
    }

    #[test]
    fn moment_matching_yields_consistent_pair(m in -0.5..1.5f64, v in 0.0..1.0f64) {
        let r = BetaDistribution::new(m, v).moment_matching();
        prop_assert!((0.0..=1.0).contains(&r.mean()));
        prop_assert!(r.variance() <= max_variance(r.mean()));
    }

    #[test]
    fn opinion_identity_laws(x in opinion()) {
        let alg = OpinionAlgebra::default();

        prop_assert_eq!(alg.plus(&x, &alg.zero()), x);
        prop_assert_eq!(alg.plus(&alg.zero(), &x), x);

        for r in [alg.times(&x, &alg.one()), alg.times(&alg.one(), &x)] {
            prop_assert!(close(r.belief, x.belief));
            prop_assert!(close(r.disbelief, x.disbelief));
            prop_assert!(close(r.uncertainty, x.uncertainty));
            prop_assert!(close(r.base_rate, x.base_rate));
        }

        prop_assert_eq!(alg.normalize(&x, &alg.one()), x);
    }

    #[test]
    fn opinion_double_negation(x in opinion()) {
        let nn = x.negate().negate();
        prop_assert_eq!(nn.belief, x.belief);
        prop_assert_eq!(nn.disbelief, x.disbelief);
        prop_assert!(close(nn.base_rate, x.base_rate));
    }
}

#[test]
fn identity_laws_at_base_rate_edges() {
    let alg = OpinionAlgebra::default();
    for x in [
        Opinion::new(0.5, 0.2, 0.3, 1.0),
        Opinion::new(0.3, 0.3, 0.4, 0.0),
        Opinion::new(0.0, 0.0, 1.0, 1.0),
        Opinion::new(0.0, 0.0, 1.0, 0.0),
    ] {
        assert_eq!(alg.times(&x, &alg.one()), x);
        assert_eq!(alg.times(&alg.one(), &x), x);
        assert_eq!(alg.plus(&x, &alg.zero()), x);
        assert_eq!(alg.plus(&alg.zero(), &x), x);
    }
}

#[test]
fn negating_identities_swaps_them() {
    let alg = OpinionAlgebra::default();
    assert_eq!(alg.negate(&alg.one()).unwrap(), alg.zero());
    assert_eq!(alg.negate(&alg.zero()).unwrap(), alg.one());
}

#[test]
fn reference_arithmetic() {
    let x = BetaDistribution::new(0.3, 0.3);
    let y = BetaDistribution::new(0.4, 0.2);
    assert!(close(x.sum(&y).mean(), 0.7));
    assert!(close(x.product(&y).mean(), 0.12));
    assert!(close(x.negate().unwrap().mean(), 0.7));
}

#[test]
fn decimal_text_round_trip() {
    let b = BetaDistribution::from_decimal_strs("0.33333333333333", "0.2").unwrap();
    assert_eq!(b.to_string(), "b(0.33333333333333,0.2)");
}
