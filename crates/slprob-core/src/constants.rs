//! Shared constants for the slprob weight algebras.

/// slprob version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default significant digits used when rendering weights.
pub const DEFAULT_PRECISION: u32 = 15;

/// Default near-zero floor for divisors.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Variance carried by the Beta identity elements `b(1,·)` and `b(0,·)`.
pub const DEFAULT_IDENTITY_VARIANCE: f64 = 1e-9;

/// Default prior weight W of the Beta-opinion mapping.
pub const DEFAULT_PRIOR_WEIGHT: f64 = 2.0;

/// Default base rate assumed when projecting a Beta onto an opinion.
pub const DEFAULT_BASE_RATE: f64 = 0.5;

// ---- Wide profile ----

/// Significant digits of the wide profile (full f64 round-trip).
pub const WIDE_PRECISION: u32 = 17;

/// Near-zero floor of the wide profile.
pub const WIDE_EPSILON: f64 = 1e-100;

/// Identity variance of the wide profile.
pub const WIDE_IDENTITY_VARIANCE: f64 = 1e-100;

// ---- Beta conditioning ----

/// Upper cap on the conditioned mean `X.mean / Y.mean`.
pub const CONDITIONING_MEAN_CAP: f64 = 1.0 - 1e-6;

/// Floor applied to `X.mean` and `muneg` in the conditioning variance.
pub const CONDITIONING_FLOOR: f64 = 1e-10;

// ---- Limits ----

/// Maximum significant digits an f64 can carry meaningfully.
pub const MAX_PRECISION: u32 = 17;

/// Vacuous opinion returned when evidence conditioning is infeasible.
pub const VACUOUS_OPINION: (f64, f64, f64, f64) = (0.0, 0.0, 1.0, 0.5);
