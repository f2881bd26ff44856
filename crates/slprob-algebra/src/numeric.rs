//! Small numeric helpers shared by the Beta and opinion types.

use slprob_core::constants::MAX_PRECISION;

/// Replace a value within `epsilon` of zero by `epsilon`.
///
/// Applied to anything about to be used as a divisor.
#[inline]
pub fn floor_near_zero(value: f64, epsilon: f64) -> f64 {
    if value.abs() <= epsilon {
        epsilon
    } else {
        value
    }
}

/// True when `a` and `b` differ by at most `epsilon`.
#[inline]
pub fn almost_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Render `value` rounded to `digits` significant digits.
///
/// Trailing zeros are dropped and integral values keep a `.0` suffix, so
/// `1.0` renders as `1.0` and `0.1 + 0.2` as `0.3` at 15 digits.
pub fn render_significant(value: f64, digits: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.clamp(1, MAX_PRECISION) as usize;
    let rounded = format!("{:.*e}", digits - 1, value)
        .parse::<f64>()
        .unwrap_or(value);
    let mut out = rounded.to_string();
    if !out.contains('.') {
        out.push_str(".0");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_near_zero() {
        assert_eq!(floor_near_zero(0.0, 1e-4), 1e-4);
        assert_eq!(floor_near_zero(-5e-5, 1e-4), 1e-4);
        assert_eq!(floor_near_zero(0.2, 1e-4), 0.2);
    }

    #[test]
    fn test_render_significant() {
        assert_eq!(render_significant(0.3, 15), "0.3");
        assert_eq!(render_significant(1.0, 15), "1.0");
        assert_eq!(render_significant(0.0, 15), "0.0");
        assert_eq!(render_significant(0.1 + 0.2, 15), "0.3");
        assert_eq!(render_significant(0.33333333333333, 15), "0.33333333333333");
        assert_eq!(render_significant(2.0 / 3.0, 4), "0.6667");
        assert_eq!(render_significant(1e-9, 15), "0.000000001");
        assert_eq!(render_significant(-0.25, 15), "-0.25");
    }

    #[test]
    fn test_render_non_finite() {
        assert_eq!(render_significant(f64::NAN, 15), "NaN");
        assert_eq!(render_significant(f64::INFINITY, 15), "inf");
    }
}
