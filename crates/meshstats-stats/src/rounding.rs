/// Rounds `value` to `decimals` fractional digits, ties to even.
///
/// The value is scaled by `10^decimals`, rounded with
/// [`f64::round_ties_even`] and scaled back. Every statistic reported by the
/// engine goes through this function so that all of them follow one rule.
///
/// # Examples
///
/// ```
/// use meshstats_stats::rounding::round_to_decimals;
///
/// assert_eq!(round_to_decimals(288.674_990_257, 3), 288.675);
/// assert_eq!(round_to_decimals(2.5, 0), 2.0);
/// assert_eq!(round_to_decimals(3.5, 0), 4.0);
/// ```
#[must_use]
pub fn round_to_decimals(value: f64, decimals: u8) -> f64 {
    let scale = 10_f64.powi(i32::from(decimals));
    let rounded = (value * scale).round_ties_even() / scale;
    // Scaling may overflow for huge magnitudes; those have no fractional part anyway.
    if rounded.is_finite() { rounded } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_to_even() {
        assert_eq!(round_to_decimals(0.5, 0), 0.0);
        assert_eq!(round_to_decimals(1.5, 0), 2.0);
        assert_eq!(round_to_decimals(-2.5, 0), -2.0);
        // 1.0625 and 1.1875 are exact binary fractions, so the ties are real
        assert_eq!(round_to_decimals(1.0625, 3), 1.062);
        assert_eq!(round_to_decimals(1.1875, 3), 1.188);
    }

    #[test]
    fn test_non_ties() {
        assert_eq!(round_to_decimals(-0.037_4, 3), -0.037);
        assert_eq!(round_to_decimals(500.5, 3), 500.5);
        assert_eq!(round_to_decimals(1.0, 3), 1.0);
    }

    #[test]
    fn test_idempotent() {
        for v in [0.1234567, -5.6789, 1e-7, 12_345.678_9] {
            let once = round_to_decimals(v, 3);
            assert_eq!(round_to_decimals(once, 3).to_bits(), once.to_bits());
        }
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_to_decimals(f64::NAN, 3).is_nan());
        assert_eq!(round_to_decimals(f64::INFINITY, 3), f64::INFINITY);
        assert_eq!(round_to_decimals(f64::MAX, 3), f64::MAX);
    }
}
