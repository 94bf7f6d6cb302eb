use serde::{Deserialize, Serialize};

/// Percentile points reported for every model, field and region.
pub const STANDARD_PERCENTILES: [u8; 7] = [5, 15, 25, 50, 75, 85, 95];

/// Estimator used to turn a sorted sample into a percentile value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PercentileMethod {
    /// Nearest-rank (ceiling index) estimator.
    ///
    /// Selects `sorted[ceil(N * p) - 1]`, clamped into the sample. The result
    /// is always an element of the sample.
    #[default]
    NearestRank,
    /// Linear interpolation between the two closest ranks.
    ///
    /// Uses the virtual index `h = (N - 1) * p` and interpolates between
    /// `sorted[floor(h)]` and `sorted[floor(h) + 1]`. Produces values that
    /// differ from [`NearestRank`](Self::NearestRank) on most inputs and is
    /// only used when explicitly requested.
    Linear,
}

/// Returns the 0-based index selected by the nearest-rank rule.
///
/// The rank `ceil(len * percent / 100)` is computed in integer arithmetic,
/// then clamped into `[1, len]` and converted to an index.
///
/// # Examples
///
/// ```
/// use meshstats_stats::percentiles::nearest_rank_index;
///
/// assert_eq!(nearest_rank_index(1000, 5), 49);
/// assert_eq!(nearest_rank_index(1001, 5), 50);
/// assert_eq!(nearest_rank_index(10, 0), 0);
/// assert_eq!(nearest_rank_index(10, 100), 9);
/// ```
#[must_use]
pub fn nearest_rank_index(len: usize, percent: u8) -> usize {
    debug_assert!(len > 0, "sample must not be empty");
    let rank = (len * usize::from(percent)).div_ceil(100);
    rank.clamp(1, len) - 1
}

/// Computes a single percentile value from sorted data.
///
/// `percent` is expressed in the range 0 to 100; larger values are treated
/// as 100.
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use meshstats_stats::percentiles::{PercentileMethod, compute_percentile};
///
/// let values = (1..=1000).map(f64::from).collect::<Vec<_>>();
///
/// assert_eq!(compute_percentile(&values, 5, PercentileMethod::NearestRank), 50.0);
/// assert_eq!(compute_percentile(&values, 95, PercentileMethod::NearestRank), 950.0);
///
/// let linear = compute_percentile(&values, 5, PercentileMethod::Linear);
/// assert!((linear - 50.95).abs() < 1e-9);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percent: u8, method: PercentileMethod) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let percent = percent.min(100);
    match method {
        PercentileMethod::NearestRank => {
            sorted_values[nearest_rank_index(sorted_values.len(), percent)]
        }
        PercentileMethod::Linear => {
            let last = sorted_values.len() - 1;
            let h = last as f64 * (f64::from(percent) / 100.0);
            let lo = (h.floor() as usize).min(last);
            let hi = (lo + 1).min(last);
            let t = h - lo as f64;
            let (a, b) = (sorted_values[lo], sorted_values[hi]);
            a + (b - a) * t
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lo: i32, hi: i32) -> Vec<f64> {
        (lo..=hi).map(f64::from).collect()
    }

    #[test]
    fn test_nearest_rank_ceiling_law() {
        // For 1..=N the nearest-rank percentile equals ceil(N * p)
        for n in [1_usize, 2, 7, 10, 99, 100, 1000, 1001] {
            let values = range(1, i32::try_from(n).unwrap());
            for p in 1..=100_u8 {
                let expected = (n * usize::from(p)).div_ceil(100);
                let actual = compute_percentile(&values, p, PercentileMethod::NearestRank);
                assert_eq!(actual, expected as f64, "n={n}, p={p}");
            }
        }
    }

    #[test]
    fn test_nearest_rank_odd_length() {
        let values = range(0, 1000);
        let expected = [50.0, 150.0, 250.0, 500.0, 750.0, 850.0, 950.0];
        let actual = STANDARD_PERCENTILES
            .map(|p| compute_percentile(&values, p, PercentileMethod::NearestRank));
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_nearest_rank_zero_percent_is_minimum() {
        let values = range(3, 9);
        assert_eq!(
            compute_percentile(&values, 0, PercentileMethod::NearestRank),
            3.0
        );
    }

    #[test]
    fn test_linear_matches_interpolated_expectations() {
        let values = range(1, 1000);
        let expected = [50.95, 150.85, 250.75, 500.5, 750.25, 850.15, 950.05];
        for (&p, e) in STANDARD_PERCENTILES.iter().zip(expected) {
            let actual = compute_percentile(&values, p, PercentileMethod::Linear);
            assert!((actual - e).abs() < 1e-9, "p={p}: {actual} != {e}");
        }
    }

    #[test]
    fn test_linear_endpoints() {
        let values = [2.0, 4.0, 8.0];
        assert_eq!(compute_percentile(&values, 0, PercentileMethod::Linear), 2.0);
        assert_eq!(compute_percentile(&values, 100, PercentileMethod::Linear), 8.0);
        assert_eq!(compute_percentile(&values, 50, PercentileMethod::Linear), 4.0);
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(compute_percentile(&[], 50, PercentileMethod::NearestRank).is_nan());
        assert!(compute_percentile(&[], 50, PercentileMethod::Linear).is_nan());
    }

    #[test]
    fn test_out_of_range_percent_is_maximum() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(
            compute_percentile(&values, 150, PercentileMethod::NearestRank),
            3.0
        );
        assert_eq!(compute_percentile(&values, 150, PercentileMethod::Linear), 3.0);
    }

    #[test]
    fn test_method_serde_names() {
        let json = serde_json::to_string(&PercentileMethod::NearestRank).unwrap();
        assert_eq!(json, "\"nearest-rank\"");
        let method: PercentileMethod = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(method, PercentileMethod::Linear);
    }
}
