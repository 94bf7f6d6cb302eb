//! Statistic record computation.

use meshstats_stats::{
    descriptive::DescriptiveStats,
    percentiles::{PercentileMethod, STANDARD_PERCENTILES, compute_percentile},
    rounding::round_to_decimals,
};
use serde::{Deserialize, Serialize};

use crate::{ComputeError, StatisticRecord, mask::mask_values};

/// Parameters of a statistics computation.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use meshstats_engine::StatisticsConfig;
/// use meshstats_stats::percentiles::PercentileMethod;
///
/// let config: StatisticsConfig = serde_json::from_str(r#"{ "number_of_decimals": 2 }"#).unwrap();
/// assert_eq!(config.number_of_decimals, 2);
/// assert_eq!(config.percentile_method, PercentileMethod::NearestRank);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Decimal places every statistic is rounded to.
    pub number_of_decimals: u8,
    /// Estimator used for the seven percentiles.
    pub percentile_method: PercentileMethod,
}

impl StatisticsConfig {
    pub const DEFAULT_NUMBER_OF_DECIMALS: u8 = 3;
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            number_of_decimals: Self::DEFAULT_NUMBER_OF_DECIMALS,
            percentile_method: PercentileMethod::NearestRank,
        }
    }
}

/// Computes [`StatisticRecord`]s from point-data values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsEngine {
    config: StatisticsConfig,
}

impl StatisticsEngine {
    #[must_use]
    pub fn new(config: StatisticsConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    /// Masks `values` by `mask` and computes the record of the selection.
    ///
    /// # Errors
    ///
    /// * [`ComputeError::SizeMismatch`] - the mask and the values differ in length
    /// * [`ComputeError::EmptyRegion`] - no value is selected
    ///
    /// # Examples
    ///
    /// ```
    /// use meshstats_engine::{ComputeError, StatisticsEngine};
    ///
    /// let engine = StatisticsEngine::default();
    /// let values = [4.0, 8.0, 15.0, 16.0];
    ///
    /// let record = engine.compute(&values, Some(&[0.0, 1.0, 1.0, 0.0])).unwrap();
    /// assert_eq!((record.min, record.max, record.mean), (8.0, 15.0, 11.5));
    ///
    /// let err = engine.compute(&values, Some(&[0.0; 4])).unwrap_err();
    /// assert_eq!(err, ComputeError::EmptyRegion);
    /// ```
    pub fn compute(
        &self,
        values: &[f64],
        mask: Option<&[f64]>,
    ) -> Result<StatisticRecord, ComputeError> {
        let masked = mask_values(values, mask)?;
        self.compute_record(masked).ok_or(ComputeError::EmptyRegion)
    }

    /// Computes the record of already-masked values.
    ///
    /// Returns `None` if `masked` is empty.
    #[must_use]
    pub fn compute_record(&self, masked: Vec<f64>) -> Option<StatisticRecord> {
        let mut sorted = masked;
        sorted.sort_by(f64::total_cmp);

        let stats = DescriptiveStats::from_sorted(&sorted)?;
        let [p5, p15, p25, p50, p75, p85, p95] = STANDARD_PERCENTILES
            .map(|p| compute_percentile(&sorted, p, self.config.percentile_method));

        let round = |v: f64| round_to_decimals(v, self.config.number_of_decimals);
        Some(StatisticRecord {
            min: round(stats.min),
            max: round(stats.max),
            mean: round(stats.mean),
            std: round(stats.std_dev),
            percentile5: round(p5),
            percentile15: round(p15),
            percentile25: round(p25),
            percentile50: round(p50),
            percentile75: round(p75),
            percentile85: round(p85),
            percentile95: round(p95),
        })
    }
}
