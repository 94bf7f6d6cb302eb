use serde::{Deserialize, Serialize};

/// Statistics of one field of one model restricted to one region.
///
/// All values are rounded to the configured number of decimals when the
/// record is computed. Records are never updated in place; a rerun produces
/// a new record that replaces the old one in the [`ResultStore`](crate::ResultStore).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticRecord {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub percentile5: f64,
    pub percentile15: f64,
    pub percentile25: f64,
    pub percentile50: f64,
    pub percentile75: f64,
    pub percentile85: f64,
    pub percentile95: f64,
}

impl StatisticRecord {
    /// Number of statistics in a record.
    pub const LEN: usize = 11;

    /// Column names of the statistics, in [`values`](Self::values) order.
    pub const COLUMN_NAMES: [&'static str; Self::LEN] = [
        "Min", "Max", "Mean", "SD", "Per5", "Per15", "Per25", "Per50", "Per75", "Per85", "Per95",
    ];

    /// Returns the statistics in column order.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshstats_engine::StatisticRecord;
    ///
    /// let values = [1.0, 9.0, 5.0, 2.5, 1.0, 2.0, 3.0, 5.0, 7.0, 8.0, 9.0];
    /// let record = StatisticRecord::from_values(values);
    /// assert_eq!(record.std, 2.5);
    /// assert_eq!(record.values(), values);
    /// ```
    #[must_use]
    pub fn values(&self) -> [f64; Self::LEN] {
        [
            self.min,
            self.max,
            self.mean,
            self.std,
            self.percentile5,
            self.percentile15,
            self.percentile25,
            self.percentile50,
            self.percentile75,
            self.percentile85,
            self.percentile95,
        ]
    }

    /// Builds a record from statistics in column order.
    #[must_use]
    pub fn from_values(values: [f64; Self::LEN]) -> Self {
        let [
            min,
            max,
            mean,
            std,
            percentile5,
            percentile15,
            percentile25,
            percentile50,
            percentile75,
            percentile85,
            percentile95,
        ] = values;
        Self {
            min,
            max,
            mean,
            std,
            percentile5,
            percentile15,
            percentile25,
            percentile50,
            percentile75,
            percentile85,
            percentile95,
        }
    }
}
