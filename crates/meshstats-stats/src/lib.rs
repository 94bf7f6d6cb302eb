//! Numeric kernels for mesh point-data statistics.
//!
//! This crate provides the small set of statistical tools the statistics
//! engine is built from:
//!
//! - **Descriptive statistics**: minimum, maximum, mean and population standard deviation
//! - **Percentiles**: nearest-rank (default) and linear-interpolation estimators
//! - **Rounding**: fixed-decimal rounding with ties to even
//!
//! # Modules
//!
//! - [`descriptive`]: Range and moment statistics
//! - [`percentiles`]: Percentile estimators
//! - [`rounding`]: Decimal rounding shared by every reported statistic
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use meshstats_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use meshstats_stats::percentiles::{PercentileMethod, compute_percentile};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(compute_percentile(&values, 50, PercentileMethod::NearestRank), 3.0);
//! assert_eq!(compute_percentile(&values, 25, PercentileMethod::Linear), 2.0);
//! ```

pub mod descriptive;
pub mod percentiles;
pub mod rounding;
