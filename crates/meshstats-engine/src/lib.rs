//! Region-masked statistics over mesh point data.
//!
//! The engine takes a scalar field sampled at every point of a surface model,
//! optionally restricts it to a region of interest given as a mask array, and
//! reduces the selected values to a [`StatisticRecord`]: minimum, maximum,
//! mean, population standard deviation and seven percentiles, all rounded to
//! a fixed number of decimals.
//!
//! # Overview
//!
//! ```text
//! ArrayProvider ──(values, mask)──▶ StatisticsEngine::compute ──▶ StatisticRecord
//!                                                                     │
//!                     StatisticsSession::run ◀── FieldCatalog          ▼
//!                                           └──────────────▶ ResultStore
//!                                                  region → field → model → record
//! ```
//!
//! - [`mask`]: selects the values of a region
//! - [`engine`]: computes records with a [`StatisticsConfig`]
//! - [`store`]: accumulates records by region, field and model
//! - [`provider`]: the boundary through which point-data arrays are obtained
//! - [`catalog`]: discovers which fields and regions the selected models share
//! - [`session`]: selection state and run orchestration
//!
//! # Examples
//!
//! ```
//! use meshstats_engine::{StatisticsConfig, StatisticsEngine};
//!
//! let values = (1..=1000).map(f64::from).collect::<Vec<_>>();
//! let engine = StatisticsEngine::new(StatisticsConfig::default());
//! let record = engine.compute(&values, None).unwrap();
//!
//! assert_eq!(record.mean, 500.5);
//! assert_eq!(record.std, 288.675);
//! assert_eq!(record.percentile5, 50.0);
//! ```

pub use self::{
    catalog::FieldCatalog,
    engine::{StatisticsConfig, StatisticsEngine},
    mask::mask_values,
    provider::{ArrayProvider, MemoryArrayProvider},
    record::StatisticRecord,
    session::{RegionSelection, RunError, RunIssue, RunReport, StatisticsSession},
    store::{ENTIRE_MODEL, ResultStore},
};

pub mod catalog;
pub mod engine;
pub mod mask;
pub mod provider;
pub mod record;
pub mod session;
pub mod store;

/// The mask and the value array of one model do not have the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("size of mask array ({mask_len}) and value array ({values_len}) are not the same")]
pub struct SizeMismatchError {
    pub values_len: usize,
    pub mask_len: usize,
}

/// Reasons why no [`StatisticRecord`] could be computed for a selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum ComputeError {
    #[display("{_0}")]
    SizeMismatch(SizeMismatchError),
    #[display("the region is empty")]
    EmptyRegion,
}

impl From<SizeMismatchError> for ComputeError {
    fn from(err: SizeMismatchError) -> Self {
        Self::SizeMismatch(err)
    }
}
