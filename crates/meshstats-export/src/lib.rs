//! Delimited-text export of mesh statistics.
//!
//! - [`format`]: delimiter and decimal separator ([`CsvFormat`])
//! - [`table`]: field and region tables, and parsing them back
//! - [`writer`]: file layouts, overwrite handling and per-point value files
//!
//! # Examples
//!
//! ```
//! use meshstats_engine::{ENTIRE_MODEL, ResultStore, StatisticRecord};
//! use meshstats_export::{CsvFormat, parse_field_table, render_field_table};
//!
//! let mut store = ResultStore::new();
//! store.upsert(ENTIRE_MODEL, "Distance", "T1", StatisticRecord::from_values([0.5; 11]));
//!
//! let format = CsvFormat::for_decimal_point(',').unwrap();
//! let models = &store.region(ENTIRE_MODEL).unwrap()["Distance"];
//! let text = render_field_table(&format, "Distance", models);
//!
//! let table = parse_field_table(&text, &format).unwrap();
//! assert_eq!(table.rows[0].0, "T1");
//! assert_eq!(table.rows[0].1.mean, 0.5);
//! ```

use std::{io, path::PathBuf};

pub use self::{
    format::{CsvFormat, InvalidDecimalPointError},
    table::{
        ParseTableError, ParsedFieldTable, parse_field_table, parse_region_table,
        render_field_table, render_region_table,
    },
    writer::{ExportLayout, ExportSummary, Exporter, OverwritePolicy},
};

pub mod format;
pub mod table;
pub mod writer;

/// An export that failed on the file system.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ExportError {
    #[display("failed to create directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[display("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },
}
