//! Rendering and re-parsing of statistics tables.
//!
//! A field table is the field name on its own row, a header row and one row
//! per model:
//!
//! ```text
//! Distance
//! Model,Min,Max,Mean,SD,Per5,Per15,Per25,Per50,Per75,Per85,Per95
//! T1toT2,-1.2,3.4,...
//! ```
//!
//! A region table is the region name, a blank row, then every field table of
//! the region each followed by a blank row.

use std::fmt::Write as _;

use meshstats_engine::{
    StatisticRecord,
    store::{FieldRecords, ModelRecords},
};

use crate::CsvFormat;

/// Label of the first column of the header row.
pub const MODEL_COLUMN: &str = "Model";

/// Returns the header row.
#[must_use]
pub fn header_row(format: &CsvFormat) -> String {
    format.join(std::iter::once(MODEL_COLUMN).chain(StatisticRecord::COLUMN_NAMES))
}

fn record_row(format: &CsvFormat, model: &str, record: &StatisticRecord) -> String {
    let cells = std::iter::once(format.escape(model).into_owned())
        .chain(record.values().map(|v| format.format_number(v)));
    format.join(cells)
}

fn write_field_table(out: &mut String, format: &CsvFormat, field: &str, models: &ModelRecords) {
    writeln!(out, "{}", format.escape(field)).unwrap();
    writeln!(out, "{}", header_row(format)).unwrap();
    for (model, record) in models {
        writeln!(out, "{}", record_row(format, model, record)).unwrap();
    }
}

/// Renders the table of one field.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use meshstats_engine::StatisticRecord;
/// use meshstats_export::{CsvFormat, render_field_table};
///
/// let mut models = BTreeMap::new();
/// models.insert("T1".to_owned(), StatisticRecord::from_values([1.0; 11]));
///
/// let table = render_field_table(&CsvFormat::default(), "Distance", &models);
/// let mut lines = table.lines();
/// assert_eq!(lines.next(), Some("Distance"));
/// assert_eq!(lines.next(), Some("Model,Min,Max,Mean,SD,Per5,Per15,Per25,Per50,Per75,Per85,Per95"));
/// assert_eq!(lines.next(), Some("T1,1.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0"));
/// assert_eq!(lines.next(), None);
/// ```
#[must_use]
pub fn render_field_table(format: &CsvFormat, field: &str, models: &ModelRecords) -> String {
    let mut out = String::new();
    write_field_table(&mut out, format, field, models);
    out
}

/// Renders every field table of one region.
#[must_use]
pub fn render_region_table(format: &CsvFormat, region: &str, fields: &FieldRecords) -> String {
    let mut out = String::new();
    writeln!(out, "{}", format.escape(region)).unwrap();
    writeln!(out).unwrap();
    for (field, models) in fields {
        write_field_table(&mut out, format, field, models);
        writeln!(out).unwrap();
    }
    out
}

/// A table that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseTableError {
    #[display("table is empty")]
    Empty,
    #[display("line {line}: invalid header row")]
    InvalidHeader { line: usize },
    #[display("line {line}: expected {expected} cells, found {found}")]
    CellCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[display("line {line}: invalid number '{cell}'")]
    InvalidNumber { line: usize, cell: String },
}

/// A field table read back from text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFieldTable {
    pub field: String,
    /// Rows in file order.
    pub rows: Vec<(String, StatisticRecord)>,
}

/// Parses a field table rendered by [`render_field_table`].
///
/// Parsing stops at the first blank line after the rows.
///
/// # Errors
///
/// Returns an error if the field-name row is missing, the header does not
/// match [`header_row`], or a row is malformed.
pub fn parse_field_table(text: &str, format: &CsvFormat) -> Result<ParsedFieldTable, ParseTableError> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));
    parse_section(&mut lines, format)?.ok_or(ParseTableError::Empty)
}

/// Parses a region table rendered by [`render_region_table`].
///
/// Returns the region name and the field tables in file order.
///
/// # Errors
///
/// Returns an error if the region-name row is missing or any field table is
/// malformed.
pub fn parse_region_table(
    text: &str,
    format: &CsvFormat,
) -> Result<(String, Vec<ParsedFieldTable>), ParseTableError> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));
    let region = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => {}
            Some((_, line)) => break single_cell(format, line),
            None => return Err(ParseTableError::Empty),
        }
    };

    let mut tables = vec![];
    while let Some(table) = parse_section(&mut lines, format)? {
        tables.push(table);
    }
    Ok((region, tables))
}

fn single_cell(format: &CsvFormat, line: &str) -> String {
    format.split(line).swap_remove(0)
}

fn parse_section<'a, I>(
    lines: &mut I,
    format: &CsvFormat,
) -> Result<Option<ParsedFieldTable>, ParseTableError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let field = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => {}
            Some((_, line)) => break single_cell(format, line),
            None => return Ok(None),
        }
    };

    let header = header_row(format);
    match lines.next() {
        Some((_, line)) if line.trim_end() == header => {}
        Some((line, _)) => return Err(ParseTableError::InvalidHeader { line }),
        None => return Err(ParseTableError::InvalidHeader { line: 0 }),
    }

    let mut rows = vec![];
    for (line_no, line) in lines.by_ref() {
        if line.trim().is_empty() {
            break;
        }
        rows.push(parse_row(format, line_no, line)?);
    }
    Ok(Some(ParsedFieldTable { field, rows }))
}

fn parse_row(
    format: &CsvFormat,
    line: usize,
    text: &str,
) -> Result<(String, StatisticRecord), ParseTableError> {
    let mut cells = format.split(text);
    let expected = StatisticRecord::LEN + 1;
    if cells.len() != expected {
        return Err(ParseTableError::CellCount {
            line,
            expected,
            found: cells.len(),
        });
    }

    let mut values = [0.0; StatisticRecord::LEN];
    for (value, cell) in values.iter_mut().zip(&cells[1..]) {
        *value = format
            .parse_number(cell)
            .ok_or_else(|| ParseTableError::InvalidNumber {
                line,
                cell: cell.clone(),
            })?;
    }
    let model = cells.swap_remove(0);
    Ok((model, StatisticRecord::from_values(values)))
}
