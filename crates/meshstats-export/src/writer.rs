//! Writing result stores to disk.

use std::{
    fs,
    ops::ControlFlow,
    path::{Path, PathBuf},
};

use meshstats_engine::{
    ArrayProvider, ComputeError, ENTIRE_MODEL, ResultStore, RunIssue, mask_values,
};
use tracing::{debug, info, warn};

use crate::{CsvFormat, ExportError, render_field_table, render_region_table};

/// Directory, below the export directory, receiving per-point values.
pub const POINT_VALUES_DIR: &str = "ValuesOnEachPoint";

/// How tables are distributed over files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportLayout {
    /// One file per field: `<dir>/<region>/<field>.csv`.
    #[default]
    Separate,
    /// One file per region: `<dir>/<region>.csv`.
    Combined,
}

/// What to do when a destination file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    Overwrite,
    /// Leave the existing file and continue with the next one.
    #[default]
    Skip,
    /// Leave the existing file and stop the export.
    Abort,
}

/// Files touched by an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    /// Existing files left untouched.
    pub skipped: Vec<PathBuf>,
    /// `true` if the export stopped at an existing file.
    pub aborted: bool,
    /// Point values that could not be exported.
    pub issues: Vec<RunIssue>,
}

/// Writes statistics tables and point values as delimited text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter {
    layout: ExportLayout,
    format: CsvFormat,
    overwrite: OverwritePolicy,
}

impl Exporter {
    #[must_use]
    pub fn new(layout: ExportLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(self, format: CsvFormat) -> Self {
        Self { format, ..self }
    }

    #[must_use]
    pub fn with_overwrite(self, overwrite: OverwritePolicy) -> Self {
        Self { overwrite, ..self }
    }

    /// Writes every table of `store` below `dir`.
    ///
    /// Regions, fields and models are written in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or a file cannot be
    /// written. Files written before the failure are kept.
    pub fn export(&self, store: &ResultStore, dir: &Path) -> Result<ExportSummary, ExportError> {
        let mut summary = ExportSummary::default();
        create_dir(dir)?;

        'regions: for (region, fields) in store.regions() {
            match self.layout {
                ExportLayout::Separate => {
                    let region_dir = dir.join(region);
                    create_dir(&region_dir)?;
                    for (field, models) in fields {
                        let path = region_dir.join(format!("{field}.csv"));
                        let contents = render_field_table(&self.format, field, models);
                        if self.write_file(&path, &contents, &mut summary)?.is_break() {
                            break 'regions;
                        }
                    }
                }
                ExportLayout::Combined => {
                    let path = dir.join(format!("{region}.csv"));
                    let contents = render_region_table(&self.format, region, fields);
                    if self.write_file(&path, &contents, &mut summary)?.is_break() {
                        break 'regions;
                    }
                }
            }
        }

        info!(
            dir = %dir.display(),
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            aborted = summary.aborted,
            "exported statistics tables"
        );
        Ok(summary)
    }

    /// Writes the masked values of every (region, field, model) of `store`
    /// to `<dir>/ValuesOnEachPoint/<region>/<field>/<model>.csv`, one value
    /// per line.
    ///
    /// The entire-model region is not exported. Values are written unrounded.
    /// Triples whose arrays are missing from `provider`, whose mask does not
    /// match, or whose region is empty are reported in
    /// [`ExportSummary::issues`].
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or a file cannot be
    /// written.
    pub fn export_point_values<P>(
        &self,
        store: &ResultStore,
        provider: &P,
        dir: &Path,
    ) -> Result<ExportSummary, ExportError>
    where
        P: ArrayProvider + ?Sized,
    {
        let mut summary = ExportSummary::default();
        let root = dir.join(POINT_VALUES_DIR);

        for (region, field, model, _) in store.iter_sorted() {
            if region == ENTIRE_MODEL {
                continue;
            }
            let Some(values) = point_values(provider, region, field, model, &mut summary) else {
                continue;
            };
            let mut contents = String::new();
            for value in values {
                contents.push_str(&self.format.format_number(value));
                contents.push('\n');
            }
            let field_dir = root.join(region).join(field);
            create_dir(&field_dir)?;
            let path = field_dir.join(format!("{model}.csv"));
            if self.write_file(&path, &contents, &mut summary)?.is_break() {
                break;
            }
        }

        info!(
            dir = %root.display(),
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            issues = summary.issues.len(),
            aborted = summary.aborted,
            "exported point values"
        );
        Ok(summary)
    }

    fn write_file(
        &self,
        path: &Path,
        contents: &str,
        summary: &mut ExportSummary,
    ) -> Result<ControlFlow<()>, ExportError> {
        if path.exists() {
            match self.overwrite {
                OverwritePolicy::Overwrite => {}
                OverwritePolicy::Skip => {
                    debug!(path = %path.display(), "file exists, skipped");
                    summary.skipped.push(path.to_owned());
                    return Ok(ControlFlow::Continue(()));
                }
                OverwritePolicy::Abort => {
                    warn!(path = %path.display(), "file exists, export aborted");
                    summary.aborted = true;
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        fs::write(path, contents).map_err(|source| ExportError::Write {
            path: path.to_owned(),
            source,
        })?;
        debug!(path = %path.display(), "wrote file");
        summary.written.push(path.to_owned());
        Ok(ControlFlow::Continue(()))
    }
}

fn point_values<P>(
    provider: &P,
    region: &str,
    field: &str,
    model: &str,
    summary: &mut ExportSummary,
) -> Option<Vec<f64>>
where
    P: ArrayProvider + ?Sized,
{
    let mut missing = |array: &str| {
        let issue = RunIssue::MissingArray {
            region: region.to_owned(),
            field: field.to_owned(),
            model: model.to_owned(),
            array: array.to_owned(),
        };
        warn!("{issue}");
        summary.issues.push(issue);
    };
    let Some(values) = provider.array(model, field) else {
        missing(field);
        return None;
    };
    let Some(mask) = provider.array(model, region) else {
        missing(region);
        return None;
    };

    let error = match mask_values(values, Some(mask)) {
        Ok(masked) if !masked.is_empty() => return Some(masked),
        Ok(_) => ComputeError::EmptyRegion,
        Err(e) => ComputeError::SizeMismatch(e),
    };
    let issue = RunIssue::Compute {
        region: region.to_owned(),
        field: field.to_owned(),
        model: model.to_owned(),
        error,
    };
    warn!("{issue}");
    summary.issues.push(issue);
    None
}

fn create_dir(path: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(path).map_err(|source| ExportError::CreateDir {
        path: path.to_owned(),
        source,
    })
}
