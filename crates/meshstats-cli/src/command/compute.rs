use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use meshstats_engine::{FieldCatalog, RegionSelection, StatisticsConfig, StatisticsSession};
use meshstats_export::{CsvFormat, ExportLayout, ExportSummary, Exporter, OverwritePolicy};
use meshstats_stats::percentiles::PercentileMethod;

use crate::{
    command::table,
    model::ModelSet,
    util,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    NearestRank,
    Linear,
}

impl From<MethodArg> for PercentileMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::NearestRank => PercentileMethod::NearestRank,
            MethodArg::Linear => PercentileMethod::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// One file per region and field
    Separate,
    /// One file per region
    Combined,
}

impl From<LayoutArg> for ExportLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Separate => ExportLayout::Separate,
            LayoutArg::Combined => ExportLayout::Combined,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OverwriteArg {
    /// Replace existing files
    Overwrite,
    /// Keep existing files and continue
    Skip,
    /// Stop at the first existing file
    Abort,
}

impl From<OverwriteArg> for OverwritePolicy {
    fn from(arg: OverwriteArg) -> Self {
        match arg {
            OverwriteArg::Overwrite => OverwritePolicy::Overwrite,
            OverwriteArg::Skip => OverwritePolicy::Skip,
            OverwriteArg::Abort => OverwritePolicy::Abort,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ComputeArg {
    /// Paths to the model JSON files
    #[arg(required = true)]
    models: Vec<PathBuf>,

    /// Fields to compute (comma-separated); all fields shared by the models if omitted
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Region to compute [default: Entire Model]
    #[arg(long, conflicts_with = "all_regions")]
    region: Option<String>,

    /// Compute every region shared by the models
    #[arg(long)]
    all_regions: bool,

    /// Number of decimals of the computed values
    #[arg(long)]
    decimals: Option<u8>,

    /// Percentile estimator
    #[arg(long, value_enum)]
    percentile_method: Option<MethodArg>,

    /// Statistics settings JSON file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the results as JSON to this path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Export the results as CSV files into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// How the CSV tables are distributed over files
    #[arg(long, value_enum, default_value_t = LayoutArg::Separate)]
    layout: LayoutArg,

    /// Decimal separator of the CSV files; anything but `.` switches the delimiter to `;`
    #[arg(
        long = "decimal-point",
        value_name = "CHAR",
        default_value = ".",
        value_parser = parse_csv_format
    )]
    csv_format: CsvFormat,

    /// What to do with CSV files that already exist
    #[arg(long, value_enum, default_value_t = OverwriteArg::Skip)]
    overwrite: OverwriteArg,

    /// Also export the masked value of every point of each region
    #[arg(long, requires = "export_dir")]
    point_values: bool,
}

fn parse_csv_format(s: &str) -> Result<CsvFormat, String> {
    let mut chars = s.chars();
    let (Some(decimal_point), None) = (chars.next(), chars.next()) else {
        return Err(format!("expected a single character, got '{s}'"));
    };
    CsvFormat::for_decimal_point(decimal_point).map_err(|e| e.to_string())
}

impl ComputeArg {
    fn statistics_config(&self) -> anyhow::Result<StatisticsConfig> {
        let base = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => StatisticsConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut config: StatisticsConfig) -> StatisticsConfig {
        if let Some(decimals) = self.decimals {
            config.number_of_decimals = decimals;
        }
        if let Some(method) = self.percentile_method {
            config.percentile_method = method.into();
        }
        config
    }

    fn region_selection(&self) -> RegionSelection {
        match (&self.region, self.all_regions) {
            (_, true) => RegionSelection::All,
            (Some(region), false) => RegionSelection::Single(region.clone()),
            (None, false) => RegionSelection::default(),
        }
    }
}

pub(crate) fn run(arg: &ComputeArg) -> anyhow::Result<()> {
    let config = arg.statistics_config()?;
    let models = ModelSet::load(&arg.models)?;
    let catalog = FieldCatalog::discover(models.provider(), models.names());
    for field in catalog.unavailable_fields() {
        eprintln!("Field {field} is not present on every model and cannot be computed");
    }

    let mut session = StatisticsSession::new(config);
    session.select_models(models.names().iter().cloned());
    if arg.fields.is_empty() {
        session.select_fields(catalog.fields().iter().cloned());
    } else {
        session.select_fields(arg.fields.iter().cloned());
    }
    session.select_regions(arg.region_selection());

    eprintln!(
        "Computing statistics for {} models, {} fields...",
        session.models().len(),
        session.fields().len()
    );
    let report = session
        .run(models.provider(), &catalog)
        .context("Failed to compute statistics")?;
    eprintln!("Computed {} records", report.computed);
    for issue in &report.issues {
        eprintln!("  Skipped {issue}");
    }
    println!();

    table::print_results(session.results(), session.config().number_of_decimals);

    if let Some(output) = &arg.output {
        util::save_json(session.results(), output)?;
        if output != Path::new(util::STDOUT_PATH) {
            eprintln!("Results saved to: {}", output.display());
        }
    }

    if let Some(dir) = &arg.export_dir {
        let exporter = Exporter::new(arg.layout.into())
            .with_format(arg.csv_format)
            .with_overwrite(arg.overwrite.into());

        let summary = exporter
            .export(session.results(), dir)
            .with_context(|| format!("Failed to export statistics to {}", dir.display()))?;
        print_export_summary("Statistics", &summary);

        if arg.point_values && !summary.aborted {
            let summary = exporter
                .export_point_values(session.results(), models.provider(), dir)
                .with_context(|| format!("Failed to export point values to {}", dir.display()))?;
            print_export_summary("Point values", &summary);
        }
    }

    Ok(())
}

fn print_export_summary(kind: &str, summary: &ExportSummary) {
    eprintln!("{kind}: {} files written", summary.written.len());
    for path in &summary.skipped {
        eprintln!("  Kept existing file: {}", path.display());
    }
    for issue in &summary.issues {
        eprintln!("  Skipped {issue}");
    }
    if summary.aborted {
        eprintln!("  Export stopped at an existing file");
    }
}
