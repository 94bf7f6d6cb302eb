use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use meshstats_engine::StatisticsConfig;
use serde::{Serialize, de::DeserializeOwned};

use crate::model::PointDataModel;

/// Output path meaning "standard output".
pub const STDOUT_PATH: &str = "-";

/// Writes `value` as pretty JSON to `output_path`, or to stdout for [`STDOUT_PATH`].
pub fn save_json<T>(value: &T, output_path: &Path) -> anyhow::Result<()>
where
    T: Serialize,
{
    if output_path == Path::new(STDOUT_PATH) {
        write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout")
    } else {
        let file = File::create(output_path).with_context(|| {
            format!("Failed to create output file: {}", output_path.display())
        })?;
        write_json(BufWriter::new(file), value)
            .with_context(|| format!("Failed to write JSON to {}", output_path.display()))
    }
}

fn write_json<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read a surface model with its point data from a JSON file
///
/// # Errors
///
/// Returns error if file cannot be opened or parsed
pub fn read_model_file<P>(path: P) -> anyhow::Result<PointDataModel>
where
    P: AsRef<Path>,
{
    read_json_file("model", path.as_ref())
}

/// Read statistics settings from a JSON file
///
/// Missing keys take their default values.
///
/// # Errors
///
/// Returns error if file cannot be opened or parsed
pub fn read_config_file<P>(path: P) -> anyhow::Result<StatisticsConfig>
where
    P: AsRef<Path>,
{
    read_json_file("config", path.as_ref())
}
