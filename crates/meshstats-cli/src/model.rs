//! Surface models loaded from JSON point-data files.

use std::{collections::BTreeMap, path::PathBuf};

use meshstats_engine::MemoryArrayProvider;
use serde::{Deserialize, Serialize};

use crate::util;

/// A surface model and the arrays attached to its points.
///
/// ```json
/// { "name": "T1toT2", "point_data": { "Distance": [0.5, 1.2], "Normals": [[0, 0, 1], [0, 1, 0]] } }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PointDataModel {
    pub name: String,
    pub point_data: BTreeMap<String, PointArray>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PointArray {
    /// One component per point.
    Scalars(Vec<f64>),
    /// Several components per point; not usable as a field or region.
    Tuples(Vec<Vec<f64>>),
}

/// Models selected on the command line, in argument order.
#[derive(Debug, Default)]
pub struct ModelSet {
    names: Vec<String>,
    provider: MemoryArrayProvider,
}

impl ModelSet {
    pub fn load(paths: &[PathBuf]) -> anyhow::Result<Self> {
        let mut set = Self::default();
        for path in paths {
            let model = util::read_model_file(path)?;
            eprintln!(
                "Loaded model {} ({} arrays) from {}",
                model.name,
                model.point_data.len(),
                path.display()
            );
            set.insert(model)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, model: PointDataModel) -> anyhow::Result<()> {
        if self.provider.contains_model(&model.name) {
            anyhow::bail!("Model {} is given more than once", model.name);
        }
        self.provider.insert_model(&model.name);
        for (array_name, array) in model.point_data {
            match array {
                PointArray::Scalars(values) => {
                    self.provider.insert_array(&model.name, &array_name, values);
                }
                PointArray::Tuples(_) => {
                    eprintln!(
                        "  Skipping array {array_name} of {}: not a scalar array",
                        model.name
                    );
                }
            }
        }
        self.names.push(model.name);
        Ok(())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn provider(&self) -> &MemoryArrayProvider {
        &self.provider
    }
}
