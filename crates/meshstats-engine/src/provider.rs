//! Access to the point-data arrays of surface models.

use std::collections::BTreeMap;

/// Source of scalar point-data arrays.
///
/// Implemented by whatever holds the models: a host scene, files loaded from
/// disk, or [`MemoryArrayProvider`]. Only single-component arrays are exposed
/// through this trait.
pub trait ArrayProvider {
    /// Returns the names of the scalar arrays of `model`.
    ///
    /// Returns an empty list for an unknown model.
    fn scalar_array_names(&self, model: &str) -> Vec<&str>;

    /// Returns the scalar array `name` of `model`, or `None` if either is unknown.
    fn array(&self, model: &str, name: &str) -> Option<&[f64]>;
}

/// [`ArrayProvider`] holding its arrays in memory.
///
/// # Examples
///
/// ```
/// use meshstats_engine::{ArrayProvider, MemoryArrayProvider};
///
/// let mut provider = MemoryArrayProvider::new();
/// provider.insert_array("T1toT2", "Distance", vec![0.5, 1.5]);
/// provider.insert_array("T1toT2", "Condyle_ROI", vec![1.0, 0.0]);
///
/// assert_eq!(provider.scalar_array_names("T1toT2"), ["Condyle_ROI", "Distance"]);
/// assert_eq!(provider.array("T1toT2", "Distance"), Some(&[0.5, 1.5][..]));
/// assert_eq!(provider.array("T2toT3", "Distance"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryArrayProvider {
    models: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
}

impl MemoryArrayProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model without arrays; inserting an array registers it implicitly.
    pub fn insert_model(&mut self, model: &str) {
        self.models.entry(model.to_owned()).or_default();
    }

    /// Inserts or replaces the array `name` of `model`.
    pub fn insert_array(&mut self, model: &str, name: &str, values: Vec<f64>) {
        self.models
            .entry(model.to_owned())
            .or_default()
            .insert(name.to_owned(), values);
    }

    #[must_use]
    pub fn contains_model(&self, model: &str) -> bool {
        self.models.contains_key(model)
    }
}

impl ArrayProvider for MemoryArrayProvider {
    fn scalar_array_names(&self, model: &str) -> Vec<&str> {
        self.models
            .get(model)
            .map(|arrays| arrays.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn array(&self, model: &str, name: &str) -> Option<&[f64]> {
        self.models.get(model)?.get(name).map(Vec::as_slice)
    }
}
