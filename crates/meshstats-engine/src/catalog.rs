//! Discovery of the fields and regions shared by a set of models.

use std::collections::BTreeSet;

use crate::{ArrayProvider, store::ENTIRE_MODEL};

/// Substring that marks a scalar array as a region-of-interest mask.
pub const ROI_MARKER: &str = "_ROI";

/// Returns `true` if the array `name` is a region mask rather than a field.
#[must_use]
pub fn is_region_name(name: &str) -> bool {
    name.contains(ROI_MARKER)
}

/// Fields and regions available for a selection of models.
///
/// A field or region can only be computed when every selected model carries
/// it, so the catalog is built from the intersection of the models' scalar
/// arrays. Arrays whose name contains [`ROI_MARKER`] are regions, all others
/// are fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<String>,
    regions: Vec<String>,
    unavailable_fields: Vec<String>,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self {
            fields: vec![],
            regions: vec![ENTIRE_MODEL.to_owned()],
            unavailable_fields: vec![],
        }
    }
}

impl FieldCatalog {
    /// Builds the catalog of `models`.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshstats_engine::{FieldCatalog, MemoryArrayProvider};
    ///
    /// let mut provider = MemoryArrayProvider::new();
    /// provider.insert_array("T1", "Distance", vec![0.0]);
    /// provider.insert_array("T1", "AlongX", vec![0.0]);
    /// provider.insert_array("T1", "Chin_ROI", vec![1.0]);
    /// provider.insert_array("T2", "Distance", vec![0.0]);
    /// provider.insert_array("T2", "Chin_ROI", vec![1.0]);
    ///
    /// let catalog = FieldCatalog::discover(&provider, &["T1", "T2"]);
    /// assert_eq!(catalog.fields(), ["Distance"]);
    /// assert_eq!(catalog.regions(), ["Entire Model", "Chin_ROI"]);
    /// assert_eq!(catalog.unavailable_fields(), ["AlongX"]);
    /// ```
    pub fn discover<P, S>(provider: &P, models: &[S]) -> Self
    where
        P: ArrayProvider + ?Sized,
        S: AsRef<str>,
    {
        let mut per_model = models.iter().map(|model| {
            provider
                .scalar_array_names(model.as_ref())
                .into_iter()
                .collect::<BTreeSet<_>>()
        });
        let Some(first) = per_model.next() else {
            return Self::default();
        };

        let mut common = first.clone();
        let mut all = first;
        for names in per_model {
            common.retain(|name| names.contains(name));
            all.extend(names);
        }

        let (regions, fields): (Vec<_>, Vec<_>) =
            common.iter().copied().partition(|name| is_region_name(name));
        let unavailable_fields = all
            .difference(&common)
            .copied()
            .filter(|name| !is_region_name(name))
            .map(str::to_owned)
            .collect();

        Self {
            fields: fields.into_iter().map(str::to_owned).collect(),
            regions: std::iter::once(ENTIRE_MODEL)
                .chain(regions.into_iter().filter(|name| *name != ENTIRE_MODEL))
                .map(str::to_owned)
                .collect(),
            unavailable_fields,
        }
    }

    /// Fields present on every model, sorted.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// [`ENTIRE_MODEL`] followed by the regions present on every model, sorted.
    #[must_use]
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Fields present on some but not all models, sorted.
    #[must_use]
    pub fn unavailable_fields(&self) -> &[String] {
        &self.unavailable_fields
    }

    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    #[must_use]
    pub fn contains_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r == region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryArrayProvider;

    fn add_model(provider: &mut MemoryArrayProvider, model: &str, arrays: &[&str]) {
        provider.insert_model(model);
        for array in arrays {
            provider.insert_array(model, array, vec![]);
        }
    }

    #[test]
    fn test_no_models() {
        let catalog = FieldCatalog::discover(&MemoryArrayProvider::new(), &[] as &[&str]);
        assert!(catalog.fields().is_empty());
        assert_eq!(catalog.regions(), [ENTIRE_MODEL]);
        assert!(catalog.unavailable_fields().is_empty());
    }

    #[test]
    fn test_single_model() {
        let mut provider = MemoryArrayProvider::new();
        add_model(&mut provider, "m", &["b", "a", "Left_ROI", "Right_ROI"]);
        let catalog = FieldCatalog::discover(&provider, &["m"]);
        assert_eq!(catalog.fields(), ["a", "b"]);
        assert_eq!(catalog.regions(), [ENTIRE_MODEL, "Left_ROI", "Right_ROI"]);
        assert!(catalog.unavailable_fields().is_empty());
    }

    #[test]
    fn test_intersection_and_difference() {
        let mut provider = MemoryArrayProvider::new();
        add_model(&mut provider, "m1", &["a", "b", "c", "X_ROI", "Y_ROI"]);
        add_model(&mut provider, "m2", &["a", "c", "d", "X_ROI"]);
        add_model(&mut provider, "m3", &["a", "c", "e", "X_ROI", "Z_ROI"]);
        let catalog = FieldCatalog::discover(&provider, &["m1", "m2", "m3"]);
        assert_eq!(catalog.fields(), ["a", "c"]);
        assert_eq!(catalog.regions(), [ENTIRE_MODEL, "X_ROI"]);
        // Region masks missing on some models are dropped, not listed
        assert_eq!(catalog.unavailable_fields(), ["b", "d", "e"]);
        assert!(catalog.contains_field("a"));
        assert!(!catalog.contains_field("b"));
        assert!(catalog.contains_region("X_ROI"));
        assert!(!catalog.contains_region("Y_ROI"));
    }

    #[test]
    fn test_marker_anywhere_in_name() {
        assert!(is_region_name("Condyle_ROI"));
        assert!(is_region_name("my_ROI_mask"));
        assert!(!is_region_name("roi"));
        assert!(!is_region_name("Condyle_Roi"));
    }

    #[test]
    fn test_unknown_model_has_no_arrays() {
        let mut provider = MemoryArrayProvider::new();
        add_model(&mut provider, "m1", &["a"]);
        let catalog = FieldCatalog::discover(&provider, &["m1", "missing"]);
        assert!(catalog.fields().is_empty());
        assert_eq!(catalog.unavailable_fields(), ["a"]);
    }
}
