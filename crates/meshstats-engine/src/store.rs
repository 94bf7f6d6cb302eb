//! Accumulation of statistic records by region, field and model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::StatisticRecord;

/// Region name meaning "no mask applied".
pub const ENTIRE_MODEL: &str = "Entire Model";

/// Records of one field, keyed by model name.
pub type ModelRecords = BTreeMap<String, StatisticRecord>;

/// Records of one region, keyed by field name.
pub type FieldRecords = BTreeMap<String, ModelRecords>;

/// Nested map region → field → model → [`StatisticRecord`].
///
/// Every level is kept sorted by key, so iteration and export order are
/// reproducible. Records are replaced, never modified in place.
///
/// # Serialization
///
/// Serializes as nested JSON objects:
///
/// ```json
/// {
///   "Entire Model": {
///     "SignedDistance": {
///       "T1toT2": { "min": -5.62, "max": 0.947, ... }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultStore {
    regions: BTreeMap<String, FieldRecords>,
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` at the given key triple, replacing any previous record.
    ///
    /// Returns the replaced record, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshstats_engine::{ResultStore, StatisticRecord};
    ///
    /// let mut store = ResultStore::new();
    /// let first = StatisticRecord::from_values([1.0; 11]);
    /// let second = StatisticRecord::from_values([2.0; 11]);
    ///
    /// assert_eq!(store.upsert("Entire Model", "Distance", "T1", first), None);
    /// assert_eq!(store.upsert("Entire Model", "Distance", "T1", second), Some(first));
    /// assert_eq!(store.get("Entire Model", "Distance", "T1"), Some(&second));
    /// ```
    pub fn upsert(
        &mut self,
        region: &str,
        field: &str,
        model: &str,
        record: StatisticRecord,
    ) -> Option<StatisticRecord> {
        self.regions
            .entry(region.to_owned())
            .or_default()
            .entry(field.to_owned())
            .or_default()
            .insert(model.to_owned(), record)
    }

    #[must_use]
    pub fn get(&self, region: &str, field: &str, model: &str) -> Option<&StatisticRecord> {
        self.regions.get(region)?.get(field)?.get(model)
    }

    /// Returns the records of `region`, keyed by field and then by model.
    #[must_use]
    pub fn region(&self, region: &str) -> Option<&FieldRecords> {
        self.regions.get(region)
    }

    /// Returns the region names in ascending order.
    pub fn region_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.regions.keys().map(String::as_str)
    }

    /// Iterates over regions in ascending order together with their field maps.
    pub fn regions(&self) -> impl Iterator<Item = (&str, &FieldRecords)> + '_ {
        self.regions.iter().map(|(name, fields)| (name.as_str(), fields))
    }

    /// Iterates over every record in ascending (region, field, model) order.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshstats_engine::{ResultStore, StatisticRecord};
    ///
    /// let record = StatisticRecord::from_values([0.0; 11]);
    /// let mut store = ResultStore::new();
    /// store.upsert("b_ROI", "y", "m2", record);
    /// store.upsert("a_ROI", "y", "m1", record);
    /// store.upsert("b_ROI", "x", "m1", record);
    ///
    /// let keys = store
    ///     .iter_sorted()
    ///     .map(|(r, f, m, _)| format!("{r}/{f}/{m}"))
    ///     .collect::<Vec<_>>();
    /// assert_eq!(keys, ["a_ROI/y/m1", "b_ROI/x/m1", "b_ROI/y/m2"]);
    /// ```
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &str, &str, &StatisticRecord)> + '_ {
        self.regions.iter().flat_map(|(region, fields)| {
            fields.iter().flat_map(move |(field, models)| {
                models.iter().map(move |(model, record)| {
                    (region.as_str(), field.as_str(), model.as_str(), record)
                })
            })
        })
    }

    /// Removes every record of `region`.
    ///
    /// Returns `true` if the region was present.
    pub fn clear_region(&mut self, region: &str) -> bool {
        self.regions.remove(region).is_some()
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(v: f64) -> StatisticRecord {
        StatisticRecord::from_values([v; StatisticRecord::LEN])
    }

    #[test]
    fn test_empty_store() {
        let store = ResultStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.iter_sorted().count(), 0);
        assert!(store.get(ENTIRE_MODEL, "f", "m").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = ResultStore::new();
        store.upsert(ENTIRE_MODEL, "f", "m", record(1.0));
        store.upsert(ENTIRE_MODEL, "f", "m", record(2.0));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(ENTIRE_MODEL, "f", "m"), Some(&record(2.0)));
    }

    #[test]
    fn test_iter_sorted_each_level() {
        let mut store = ResultStore::new();
        for (r, f, m) in [
            ("z_ROI", "b", "m2"),
            ("z_ROI", "a", "m3"),
            (ENTIRE_MODEL, "b", "m1"),
            ("z_ROI", "a", "m1"),
            (ENTIRE_MODEL, "a", "m9"),
        ] {
            store.upsert(r, f, m, record(0.0));
        }
        let keys = store
            .iter_sorted()
            .map(|(r, f, m, _)| (r, f, m))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            [
                (ENTIRE_MODEL, "a", "m9"),
                (ENTIRE_MODEL, "b", "m1"),
                ("z_ROI", "a", "m1"),
                ("z_ROI", "a", "m3"),
                ("z_ROI", "b", "m2"),
            ]
        );
        // Restartable
        assert_eq!(store.iter_sorted().count(), 5);
    }

    #[test]
    fn test_region_lookup() {
        let mut store = ResultStore::new();
        store.upsert("Chin_ROI", "Distance", "m2", record(2.0));
        store.upsert("Chin_ROI", "Distance", "m1", record(1.0));
        store.upsert("Chin_ROI", "AlongX", "m1", record(3.0));

        let fields = store.region("Chin_ROI").unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["AlongX", "Distance"]);
        assert_eq!(fields["Distance"].len(), 2);
        assert!(store.region(ENTIRE_MODEL).is_none());
        assert_eq!(store.regions().count(), 1);
    }

    #[test]
    fn test_clear_region() {
        let mut store = ResultStore::new();
        store.upsert(ENTIRE_MODEL, "f", "m", record(1.0));
        store.upsert("Mandible_ROI", "f", "m", record(2.0));

        assert!(store.clear_region("Mandible_ROI"));
        assert!(!store.clear_region("Mandible_ROI"));
        assert_eq!(store.region_names().collect::<Vec<_>>(), [ENTIRE_MODEL]);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let mut store = ResultStore::new();
        store.upsert(ENTIRE_MODEL, "f", "m", record(1.5));
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["Entire Model"]["f"]["m"]["percentile95"], 1.5);

        let back: ResultStore = serde_json::from_value(json).unwrap();
        assert_eq!(back, store);
    }
}
