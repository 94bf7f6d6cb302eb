//! Selection state and run orchestration.
//!
//! A [`StatisticsSession`] holds what the user selected (models, fields and
//! regions) together with the results of the last run. The host creates one
//! session per scene and calls [`StatisticsSession::close_scene`] when the
//! scene is closed.
//!
//! # Run semantics
//!
//! [`StatisticsSession::run`] computes one record per (region, field, model)
//! triple. Problems with a single triple (a missing array, a mask whose size
//! does not match, an empty region) are reported as [`RunIssue`]s and do not
//! stop the other triples. Results are staged and committed when the run
//! completes, replacing the results of the previous run.

use tracing::{debug, info, warn};

use crate::{
    ArrayProvider, ComputeError, FieldCatalog, ResultStore, StatisticsConfig, StatisticsEngine,
    store::ENTIRE_MODEL,
};

/// Which regions a run computes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSelection {
    /// Every region of the catalog, [`ENTIRE_MODEL`] included.
    All,
    /// A single region.
    Single(String),
}

impl Default for RegionSelection {
    fn default() -> Self {
        Self::Single(ENTIRE_MODEL.to_owned())
    }
}

/// A (region, field, model) triple that produced no record.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RunIssue {
    #[display("{region} / {field} / {model}: array '{array}' not found")]
    MissingArray {
        region: String,
        field: String,
        model: String,
        array: String,
    },
    #[display("{region} / {field} / {model}: {error}")]
    Compute {
        region: String,
        field: String,
        model: String,
        error: ComputeError,
    },
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of records committed to the result store.
    pub computed: usize,
    /// Triples for which no record was produced.
    pub issues: Vec<RunIssue>,
}

/// Reasons why a run cannot start.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RunError {
    #[display("no model selected")]
    NoModelSelected,
    #[display("no field selected")]
    NoFieldSelected,
    #[display("field '{field}' is not available on every selected model")]
    UnavailableField { field: String },
    #[display("region '{region}' is not available on every selected model")]
    UnavailableRegion { region: String },
}

/// Selection state and results of one scene.
#[derive(Debug, Clone, Default)]
pub struct StatisticsSession {
    engine: StatisticsEngine,
    models: Vec<String>,
    fields: Vec<String>,
    regions: RegionSelection,
    results: ResultStore,
}

impl StatisticsSession {
    #[must_use]
    pub fn new(config: StatisticsConfig) -> Self {
        Self {
            engine: StatisticsEngine::new(config),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &StatisticsConfig {
        self.engine.config()
    }

    pub fn select_models<I, S>(&mut self, models: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
    }

    pub fn select_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
    }

    pub fn select_regions(&mut self, regions: RegionSelection) {
        self.regions = regions;
    }

    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.models
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn region_selection(&self) -> &RegionSelection {
        &self.regions
    }

    /// Results of the last completed run.
    #[must_use]
    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    /// Computes every selected (region, field, model) triple.
    ///
    /// `catalog` must have been discovered for the selected models; it
    /// determines which fields and regions may be requested and which
    /// regions [`RegionSelection::All`] expands to.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] without touching the previous results when the
    /// selection is empty or refers to a field or region missing from `catalog`.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshstats_engine::{FieldCatalog, MemoryArrayProvider, RegionSelection, StatisticsSession};
    ///
    /// let mut provider = MemoryArrayProvider::new();
    /// provider.insert_array("T1", "Distance", vec![1.0, 2.0, 3.0, 4.0]);
    /// provider.insert_array("T1", "Chin_ROI", vec![0.0, 1.0, 1.0, 0.0]);
    ///
    /// let mut session = StatisticsSession::default();
    /// session.select_models(["T1"]);
    /// session.select_fields(["Distance"]);
    /// session.select_regions(RegionSelection::All);
    ///
    /// let catalog = FieldCatalog::discover(&provider, session.models());
    /// let report = session.run(&provider, &catalog).unwrap();
    ///
    /// assert_eq!(report.computed, 2);
    /// assert_eq!(session.results().get("Chin_ROI", "Distance", "T1").unwrap().mean, 2.5);
    /// ```
    pub fn run<P>(&mut self, provider: &P, catalog: &FieldCatalog) -> Result<RunReport, RunError>
    where
        P: ArrayProvider + ?Sized,
    {
        let regions = self.validate(catalog)?;

        let mut staged = ResultStore::new();
        let mut report = RunReport::default();
        for region in &regions {
            for field in &self.fields {
                for model in &self.models {
                    match self.compute_one(provider, region, field, model) {
                        Ok(record) => {
                            debug!(region, field, model, mean = record.mean, "statistics computed");
                            staged.upsert(region, field, model, record);
                            report.computed += 1;
                        }
                        Err(issue) => {
                            warn!("{issue}");
                            report.issues.push(issue);
                        }
                    }
                }
            }
        }

        self.results = staged;
        info!(
            records = report.computed,
            issues = report.issues.len(),
            "statistics run completed"
        );
        Ok(report)
    }

    /// Forgets the selection and the results, as when the host closes its scene.
    pub fn close_scene(&mut self) {
        self.models.clear();
        self.fields.clear();
        self.regions = RegionSelection::default();
        self.results.clear();
    }

    fn validate(&self, catalog: &FieldCatalog) -> Result<Vec<String>, RunError> {
        if self.models.is_empty() {
            return Err(RunError::NoModelSelected);
        }
        if self.fields.is_empty() {
            return Err(RunError::NoFieldSelected);
        }
        if let Some(field) = self.fields.iter().find(|f| !catalog.contains_field(f)) {
            return Err(RunError::UnavailableField {
                field: field.clone(),
            });
        }
        match &self.regions {
            RegionSelection::All => Ok(catalog.regions().to_vec()),
            RegionSelection::Single(region) if catalog.contains_region(region) => {
                Ok(vec![region.clone()])
            }
            RegionSelection::Single(region) => Err(RunError::UnavailableRegion {
                region: region.clone(),
            }),
        }
    }

    fn compute_one<P>(
        &self,
        provider: &P,
        region: &str,
        field: &str,
        model: &str,
    ) -> Result<crate::StatisticRecord, RunIssue>
    where
        P: ArrayProvider + ?Sized,
    {
        let missing = |array: &str| RunIssue::MissingArray {
            region: region.to_owned(),
            field: field.to_owned(),
            model: model.to_owned(),
            array: array.to_owned(),
        };

        let values = provider.array(model, field).ok_or_else(|| missing(field))?;
        let mask = if region == ENTIRE_MODEL {
            None
        } else {
            Some(provider.array(model, region).ok_or_else(|| missing(region))?)
        };

        self.engine
            .compute(values, mask)
            .map_err(|error| RunIssue::Compute {
                region: region.to_owned(),
                field: field.to_owned(),
                model: model.to_owned(),
                error,
            })
    }
}
