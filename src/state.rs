use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::color::RegionColors;
use crate::data::loader;
use crate::data::model::{Dataset, Metric};
use crate::data::selection::{CountryOptions, SeriesView, options_for_region, series_and_average};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Selections live here; everything shown is re-derived from the dataset
/// whenever an upstream selection changes.
pub struct AppState {
    pub dataset: Dataset,

    /// Path the dataset was read from (used by File → Reload).
    pub source: PathBuf,

    pub region: Option<String>,
    pub country: Option<String>,
    pub metric: Metric,

    /// Countries for the current region (cached).
    pub country_options: CountryOptions,

    /// Series for the current country/metric (cached).
    pub series: Option<SeriesView>,

    pub region_colors: RegionColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Show the selection readout in the top bar.
    pub debug: bool,
}

impl AppState {
    pub fn new(dataset: Dataset, source: PathBuf, region: &str, metric: Metric) -> Self {
        let mut state = Self {
            region_colors: RegionColors::new(&dataset.regions),
            dataset,
            source,
            region: None,
            country: None,
            metric,
            country_options: CountryOptions::default(),
            series: None,
            status_message: None,
            debug: false,
        };
        state.select_initial_region(region);
        state
    }

    /// Pick `preferred` when present, otherwise the first region.
    fn select_initial_region(&mut self, preferred: &str) {
        let region = if self.dataset.has_region(preferred) {
            Some(preferred.to_string())
        } else {
            let fallback = self.dataset.regions.first().cloned();
            log::warn!("Region {preferred:?} not in dataset, using {fallback:?}");
            fallback
        };
        match region {
            Some(r) => self.select_region(&r),
            None => {
                self.region = None;
                self.country_options = CountryOptions::default();
                self.select_country(None);
            }
        }
    }

    /// Ingest a newly loaded dataset, keeping the region and metric if possible.
    pub fn set_dataset(&mut self, dataset: Dataset, source: PathBuf) {
        let region = self.region.clone().unwrap_or_default();
        self.region_colors = RegionColors::new(&dataset.regions);
        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
        self.select_initial_region(&region);
    }

    /// Region changed: recompute country options and reset the country.
    pub fn select_region(&mut self, region: &str) {
        log::debug!("Region selected: {region}");
        self.region = Some(region.to_string());
        self.country_options = options_for_region(&self.dataset, region);
        let default = self.country_options.default.clone();
        self.select_country(default);
    }

    pub fn select_country(&mut self, country: Option<String>) {
        log::debug!("Country selected: {country:?}");
        self.country = country;
        self.refresh_series();
    }

    pub fn set_metric(&mut self, metric: Metric) {
        log::debug!("Metric selected: {metric}");
        self.metric = metric;
        self.refresh_series();
    }

    /// Recompute the cached series after a country or metric change.
    pub fn refresh_series(&mut self) {
        self.series = self
            .country
            .as_deref()
            .map(|c| series_and_average(&self.dataset, c, self.metric));
    }

    /// Average sentence, or a placeholder when the selection has no rows.
    pub fn average_text(&self) -> String {
        match &self.series {
            Some(view) => view
                .average_text()
                .unwrap_or_else(|e| format!("No data available: {e}")),
            None => "No country available for this region.".to_string(),
        }
    }

    /// Load a dataset from `path`; on failure the current dataset stays.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        match loader::load_file(path) {
            Ok(dataset) => {
                self.set_dataset(dataset, path.to_path_buf());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }

    /// Re-read the current source file.
    pub fn reload(&mut self) -> Result<()> {
        let source = self.source.clone();
        self.open(&source)
    }
}
