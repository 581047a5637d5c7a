use std::path::Path;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::ViewerConfig;
use crate::data::filter::{apply_filter, FilterState, StatusSelection};
use crate::data::loader::load_file;
use crate::data::matrix::{build_matrix, GenreYearMatrix};
use crate::data::model::{Catalog, Record};
use crate::data::projection::{project_points, ScatterPoint};
use crate::data::universe::{derive_universe, Universe};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which derived view fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Scatter,
    Heatmap,
    Records,
}

/// The full UI state, independent of rendering.
///
/// Every derived collection is a snapshot recomputed from the catalog and
/// the current filter, never patched in place.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded catalog (None until user loads a file).
    pub catalog: Option<Catalog>,

    /// Filter options derived once per load.
    pub universe: Universe,

    /// Current selection.
    pub filters: FilterState,

    /// Records passing the current filters.
    pub visible: Arc<[Record]>,

    /// Scatter points of `visible`.
    pub points: Vec<ScatterPoint>,

    /// Heatmap over the catalog filtered by everything except genre.
    pub matrix: GenreYearMatrix,

    /// Base filter `matrix` was built from.
    matrix_filter: Option<FilterState>,

    /// Status → colour for the scatter view.
    pub status_colors: Option<ColorMap>,

    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: ViewerConfig::default(),
            catalog: None,
            universe: Universe::default(),
            filters: FilterState::default(),
            visible: Arc::from(Vec::new()),
            points: Vec::new(),
            matrix: GenreYearMatrix::default(),
            matrix_filter: None,
            status_colors: None,
            view: View::default(),
            status_message: None,
        }
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Load a catalog file, reporting failure in the status line.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} records from {} ({})",
                    catalog.len(),
                    path.display(),
                    catalog.report
                );
                self.set_catalog(catalog);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded catalog, reset filters and recompute every view.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.universe = derive_universe(&catalog.records);
        self.status_colors = Some(ColorMap::new(self.universe.statuses.iter().skip(1)));
        self.filters = FilterState::default();
        self.matrix_filter = None;

        self.catalog = Some(catalog);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered views after a filter change. The matrix is
    /// rebuilt only when its own base filter changed.
    pub fn refilter(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };

        self.visible = apply_filter(&catalog.records, &self.filters).into();
        self.points = project_points(&self.visible).collect();

        let base = self.filters.without_genres();
        if self.matrix_filter.as_ref() != Some(&base) {
            let base_records = apply_filter(&catalog.records, &base);
            self.matrix = build_matrix(&base_records);
            log::debug!(
                "Rebuilt heatmap: {} cells from {} records",
                self.matrix.len(),
                base_records.len()
            );
            self.matrix_filter = Some(base);
        }
    }

    /// Replace the filter with an edited copy and recompute.
    fn update_filters(&mut self, edit: impl FnOnce(&mut FilterState)) {
        let mut next = self.filters.clone();
        edit(&mut next);
        if next != self.filters {
            self.filters = next;
            self.refilter();
        }
    }

    /// Toggle a genre in the conjunctive genre selection.
    pub fn toggle_genre(&mut self, genre: &str) {
        self.update_filters(|f| {
            if !f.genres.remove(genre) {
                f.genres.insert(genre.to_string());
            }
        });
    }

    pub fn set_status(&mut self, status: StatusSelection) {
        self.update_filters(|f| f.status = status);
    }

    /// Toggle an episode bucket in the disjunctive bucket selection.
    pub fn toggle_bucket(&mut self, bucket: &str) {
        self.update_filters(|f| {
            if !f.episode_buckets.remove(bucket) {
                f.episode_buckets.insert(bucket.to_string());
            }
        });
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.update_filters(|f| f.year = year);
    }

    /// Clear every filter dimension.
    pub fn reset_filters(&mut self) {
        self.update_filters(|f| *f = FilterState::default());
    }
}
