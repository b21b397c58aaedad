use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::filter::FilterSelection;
use crate::data::loader::{DataError, DatasetLoader};
use crate::data::model::Dataset;
use crate::data::query::{recompute, ViewModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    loader: DatasetLoader,

    /// Path of the dataset currently shown.
    pub data_path: Option<PathBuf>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Current multi-select filters.
    pub selection: FilterSelection,

    /// Output of the last recompute pass.
    pub view: Option<ViewModel>,

    /// Non-fatal error message shown in the UI.
    pub status_message: Option<String>,

    /// Set when the dataset is missing; nothing else is rendered.
    pub fatal_error: Option<String>,
}

impl AppState {
    /// Load `path` through the cache and show it with cleared filters.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), DataError> {
        let path = path.as_ref();
        match self.loader.load(path) {
            Ok(dataset) => {
                self.data_path = Some(path.to_path_buf());
                self.dataset = Some(dataset);
                self.selection = FilterSelection::default();
                self.status_message = None;
                self.refresh();
                Ok(())
            }
            Err(e @ DataError::DataNotFound(_)) => {
                self.fatal_error = Some(e.to_string());
                Err(e)
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Whether rendering must stop after reporting the fatal error.
    pub fn is_halted(&self) -> bool {
        self.fatal_error.is_some()
    }

    /// Re-run filter → KPIs → aggregates for the current selection.
    pub fn refresh(&mut self) {
        self.view = self
            .dataset
            .as_deref()
            .map(|ds| recompute(ds, &self.selection));
    }

    /// Replace the whole selection and recompute.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.refresh();
    }

    /// Toggle a single country in the filter.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.selection.countries.remove(country) {
            self.selection.countries.insert(country.to_string());
        }
        self.refresh();
    }

    /// Toggle a single category in the filter.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.selection.categories.remove(category) {
            self.selection.categories.insert(category.to_string());
        }
        self.refresh();
    }

    /// Drop the country filter (all countries pass).
    pub fn clear_countries(&mut self) {
        self.selection.countries.clear();
        self.refresh();
    }

    /// Drop the category filter (all categories pass).
    pub fn clear_categories(&mut self) {
        self.selection.categories.clear();
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CSV: &str = "\
personName,country,category,finalWorth
A,US,Tech,100
B,US,Tech,200
C,CN,Finance,50
";

    fn loaded() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(CSV.as_bytes())
            .unwrap();
        let mut state = AppState::default();
        state.open(&path).unwrap();
        (dir, state)
    }

    #[test]
    fn open_computes_unfiltered_view() {
        let (_dir, state) = loaded();
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.kpis.count, 3);
        assert_eq!(view.kpis.total_worth, 350.0);
        assert!(!state.is_halted());
    }

    #[test]
    fn toggles_recompute_immediately() {
        let (_dir, mut state) = loaded();

        state.toggle_country("US");
        assert_eq!(state.view.as_ref().unwrap().kpis.count, 2);

        state.toggle_category("Finance");
        assert_eq!(state.view.as_ref().unwrap().kpis.count, 0);

        state.toggle_country("US");
        assert_eq!(state.view.as_ref().unwrap().kpis.count, 1);

        state.clear_categories();
        assert_eq!(state.view.as_ref().unwrap().kpis.count, 3);
    }

    #[test]
    fn set_selection_replaces_filters() {
        let (_dir, mut state) = loaded();
        state.set_selection(FilterSelection::new(["CN"], ["Finance"]));
        assert_eq!(state.view.as_ref().unwrap().kpis.modal_country, "CN");
        state.clear_countries();
        assert!(state.selection.countries.is_empty());
    }

    #[test]
    fn unparseable_worth_is_counted_but_not_summed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("na.csv");
        std::fs::write(
            &path,
            "personName,country,category,finalWorth\nA,US,Tech,100\nB,US,Tech,N/A\n",
        )
        .unwrap();

        let mut state = AppState::default();
        state.open(&path).unwrap();
        let kpis = &state.view.as_ref().unwrap().kpis;
        assert_eq!(kpis.count, 2);
        assert_eq!(kpis.total_worth, 100.0);
        assert_eq!(kpis.avg_worth, 100.0);
    }

    #[test]
    fn missing_dataset_halts() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        let err = state.open(dir.path().join("missing.csv")).unwrap_err();

        assert!(matches!(err, DataError::DataNotFound(_)));
        assert!(state.is_halted());
        assert!(state.view.is_none());
    }

    #[test]
    fn malformed_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "personName,country\nA,US\n").unwrap();

        let mut state = AppState::default();
        assert!(state.open(&path).is_err());
        assert!(!state.is_halted());
        assert!(state.status_message.is_some());
    }
}
