use std::path::{Path, PathBuf};

use crate::config::DashboardConfig;
use crate::data::filter::{FilterRanges, InclusiveRange};
use crate::data::loader::load_file;
use crate::data::model::SurveyDataset;
use crate::report::{ReportView, Selection, build_report};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded once per file; every selection or slider change
/// recomputes `view` synchronously, and frames without changes reuse it.
pub struct AppState {
    pub config: DashboardConfig,

    /// Cleaned dataset (None until a file loads successfully).
    pub dataset: Option<SurveyDataset>,

    /// File the current dataset came from.
    pub data_path: Option<PathBuf>,

    /// Genre and filter ranges chosen in the UI.
    pub selection: Selection,

    /// Report for the current selection (cached).
    pub view: Option<ReportView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            data_path: None,
            selection: Selection::default(),
            view: None,
            status_message: None,
        }
    }

    /// Load and clean `path`. On failure the previous dataset stays in place.
    pub fn load(&mut self, path: &Path) {
        match load_file(path, self.config.variant.cleaning_policy()) {
            Ok(dataset) => {
                self.data_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-read the current file (or the configured one).
    pub fn reload(&mut self) {
        let path = self
            .data_path
            .clone()
            .unwrap_or_else(|| self.config.data_path.clone());
        self.load(&path);
    }

    /// Ingest a newly loaded dataset, reset the filters, and keep the genre
    /// when the new data still has it.
    pub fn set_dataset(&mut self, dataset: SurveyDataset) {
        if dataset.is_empty() {
            log::warn!("No complete rows left after cleaning");
        }
        let keep_genre = self
            .selection
            .genre
            .as_ref()
            .is_some_and(|g| dataset.genres().contains(g));
        if !keep_genre {
            self.selection.genre = dataset.genres().first().cloned();
        }

        self.selection.filters = if self.config.variant.has_filters() {
            let defaults = &self.config.filters;
            let age = match age_slider_bounds(&dataset) {
                Some(bounds) => defaults.age.clamped_to(bounds),
                None => defaults.age,
            };
            Some(FilterRanges {
                age,
                hours_per_day: defaults.hours.clamped_to(defaults.hours_bounds),
            })
        } else {
            None
        };

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute the report from the current dataset and selection.
    pub fn refresh(&mut self) {
        self.view = self
            .dataset
            .as_ref()
            .map(|ds| build_report(ds, &self.selection));
        if let Some(view) = &self.view {
            log::debug!("{}: {}", view.summary.heading(), view.summary.one_line());
        }
    }

    pub fn select_genre(&mut self, genre: &str) {
        if self.selection.genre.as_deref() != Some(genre) {
            self.selection.genre = Some(genre.to_string());
            self.refresh();
        }
    }

    pub fn set_filters(&mut self, filters: FilterRanges) {
        if self.selection.filters != Some(filters) {
            self.selection.filters = Some(filters);
            self.refresh();
        }
    }

    /// Integer age bounds of the loaded data.
    pub fn age_slider_bounds(&self) -> Option<InclusiveRange> {
        self.dataset.as_ref().and_then(age_slider_bounds)
    }
}

fn age_slider_bounds(dataset: &SurveyDataset) -> Option<InclusiveRange> {
    dataset
        .age_bounds()
        .map(|(lo, hi)| InclusiveRange::new(lo.trunc(), hi.trunc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::report::Summary;
    use std::io::Write;

    const SURVEY: &str = "\
Age,Primary streaming service,Hours per day,Fav genre,Anxiety,Depression
16,Spotify,3,Rock,5,3
25,Spotify,2,Rock,7,5
28,YouTube Music,4,Jazz,2,1
45,Pandora,8,Classical,4,2
22,Spotify,,Pop,6,6
";

    fn survey_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SURVEY.as_bytes()).unwrap();
        file
    }

    fn state_for(variant: Variant) -> (AppState, tempfile::NamedTempFile) {
        let file = survey_file();
        let mut state = AppState::new(DashboardConfig {
            variant,
            ..DashboardConfig::default()
        });
        state.load(file.path());
        (state, file)
    }

    #[test]
    fn test_filtered_variant_initial_state() {
        let (state, _file) = state_for(Variant::Filtered);

        // Pop lacks hours and is dropped by the stricter cleaning policy.
        let ds = state.dataset.as_ref().unwrap();
        assert_eq!(ds.genres(), ["Classical", "Jazz", "Rock"].map(String::from));
        assert_eq!(state.selection.genre.as_deref(), Some("Classical"));

        assert_eq!(state.age_slider_bounds(), Some(InclusiveRange::new(16.0, 45.0)));
        let filters = state.selection.filters.unwrap();
        assert_eq!(filters.age, InclusiveRange::new(18.0, 30.0));
        assert_eq!(filters.hours_per_day, InclusiveRange::new(1.0, 5.0));

        // Rock (25) and Jazz (28) pass; the 16- and 45-year-olds do not.
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.visible_rows, 2);
        assert_eq!(
            view.summary,
            Summary::NoData {
                genre: "Classical".to_string()
            }
        );
    }

    #[test]
    fn test_classic_variant_has_no_filters() {
        let (state, _file) = state_for(Variant::Classic);
        let ds = state.dataset.as_ref().unwrap();
        assert_eq!(ds.len(), 5);
        assert_eq!(state.selection.filters, None);
        assert_eq!(state.view.as_ref().unwrap().visible_rows, 5);
    }

    #[test]
    fn test_select_genre_recomputes_view() {
        let (mut state, _file) = state_for(Variant::Classic);
        state.select_genre("Rock");
        let view = state.view.as_ref().unwrap();
        assert_eq!(
            view.summary.one_line(),
            "Avg Anxiety Score: 6.0, Avg Depression Score: 4.0"
        );
    }

    #[test]
    fn test_selector_does_not_shrink_with_filters() {
        let (mut state, _file) = state_for(Variant::Filtered);
        state.set_filters(FilterRanges {
            age: InclusiveRange::new(40.0, 45.0),
            hours_per_day: InclusiveRange::new(0.0, 10.0),
        });

        assert_eq!(state.dataset.as_ref().unwrap().genres().len(), 3);
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.visible_rows, 1);
        assert_eq!(view.anxiety.bars.genres().collect::<Vec<_>>(), vec!["Classical"]);
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let (mut state, _file) = state_for(Variant::Classic);
        let dir = tempfile::tempdir().unwrap();
        state.load(&dir.path().join("missing.csv"));

        assert!(state.dataset.is_some());
        assert!(state.view.is_some());
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("file not found"), "{msg}");
    }

    #[test]
    fn test_reload_keeps_selected_genre() {
        let (mut state, _file) = state_for(Variant::Classic);
        state.select_genre("Jazz");
        state.reload();
        assert_eq!(state.selection.genre.as_deref(), Some("Jazz"));
    }
}
