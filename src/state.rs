use census_preview::config::PreviewConfig;
use census_preview::data::{load_csv, Dataset, LoadError};
use census_preview::preview::Preview;
use census_preview::summary::{top_n, Summary, TopEntry, POPULATION_COLUMN};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: PreviewConfig,

    /// Loaded dataset (None if loading failed).
    pub dataset: Option<Dataset>,

    /// First `config.preview_rows` rows.
    pub preview: Option<Preview>,

    /// Every row, built the first time "Show raw data" is ticked.
    raw: Option<Preview>,

    pub summary: Option<Summary>,

    /// Fatal load error shown instead of the table.
    pub error: Option<LoadError>,

    /// Show all rows instead of the preview.
    pub show_raw_data: bool,

    /// Numeric column the "Top districts" table ranks by.
    pub top_column: Option<String>,

    pub top_entries: Vec<TopEntry>,
}

impl AppState {
    /// Read the configured CSV once and derive everything the UI shows.
    pub fn load(config: PreviewConfig) -> Self {
        let mut state = Self {
            config,
            dataset: None,
            preview: None,
            raw: None,
            summary: None,
            error: None,
            show_raw_data: false,
            top_column: None,
            top_entries: Vec::new(),
        };

        match load_csv(&state.config.data_path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                state.error = Some(e);
            }
        }
        state
    }

    /// Ingest a loaded dataset, build the preview and summary.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let summary = Summary::compute(&dataset);

        // Default ranking column: Population if present, else the first numeric one.
        let top_column = summary
            .numeric_columns()
            .find(|c| *c == POPULATION_COLUMN)
            .or_else(|| summary.numeric_columns().next())
            .map(str::to_string);

        self.preview = Some(Preview::head(&dataset, self.config.preview_rows));
        self.raw = None;
        self.summary = Some(summary);
        self.dataset = Some(dataset);
        self.error = None;
        self.top_column = None;
        self.top_entries.clear();

        if let Some(col) = top_column {
            self.set_top_column(col);
        }
    }

    /// Choose the ranking column and recompute the top entries.
    pub fn set_top_column(&mut self, column: String) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match top_n(ds, &column, self.config.top_n) {
            Ok(entries) => {
                self.top_entries = entries;
                self.top_column = Some(column);
            }
            Err(e) => log::warn!("Cannot rank by '{column}': {e}"),
        }
    }

    /// Flip "Show raw data", building the full table on first use.
    pub fn toggle_raw_data(&mut self) {
        self.show_raw_data = !self.show_raw_data;
        if self.show_raw_data && self.raw.is_none() {
            self.raw = self.dataset.as_ref().map(Preview::all);
        }
    }

    /// The table currently on screen.
    pub fn visible_table(&self) -> Option<&Preview> {
        if self.show_raw_data {
            self.raw.as_ref().or(self.preview.as_ref())
        } else {
            self.preview.as_ref()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_for(path: &std::path::Path) -> PreviewConfig {
        PreviewConfig {
            data_path: path.to_path_buf(),
            preview_rows: 2,
            ..PreviewConfig::default()
        }
    }

    #[test]
    fn missing_file_keeps_running_with_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::load(config_for(&dir.path().join("india.csv")));
        assert!(state.dataset.is_none());
        assert!(state.visible_table().is_none());
        assert!(matches!(state.error, Some(LoadError::NotFound { .. })));
    }

    #[test]
    fn loads_preview_and_ranks_by_population() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "District,Population,Literacy_Rate\nA,10,50.0\nB,30,60.0\nC,20,70.0\n"
        )
        .unwrap();

        let mut state = AppState::load(config_for(file.path()));
        assert!(state.error.is_none());
        assert_eq!(state.visible_table().unwrap().rows.len(), 2);
        assert_eq!(state.top_column.as_deref(), Some("Population"));
        assert_eq!(state.top_entries[0].label, "B");

        state.toggle_raw_data();
        assert_eq!(state.visible_table().unwrap().rows.len(), 3);
        state.toggle_raw_data();
        assert_eq!(state.visible_table().unwrap().rows.len(), 2);

        state.set_top_column("Literacy_Rate".to_string());
        assert_eq!(state.top_entries[0].label, "C");

        state.set_top_column("District".to_string());
        assert_eq!(state.top_column.as_deref(), Some("Literacy_Rate"));
    }
}
