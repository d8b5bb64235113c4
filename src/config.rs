use std::path::PathBuf;

/// Fixed input file, relative to the working directory.
pub const DATA_PATH: &str = "india.csv";

/// Rows shown in the preview table.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

pub const PAGE_TITLE: &str = "India's Data Visualization";

/// Rows listed in the "Top districts" table.
pub const DEFAULT_TOP_N: usize = 5;

/// Startup settings. Nothing is read from the environment or the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    pub data_path: PathBuf,
    pub preview_rows: usize,
    pub page_title: String,
    pub top_n: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_PATH),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            page_title: PAGE_TITLE.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}
