use std::path::PathBuf;

/// Why a dataset could not be loaded. Every variant is fatal to the preview.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The CSV file does not exist.
    #[error("'{}' not found. Please ensure the file exists in the correct directory.", path.display())]
    NotFound { path: PathBuf },

    /// The file has no header row at all.
    #[error("'{}' is empty. Please provide a valid CSV file.", path.display())]
    Empty { path: PathBuf },

    /// The contents are not valid comma-separated tabular data.
    #[error("{source_name}: parse error{}: {message}", line.map(|l| format!(" on line {l}")).unwrap_or_default())]
    Parse {
        source_name: String,
        line: Option<u64>,
        message: String,
    },

    /// Any other I/O failure while reading the file.
    #[error("I/O error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Short category label shown next to the message in the UI.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::NotFound { .. } => "FileNotFound",
            LoadError::Empty { .. } => "EmptyData",
            LoadError::Parse { .. } => "ParseError",
            LoadError::Io { .. } => "IoError",
        }
    }
}
