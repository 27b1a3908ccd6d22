use crate::desktop_entry::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("No file/folder specified")]
    NoTarget,
    #[error("Failed to load contents from \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("The file \"{path}\" contains no data")]
    NoData { path: String },
    #[error("Failed to parse contents of \"{path}\": {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },
    #[error("File \"{path}\" has no type key")]
    MissingType { path: String },
    #[error("Unsupported desktop file type \"{value}\"")]
    UnsupportedType { value: String },
    #[error("failed to write {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("terminal error: {0}")]
    Terminal(String),
}

impl EditorError {
    /// Errors raised while loading or classifying the file, before any dialog is shown.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::NoData { .. }
                | Self::Parse { .. }
                | Self::MissingType { .. }
                | Self::UnsupportedType { .. }
        )
    }
}
