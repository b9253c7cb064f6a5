//! Error types for fieldmap-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for fieldmap-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fieldmap-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from fieldmap-core or fieldmap-fields
    #[error("Core error: {0}")]
    Core(#[from] fieldmap_core::Error),

    /// A settings file that is not valid TOML
    #[error("Invalid settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Output serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn settings(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Settings {
            path: path.into(),
            source,
        }
    }
}
