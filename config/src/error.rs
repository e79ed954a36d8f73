//! Error types for config file loading.
//!
//! Every failure carries the offending path so callers can report it
//! without extra context.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// File missing or unreadable.
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid JSON.
    #[error("invalid JSON in config file '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Top level or a recognized section is not a JSON object.
    #[error("config file '{}': {detail}", path.display())]
    Shape { path: PathBuf, detail: String },
}

impl ConfigFileError {
    /// Path of the file that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } | Self::Shape { path, .. } => path,
        }
    }
}

/// Convenience alias for results with [`ConfigFileError`].
pub type Result<T> = std::result::Result<T, ConfigFileError>;
