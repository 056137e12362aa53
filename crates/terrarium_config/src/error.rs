//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading settings files.
///
/// A missing file is not an error; loaders report it as empty settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed configuration in {path}: top-level value must be a JSON object")]
    Malformed { path: PathBuf },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
