//! Error types for stack operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors raised before or while handing work to terraform.
///
/// A failing terraform run is not an error; its exit code is returned.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("invalid path given: {0}")]
    InvalidStack(PathBuf),

    #[error("unable to configure remote state, '{key}' was not found in {scope} settings")]
    MissingKey { key: String, scope: &'static str },

    #[error("Configuration error: {0}")]
    Config(#[from] terrarium_config::ConfigError),

    #[error("Runner error: {0}")]
    Runner(#[from] terrarium_runner::RunnerError),
}
