//! Error types for the runner module.

use thiserror::Error;

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors that can occur while launching the wrapped tool.
///
/// A non-zero exit code is not an error here; it is reported through
/// [`crate::ExecutionResult::exit_code`].
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Binary not found: {0}")]
    BinaryNotFound(String),

    #[error("Failed to spawn {binary}: {source}")]
    SpawnFailed {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process execution failed: {0}")]
    ExecutionFailed(String),
}
