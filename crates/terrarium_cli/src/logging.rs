//! Logging setup.
//!
//! Human-readable logs go to stderr, filtered by `TERRARIUM_LOG`. Commands
//! that run inside a workspace also append DEBUG-level logs to a fixed file
//! in the current directory.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Debug log written by workspaced commands.
pub const DEBUG_LOG_FILE: &str = "terrarium.log";

/// Environment variable holding the stderr filter directives.
pub const LOG_ENV: &str = "TERRARIUM_LOG";

const DEFAULT_DIRECTIVES: &str = "warn,terrarium=info";

/// Install the global subscriber, optionally with a debug log file.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let (file_layer, file_error) = match log_file.map(open_log_file).transpose() {
        Ok(file) => (
            file.map(|file| {
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(LevelFilter::DEBUG)
            }),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    // Already initialized (e.g. in tests) is fine.
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    match file_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
