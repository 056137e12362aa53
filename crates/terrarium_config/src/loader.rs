//! Settings file reading.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::value::Settings;

/// Reader for `*.tfvars.json` settings files.
pub struct ConfigFile;

impl ConfigFile {
    /// Read a settings file.
    ///
    /// Returns `Ok(None)` when the file does not exist. A file that exists
    /// but whose top-level value is not an object is malformed.
    pub fn read(path: impl AsRef<Path>) -> ConfigResult<Option<Settings>> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {:?}", path);
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        println!("using config {}", display_path(path).display());

        let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Object(map) => {
                debug!("Loaded {} settings from {:?}", map.len(), path);
                Ok(Some(Settings::from(map)))
            }
            _ => Err(ConfigError::Malformed {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Read a settings file, treating a missing file as empty settings.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Settings> {
        Ok(Self::read(path)?.unwrap_or_default())
    }

    /// Resolve a settings file path.
    ///
    /// An absolute or existing `path` is used as given. Otherwise `start`
    /// and each of its ancestors are searched for `path`; when nothing is
    /// found `path` is returned unchanged and reads as absent.
    pub fn locate(path: &Path, start: &Path) -> PathBuf {
        if path.is_absolute() || path.exists() {
            return path.to_path_buf();
        }

        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
        match start
            .ancestors()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
        {
            Some(found) => {
                debug!("Found {:?} at {:?}", path, found);
                found
            }
            None => path.to_path_buf(),
        }
    }
}

/// Show `path` relative to the current directory when it lies below it.
pub fn display_path(path: &Path) -> PathBuf {
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_path_buf();
    };
    relative_to(path, &cwd)
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    let absolute: PathBuf = joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    match absolute.strip_prefix(base) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => absolute,
    }
}
