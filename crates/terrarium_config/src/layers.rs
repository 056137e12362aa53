//! Per-stack settings layering.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::ConfigResult;
use crate::loader::ConfigFile;
use crate::value::Settings;
use crate::{APP_CONFIG_FILE, DEFAULT_CONFIG_FILE};

/// Merged variables for one stack in one environment.
#[derive(Debug, Clone, Default)]
pub struct StackSettings {
    /// Merged settings, including the `environment` key
    pub settings: Settings,
    /// Files that contributed, in merge order
    pub files: Vec<PathBuf>,
}

impl StackSettings {
    /// Merge the stack's settings files for `environment`.
    ///
    /// Order, lowest precedence first: `<environment>.tfvars.json` in the
    /// stack's parent directory, then `default.tfvars.json`,
    /// `app.tfvars.json` and `<environment>.tfvars.json` in the stack, then
    /// the `environment` key itself.
    pub fn load(stack: &Path, environment: &str) -> ConfigResult<Self> {
        let env_file = format!("{}.tfvars.json", environment.to_lowercase());
        let mut merged = Self::default();

        let layers = [
            parent_dir(stack).join(&env_file),
            stack.join(DEFAULT_CONFIG_FILE),
            stack.join(APP_CONFIG_FILE),
            stack.join(&env_file),
        ];

        for path in layers {
            if let Some(layer) = ConfigFile::read(&path)? {
                merged.settings.merge(layer);
                merged.files.push(path);
            }
        }

        merged.settings.insert("environment", environment);
        debug!(
            "Merged {} settings from {} files for {:?}",
            merged.settings.len(),
            merged.files.len(),
            stack
        );

        Ok(merged)
    }
}

/// Directory holding the stack, `..` when the path does not name one.
fn parent_dir(stack: &Path) -> PathBuf {
    match (stack.components().next_back(), stack.parent()) {
        (Some(Component::Normal(_)), Some(parent)) => parent.to_path_buf(),
        _ => stack.join(".."),
    }
}
