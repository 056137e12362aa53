//! # terrarium_config
//!
//! Layered `*.tfvars.json` configuration for terrarium.
//!
//! Settings come from three places: a global file (projected into the
//! child environment as `TF_VAR_*`), and per-stack `default.tfvars.json`,
//! `app.tfvars.json` and `<environment>.tfvars.json` files (passed inline as
//! `-var` arguments).
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use terrarium_config::{project_env, ConfigFile, StackSettings, GLOBAL_CONFIG_FILE};
//!
//! let global = ConfigFile::load(GLOBAL_CONFIG_FILE).unwrap();
//! let env = project_env(&global);
//!
//! let stack = StackSettings::load(Path::new("stacks/network"), "staging").unwrap();
//! assert_eq!(stack.settings.get_string("environment").as_deref(), Some("staging"));
//! ```

pub mod error;
pub mod layers;
pub mod loader;
pub mod projection;
pub mod value;

pub use error::{ConfigError, ConfigResult};
pub use layers::StackSettings;
pub use loader::{display_path, ConfigFile};
pub use projection::{inline_vars, project_env, TF_VAR_PREFIX};
pub use value::{SettingValue, Settings};

/// Default name of the global settings file.
pub const GLOBAL_CONFIG_FILE: &str = "global.tfvars.json";

/// Per-stack application settings.
pub const APP_CONFIG_FILE: &str = "app.tfvars.json";

/// Per-stack defaults shared by every environment.
pub const DEFAULT_CONFIG_FILE: &str = "default.tfvars.json";
