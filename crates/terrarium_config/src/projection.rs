//! Projection of settings into the wrapped tool's variable inputs.

use std::collections::BTreeMap;

use crate::value::Settings;

/// Environment prefix terraform reads input variables from.
pub const TF_VAR_PREFIX: &str = "TF_VAR_";

/// Project settings into `TF_VAR_<key>` environment entries.
///
/// The returned map is meant to be attached to a single child invocation.
pub fn project_env(settings: &Settings) -> BTreeMap<String, String> {
    settings
        .iter()
        .map(|(key, value)| (format!("{}{}", TF_VAR_PREFIX, key), value.to_var_string()))
        .collect()
}

/// Project settings into inline `-var key=value` arguments.
pub fn inline_vars(settings: &Settings) -> Vec<String> {
    settings
        .iter()
        .flat_map(|(key, value)| ["-var".to_string(), format!("{}={}", key, value.to_var_string())])
        .collect()
}
