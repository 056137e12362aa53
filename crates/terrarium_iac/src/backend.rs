//! Remote state backend configuration.
//!
//! State lives in an S3 bucket with a DynamoDB lock table. Names are derived
//! from the global settings (`region`, `project`, `account_id`) and the
//! stack's app settings (`name`) unless overridden on the command line:
//!
//! - bucket: `{project}-tf-{account_id}-{region}`
//! - lock table: `{project}-terraform-lock`
//! - state key: `{name}.tfstate`
//!
//! Without a `region` setting the region comes from `AWS_REGION`, then
//! `AWS_DEFAULT_REGION`. A null or empty setting counts as missing.

use terrarium_config::{SettingValue, Settings};

use crate::error::{IacError, IacResult};

/// Environment variables consulted, in order, when no region is configured.
pub const REGION_ENV_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

/// Values that replace the derived backend settings.
#[derive(Debug, Clone)]
pub struct BackendOverrides {
    pub region: Option<String>,
    pub bucket: Option<String>,
    pub lock_table: Option<String>,
    pub key: Option<String>,
    /// Configure a lock table at all
    pub state_lock: bool,
}

impl Default for BackendOverrides {
    fn default() -> Self {
        Self {
            region: None,
            bucket: None,
            lock_table: None,
            key: None,
            state_lock: true,
        }
    }
}

/// Resolved backend settings for `terraform init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub region: String,
    /// `None` when state locking is disabled
    pub dynamodb_table: Option<String>,
    pub bucket: String,
    pub key: String,
}

impl BackendConfig {
    /// Derive the backend settings, failing on the first missing key.
    pub fn derive(
        global: &Settings,
        app: &Settings,
        overrides: &BackendOverrides,
    ) -> IacResult<Self> {
        Self::derive_with_env(global, app, overrides, |name| std::env::var(name).ok())
    }

    /// Like [`BackendConfig::derive`], reading the region fallback through
    /// `env` instead of the process environment.
    pub fn derive_with_env<F>(
        global: &Settings,
        app: &Settings,
        overrides: &BackendOverrides,
        env: F,
    ) -> IacResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = match &overrides.region {
            Some(region) => region.clone(),
            None => lookup(global, "region")
                .or_else(|| {
                    REGION_ENV_VARS
                        .iter()
                        .filter_map(|name| env(name))
                        .find(|value| !value.is_empty())
                })
                .ok_or_else(|| missing("region", "global"))?,
        };

        let dynamodb_table = match (&overrides.lock_table, overrides.state_lock) {
            (_, false) => None,
            (Some(table), true) => Some(table.clone()),
            (None, true) => Some(format!(
                "{}-terraform-lock",
                require(global, "project", "global")?
            )),
        };

        let bucket = match &overrides.bucket {
            Some(bucket) => bucket.clone(),
            None => format!(
                "{}-tf-{}-{}",
                require(global, "project", "global")?,
                require(global, "account_id", "global")?,
                region
            ),
        };

        let key = match &overrides.key {
            Some(key) => key.clone(),
            None => format!("{}.tfstate", require(app, "name", "app")?),
        };

        Ok(Self {
            region,
            dynamodb_table,
            bucket,
            key,
        })
    }

    /// Render as `key=value` pairs for `-backend-config`.
    pub fn to_pairs(&self) -> Vec<String> {
        let mut pairs = vec![format!("region={}", self.region)];
        if let Some(table) = &self.dynamodb_table {
            pairs.push(format!("dynamodb_table={}", table));
        }
        pairs.push(format!("bucket={}", self.bucket));
        pairs.push(format!("key={}", self.key));
        pairs
    }
}

/// A setting's rendered value, treating null and empty as absent.
fn lookup(settings: &Settings, key: &str) -> Option<String> {
    match settings.get(key) {
        None | Some(SettingValue::Null) => None,
        Some(value) => Some(value.to_var_string()).filter(|v| !v.is_empty()),
    }
}

fn require(settings: &Settings, key: &str, scope: &'static str) -> IacResult<String> {
    lookup(settings, key).ok_or_else(|| missing(key, scope))
}

fn missing(key: &str, scope: &'static str) -> IacError {
    IacError::MissingKey {
        key: key.to_string(),
        scope,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> Settings {
        [("region", "us-east-1"), ("project", "acme"), ("account_id", "123")]
            .into_iter()
            .collect()
    }

    fn app() -> Settings {
        [("name", "net")].into_iter().collect()
    }

    #[test]
    fn test_derived_names() {
        let config = BackendConfig::derive(&global(), &app(), &BackendOverrides::default()).unwrap();

        assert_eq!(
            config.to_pairs(),
            vec![
                "region=us-east-1",
                "dynamodb_table=acme-terraform-lock",
                "bucket=acme-tf-123-us-east-1",
                "key=net.tfstate",
            ]
        );
    }

    #[test]
    fn test_numeric_account_id() {
        let mut global = global();
        global.insert("account_id", SettingValue::Number(123456789012u64.into()));

        let config = BackendConfig::derive(&global, &app(), &BackendOverrides::default()).unwrap();
        assert_eq!(config.bucket, "acme-tf-123456789012-us-east-1");
    }

    #[test]
    fn test_missing_global_key() {
        let mut partial: Settings = [("region", "us-east-1")].into_iter().collect();
        partial.insert("account_id", "123");

        let err = BackendConfig::derive(&partial, &app(), &BackendOverrides::default()).unwrap_err();
        assert!(matches!(err, IacError::MissingKey { ref key, scope: "global" } if key == "project"));
    }

    #[test]
    fn test_missing_app_name() {
        let err =
            BackendConfig::derive(&global(), &Settings::new(), &BackendOverrides::default())
                .unwrap_err();
        assert!(matches!(err, IacError::MissingKey { ref key, scope: "app" } if key == "name"));
    }

    #[test]
    fn test_overrides_replace_derivation() {
        let overrides = BackendOverrides {
            region: Some("eu-central-1".to_string()),
            bucket: Some("shared-state".to_string()),
            lock_table: Some("shared-lock".to_string()),
            key: Some("network/main.tfstate".to_string()),
            state_lock: true,
        };

        let config = BackendConfig::derive(&Settings::new(), &Settings::new(), &overrides).unwrap();

        assert_eq!(config.region, "eu-central-1");
        assert_eq!(config.bucket, "shared-state");
        assert_eq!(config.dynamodb_table.as_deref(), Some("shared-lock"));
        assert_eq!(config.key, "network/main.tfstate");
    }

    #[test]
    fn test_region_override_feeds_bucket_name() {
        let overrides = BackendOverrides {
            region: Some("eu-west-1".to_string()),
            ..Default::default()
        };

        let config = BackendConfig::derive(&global(), &app(), &overrides).unwrap();
        assert_eq!(config.bucket, "acme-tf-123-eu-west-1");
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_region_falls_back_to_aws_region() {
        let mut global = global();
        global.insert("region", SettingValue::Null);
        let env = |name: &str| match name {
            "AWS_REGION" => Some("eu-west-1".to_string()),
            "AWS_DEFAULT_REGION" => Some("us-west-2".to_string()),
            _ => None,
        };

        let config =
            BackendConfig::derive_with_env(&global, &app(), &BackendOverrides::default(), env)
                .unwrap();

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.bucket, "acme-tf-123-eu-west-1");
    }

    #[test]
    fn test_region_falls_back_to_aws_default_region() {
        let global: Settings = [("project", "acme"), ("account_id", "123")].into_iter().collect();
        let env = |name: &str| match name {
            "AWS_REGION" => Some(String::new()),
            "AWS_DEFAULT_REGION" => Some("us-west-2".to_string()),
            _ => None,
        };

        let config =
            BackendConfig::derive_with_env(&global, &app(), &BackendOverrides::default(), env)
                .unwrap();
        assert_eq!(config.region, "us-west-2");
    }

    #[test]
    fn test_configured_region_beats_environment() {
        let env = |_: &str| Some("ap-south-1".to_string());

        let config =
            BackendConfig::derive_with_env(&global(), &app(), &BackendOverrides::default(), env)
                .unwrap();
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_missing_region_everywhere() {
        let global: Settings = [("project", "acme"), ("account_id", "123")].into_iter().collect();

        let err =
            BackendConfig::derive_with_env(&global, &app(), &BackendOverrides::default(), no_env)
                .unwrap_err();
        assert!(matches!(err, IacError::MissingKey { ref key, scope: "global" } if key == "region"));
    }

    #[test]
    fn test_null_and_empty_values_count_as_missing() {
        let mut global = global();
        global.insert("account_id", SettingValue::Null);
        let err =
            BackendConfig::derive_with_env(&global, &app(), &BackendOverrides::default(), no_env)
                .unwrap_err();
        assert!(
            matches!(err, IacError::MissingKey { ref key, scope: "global" } if key == "account_id")
        );

        let mut global = self::global();
        global.insert("project", "");
        let err =
            BackendConfig::derive_with_env(&global, &app(), &BackendOverrides::default(), no_env)
                .unwrap_err();
        assert!(matches!(err, IacError::MissingKey { ref key, .. } if key == "project"));
    }

    #[test]
    fn test_state_lock_disabled_drops_lock_table() {
        let overrides = BackendOverrides {
            state_lock: false,
            lock_table: Some("ignored".to_string()),
            ..Default::default()
        };

        let config = BackendConfig::derive_with_env(&global(), &app(), &overrides, no_env).unwrap();

        assert_eq!(config.dynamodb_table, None);
        assert_eq!(
            config.to_pairs(),
            vec!["region=us-east-1", "bucket=acme-tf-123-us-east-1", "key=net.tfstate"]
        );
    }
}
