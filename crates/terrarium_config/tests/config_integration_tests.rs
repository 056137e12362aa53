//! Integration tests for settings loading and projection.

use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use terrarium_config::{
    inline_vars, project_env, ConfigError, ConfigFile, SettingValue, StackSettings,
};

#[test]
fn test_absent_file_loads_empty() {
    let dir = tempdir().unwrap();

    for name in ["global.tfvars.json", "nested/missing.json", "app.tfvars.json"] {
        let settings = ConfigFile::load(dir.path().join(name)).unwrap();
        assert!(settings.is_empty(), "expected empty settings for {}", name);
    }
}

#[test]
fn test_non_object_top_level_is_malformed() {
    let dir = tempdir().unwrap();

    for (name, body) in [("list.json", "[1, 2]"), ("number.json", "42"), ("string.json", "\"x\"")] {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::Malformed { .. }),
            "{} should be malformed, got {:?}",
            name,
            err
        );
    }
}

#[test]
fn test_invalid_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(ConfigFile::load(&path), Err(ConfigError::Json { .. })));
}

#[test]
fn test_global_file_projects_to_env() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("global.tfvars.json");
    fs::write(
        &path,
        r#"{"region": "us-east-1", "project": "acme", "account_id": 123, "locked": false, "zones": ["a", "b"]}"#,
    )
    .unwrap();

    let env = project_env(&ConfigFile::load(&path).unwrap());

    assert_eq!(env["TF_VAR_region"], "us-east-1");
    assert_eq!(env["TF_VAR_project"], "acme");
    assert_eq!(env["TF_VAR_account_id"], "123");
    assert_eq!(env["TF_VAR_locked"], "0");

    let zones: Value = serde_json::from_str(&env["TF_VAR_zones"]).unwrap();
    assert_eq!(zones, serde_json::json!(["a", "b"]));
}

#[test]
fn test_stack_layers_merge_in_precedence_order() {
    let dir = tempdir().unwrap();
    let stack = &dir.path().join("net");
    fs::create_dir_all(stack).unwrap();
    fs::write(
        stack.join("default.tfvars.json"),
        r#"{"instance_type": "t3.micro", "name": "default-name", "replicas": 1}"#,
    )
    .unwrap();
    fs::write(stack.join("app.tfvars.json"), r#"{"name": "net"}"#).unwrap();
    fs::write(stack.join("staging.tfvars.json"), r#"{"replicas": 3}"#).unwrap();

    let merged = StackSettings::load(stack, "Staging").unwrap();

    assert_eq!(merged.settings.get_string("name").as_deref(), Some("net"));
    assert_eq!(merged.settings.get_string("instance_type").as_deref(), Some("t3.micro"));
    assert_eq!(merged.settings.get_string("replicas").as_deref(), Some("3"));
    assert_eq!(merged.settings.get_string("environment").as_deref(), Some("Staging"));
    assert_eq!(merged.files.len(), 3);
    assert!(merged.files[1].ends_with("app.tfvars.json"));
}

#[test]
fn test_malformed_stack_file_fails_without_partial_merge() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("default.tfvars.json"), r#"{"a": 1}"#).unwrap();
    fs::write(dir.path().join("app.tfvars.json"), "[]").unwrap();

    assert!(StackSettings::load(dir.path(), "staging").is_err());
}

#[test]
fn test_inline_vars_include_environment() {
    let dir = tempdir().unwrap();
    let stack = dir.path().join("net");
    fs::create_dir_all(&stack).unwrap();
    fs::write(stack.join("app.tfvars.json"), r#"{"name": "net", "enabled": true}"#).unwrap();

    let merged = StackSettings::load(&stack, "staging").unwrap();
    let args = inline_vars(&merged.settings);

    assert_eq!(
        args,
        vec!["-var", "enabled=1", "-var", "environment=staging", "-var", "name=net"]
    );
    assert_eq!(merged.settings.get("enabled"), Some(&SettingValue::Bool(true)));
}
