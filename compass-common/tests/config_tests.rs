//! Tests for TOML loading and root folder resolution
//!
//! Tests that manipulate environment variables are marked with #[serial]
//! so they do not race each other.

use compass_common::config::{
    database_path, ensure_root_folder, load_toml_config, parse_toml_config, resolve_root_folder,
    TomlConfig,
};
use serial_test::serial;
use std::path::{Path, PathBuf};

const TEST_ENV: &str = "COMPASS_TEST_ROOT_FOLDER";

#[test]
fn test_parse_full_config() {
    let config = parse_toml_config(
        r#"
        root_folder = "/srv/compass"
        port = 8080
        questions_path = "/srv/compass/questions.csv"

        [logging]
        level = "debug"

        [model]
        base_url = "http://gpu-box:11434"
        name = "llama3:8b"
        requests_per_second = 2
        timeout_secs = 90
        "#,
    )
    .unwrap();

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/compass")));
    assert_eq!(config.port, Some(8080));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.model.base_url.as_deref(), Some("http://gpu-box:11434"));
    assert_eq!(config.model.name.as_deref(), Some("llama3:8b"));
    assert_eq!(config.model.requests_per_second, Some(2));
    assert_eq!(config.model.timeout_secs, Some(90));
}

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config = parse_toml_config("").unwrap();
    assert!(config.root_folder.is_none());
    assert!(config.port.is_none());
    assert_eq!(config.logging.level, "info");
    assert!(config.model.base_url.is_none());
    assert!(config.model.timeout_secs.is_none());
}

#[test]
fn test_load_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_toml_config(Some(&dir.path().join("nope.toml")));
    assert!(result.is_err());
}

#[test]
fn test_load_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 9000\n[model]\nname = \"gemma3:4b\"\n").unwrap();

    let config = load_toml_config(Some(&path)).unwrap();
    assert_eq!(config.port, Some(9000));
    assert_eq!(config.model.name.as_deref(), Some("gemma3:4b"));
}

#[test]
fn test_load_rejects_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    assert!(load_toml_config(Some(&path)).is_err());
}

#[test]
#[serial]
fn test_cli_overrides_env_and_toml() {
    std::env::set_var(TEST_ENV, "/from/env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };

    let resolved = resolve_root_folder(Some(Path::new("/from/cli")), TEST_ENV, &toml);
    assert_eq!(resolved, PathBuf::from("/from/cli"));

    std::env::remove_var(TEST_ENV);
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    std::env::set_var(TEST_ENV, "/from/env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };

    let resolved = resolve_root_folder(None, TEST_ENV, &toml);
    assert_eq!(resolved, PathBuf::from("/from/env"));

    std::env::remove_var(TEST_ENV);
}

#[test]
#[serial]
fn test_toml_then_default() {
    std::env::remove_var(TEST_ENV);
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };
    assert_eq!(
        resolve_root_folder(None, TEST_ENV, &toml),
        PathBuf::from("/from/toml")
    );

    let fallback = resolve_root_folder(None, TEST_ENV, &TomlConfig::default());
    assert!(fallback.to_string_lossy().contains("political"));
}

#[test]
fn test_ensure_root_folder_and_database_path() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("root");

    ensure_root_folder(&root).unwrap();
    assert!(root.is_dir());
    assert_eq!(database_path(&root), root.join("political-compass.db"));
}
