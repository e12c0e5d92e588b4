//! Configuration loading and precedence tests

use cul_config::loader::{ENV_COLOR, ENV_SHOW_SUCCESSES, PROJECT_CONFIG_FILE};
use cul_config::{ConfigError, ConfigLoader, ResolvedSuiteConfig};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let config_path = dir.join(PROJECT_CONFIG_FILE);
    fs::write(&config_path, content).unwrap();
    config_path
}

/// Loader whose global config lives inside `home`, never the real home directory
fn loader_in(home: &Path) -> ConfigLoader {
    ConfigLoader::new().with_global_config_path(home.join("config.toml"))
}

fn clear_env() {
    env::remove_var(ENV_SHOW_SUCCESSES);
    env::remove_var(ENV_COLOR);
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
#[serial]
fn test_load_project_config_basic() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[suite]
show_successes = false
"#,
    );

    let config = loader_in(temp_dir.path())
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert!(config.is_project());
    assert_eq!(
        config.suite(),
        ResolvedSuiteConfig {
            show_successes: false,
            color: false,
        }
    );
}

#[test]
#[serial]
fn test_load_when_no_config_exists() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    let config = loader_in(temp_dir.path())
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert!(!config.is_project());
    assert_eq!(config.suite(), ResolvedSuiteConfig::default());
}

#[test]
#[serial]
fn test_load_from_subdirectory_finds_parent() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "[suite]\ncolor = true\n");

    let sub = temp_dir.path().join("sub1").join("sub2");
    fs::create_dir_all(&sub).unwrap();

    let config = loader_in(temp_dir.path()).load_from_directory(&sub).unwrap();

    assert_eq!(config.project_root(), Some(temp_dir.path()));
    assert!(config.suite().color);
}

#[test]
#[serial]
fn test_load_with_empty_config() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let config = loader_in(temp_dir.path())
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert!(config.is_project());
    assert_eq!(config.suite(), ResolvedSuiteConfig::default());
}

#[test]
#[serial]
fn test_invalid_toml_is_reported_with_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[suite\ncolor = ");

    let err = loader_in(temp_dir.path())
        .load_from_directory(temp_dir.path())
        .unwrap_err();

    match err {
        ConfigError::TomlParseError { file, .. } => assert_eq!(file, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
#[serial]
fn test_load_from_missing_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(PROJECT_CONFIG_FILE);

    let err = loader_in(temp_dir.path()).load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

// ============================================================================
// Precedence Tests
// ============================================================================

#[test]
#[serial]
fn test_project_overrides_global() {
    clear_env();
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "[suite]\nshow_successes = false\ncolor = true\n",
    )
    .unwrap();

    let project = TempDir::new().unwrap();
    create_config_file(project.path(), "[suite]\nshow_successes = true\n");

    let config = loader_in(home.path())
        .load_from_directory(project.path())
        .unwrap();

    assert_eq!(
        config.suite(),
        ResolvedSuiteConfig {
            show_successes: true,
            color: true,
        }
    );
}

#[test]
#[serial]
fn test_env_overrides_project() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[suite]\ncolor = false\n");

    env::set_var(ENV_COLOR, "yes");
    let result = loader_in(temp_dir.path()).load_from_file(&path);
    clear_env();

    assert!(result.unwrap().suite().color);
}

#[test]
#[serial]
fn test_invalid_env_value() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    env::set_var(ENV_SHOW_SUCCESSES, "sometimes");
    let result = loader_in(temp_dir.path()).load_from_directory(temp_dir.path());
    clear_env();

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { ref field, .. }) if field == ENV_SHOW_SUCCESSES
    ));
}
