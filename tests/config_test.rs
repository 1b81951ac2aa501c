//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test project-local config merging with defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use digitchain::application::ApplicationError;
use digitchain::config::{local_config_path, OutputFormat, Settings};

#[test]
fn given_no_local_config_when_load_then_uses_defaults_anchored_at_project() {
    // Arrange
    let project = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings.problems_dir, project.path().join("problems"));
    assert!(settings.strict_digits);
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        r#"
problems_dir = "cases"
strict_digits = false
output = "json"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings.problems_dir, project.path().join("cases"));
    assert!(!settings.strict_digits);
    assert_eq!(settings.output, OutputFormat::Json);
}

#[test]
fn given_absolute_problems_dir_when_load_then_kept_as_is() {
    let project = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        format!("problems_dir = {:?}\n", elsewhere.path().display().to_string()),
    )
    .unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings.problems_dir, PathBuf::from(elsewhere.path()));
}

#[test]
fn given_partial_local_config_when_load_then_unspecified_fields_keep_defaults() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "output = \"json\"\n").unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert!(settings.strict_digits);
    assert_eq!(settings.problems_dir, project.path().join("problems"));
}

#[test]
fn given_invalid_local_config_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "strict_digits = \"sometimes\"\n").unwrap();

    let err = Settings::load(Some(project.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".digitchain.toml"));
}

#[test]
fn given_loaded_settings_when_shown_then_toml_contains_all_keys() {
    let project = TempDir::new().unwrap();
    let settings = Settings::load(Some(project.path())).expect("load settings");

    let rendered = settings.to_toml().unwrap();

    assert!(rendered.contains("problems_dir"));
    assert!(rendered.contains("strict_digits = true"));
    assert!(rendered.contains("output = \"text\""));
}
