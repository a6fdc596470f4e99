//! Tests for layered settings loading from an explicit file

use std::fs;

use tempfile::TempDir;

use pokedex::application::ApplicationError;
use pokedex::config::Settings;

fn write_config(temp: &TempDir, content: &str) -> std::path::PathBuf {
    let path = temp.path().join("pokedex.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_config_file_when_loading_then_values_override_defaults() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
max_walk = 7
allow_duplicate_owner_names = true

[fight]
attack_weight = 2.0
"#,
    );

    let settings = Settings::load(Some(path.as_path())).unwrap();

    assert_eq!(settings.max_walk, 7);
    assert!(settings.allow_duplicate_owner_names);
    assert_eq!(settings.fight.attack_weight, 2.0);
    assert_eq!(settings.fight.hp_weight, 1.2);
}

#[test]
fn given_empty_config_file_when_loading_then_defaults() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "");

    let settings = Settings::load(Some(path.as_path())).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_missing_explicit_file_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.toml");

    let err = Settings::load(Some(path.as_path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn given_invalid_value_in_file_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[fight]\nhp_weight = -3.0\n");

    let err = Settings::load(Some(path.as_path())).unwrap_err();

    assert!(err.to_string().contains("fight.hp_weight"));
}

#[test]
fn given_malformed_toml_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "max_walk = = 3");

    assert!(matches!(
        Settings::load(Some(path.as_path())),
        Err(ApplicationError::Config { .. })
    ));
}
