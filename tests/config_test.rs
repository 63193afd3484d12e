// tests/config_test.rs
use docs_release::config::{load_settings, ConfigLoader, Settings, SETTINGS_FILE};
use docs_release::ReleaseError;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("server")).unwrap();
    dir
}

#[test]
fn test_load_release_config_by_name() {
    let dir = project();
    fs::write(
        dir.path().join("server/production.yaml"),
        "IMAGE: gcr.io/docs/server:latest\nPROJECT_NAME: docs\nNAMESPACE: prod\n",
    )
    .unwrap();

    let loader = ConfigLoader::from_settings(dir.path(), &Settings::default());
    let config = loader.load("production").unwrap();
    assert_eq!(config.image, "gcr.io/docs/server:latest");
    assert_eq!(config.project_name.as_deref(), Some("docs"));

    let same = loader.load("production.yaml").unwrap();
    assert_eq!(config, same);
}

#[test]
fn test_load_release_config_absolute_path() {
    let dir = project();
    let path = dir.path().join("elsewhere.yaml");
    fs::write(&path, "IMAGE: registry/app\n").unwrap();

    let loader = ConfigLoader::new("/nonexistent/server");
    let absolute = dir.path().join("elsewhere");
    let config = loader.load(absolute.to_str().unwrap()).unwrap();
    assert_eq!(config.image, "registry/app");
}

#[test]
fn test_missing_release_config() {
    let dir = project();
    let loader = ConfigLoader::from_settings(dir.path(), &Settings::default());

    match loader.load("staging") {
        Err(ReleaseError::ConfigNotFound(path)) => {
            assert_eq!(path, dir.path().join("server/staging.yaml"));
        }
        other => panic!("expected ConfigNotFound, got {:?}", other),
    }
}

#[test]
fn test_invalid_release_config_names_file() {
    let dir = project();
    fs::write(dir.path().join("server/broken.yaml"), "IMAGE: [unterminated\n").unwrap();

    let loader = ConfigLoader::from_settings(dir.path(), &Settings::default());
    let err = loader.load("broken").unwrap_err();
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn test_settings_from_project_root() {
    let dir = project();
    fs::write(
        dir.path().join(SETTINGS_FILE),
        r#"
[paths]
config_dir = "deploy/envs"

[registry]
push_command = ["docker", "push"]

[release]
initial_version = "1.0.0"
"#,
    )
    .unwrap();

    let settings = load_settings(None, dir.path()).unwrap();
    assert_eq!(settings.paths.config_dir, PathBuf::from("deploy/envs"));
    assert_eq!(settings.registry.push_command, vec!["docker", "push"]);
    assert_eq!(settings.release.initial_version, "1.0.0");
    assert_eq!(settings.git.remote, "origin");
}

#[test]
fn test_settings_custom_path_must_exist() {
    let dir = project();
    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        load_settings(Some(missing.as_path()), dir.path()),
        Err(ReleaseError::ConfigNotFound(_))
    ));
}

#[test]
fn test_settings_invalid_values_rejected() {
    let dir = project();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[release]\ninitial_version = \"first\"\n").unwrap();

    let err = load_settings(Some(path.as_path()), dir.path()).unwrap_err();
    assert!(err.to_string().contains("initial_version"));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_settings_fall_back_to_user_config_dir() {
    let dir = project();
    let home_config = tempfile::tempdir().unwrap();
    fs::write(
        home_config.path().join(SETTINGS_FILE),
        "[git]\nremote = \"upstream\"\n",
    )
    .unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", home_config.path());
    let settings = load_settings(None, dir.path());
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(settings.unwrap().git.remote, "upstream");
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_settings_default_when_no_file() {
    let dir = project();
    let empty_config = tempfile::tempdir().unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", empty_config.path());
    let settings = load_settings(None, dir.path());
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(settings.unwrap(), Settings::default());
}
