// tests/integration_test.rs
use std::fs;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_docs-release"))
}

#[test]
fn test_docs_release_help() {
    let output = bin().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("docs-release"));
    for task in ["prepare", "build", "run", "push", "version", "release", "deploy", "live"] {
        assert!(stdout.contains(task), "help should list '{}'", task);
    }
}

#[test]
fn test_docs_release_version_flag() {
    let output = bin().arg("--version").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_bump_kind_is_rejected() {
    let output = bin()
        .args(["version", "--bump=superpatch"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("superpatch"));
}

#[test]
fn test_missing_config_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = bin()
        .args(["live", "nope", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Config file not found"));
}

#[test]
fn test_dry_run_deploy_prints_command_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("server")).unwrap();
    fs::write(
        dir.path().join("server/prod.yaml"),
        "IMAGE: registry/app:old\nPROJECT_NAME: docs\nNAMESPACE: prod\n",
    )
    .unwrap();

    let output = bin()
        .args(["deploy", "prod", "v1.0.0", "--dry-run", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains(
            "kubectl set image deployment/docs docs-server=registry/app:v1.0.0 --namespace=prod"
        ),
        "stdout: {}",
        stdout
    );
    assert!(stdout.contains("dry run, skipped"));
}
