use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use tenant_spinner::testkit::config::simulated_toml;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

fn spinner(config: &PathBuf) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tenant-spinner"));
    cmd.env_remove("RUST_LOG")
        .env_remove("TENANT_SPINNER_IMAGE")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn tenant_create_prints_namespace() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &simulated_toml(false));

    spinner(&config)
        .args(["tenant", "create", "acme", "--name", "Acme Corporation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tenant-acme"));
}

#[test]
fn instance_create_emits_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &simulated_toml(false));

    let output = spinner(&config)
        .args(["--json", "instance", "create", "acme", "web"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .find(|line| line.contains("\"instance.create\""))
        .expect("instance.create line");
    let value: serde_json::Value = serde_json::from_str(line).unwrap();

    assert_eq!(value["instance"]["id"], "web");
    assert_eq!(value["instance"]["name"], "instance-web");
    assert_eq!(value["instance"]["namespace"], "tenant-acme");
    assert_eq!(value["instance"]["status"], "creating");
}

#[test]
fn demo_runs_against_simulated_backend() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &simulated_toml(true));

    spinner(&config)
        .args(["demo", "--wait-secs", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("instance-instance-1"))
        .stdout(predicate::str::contains("running"));
}

#[test]
fn invalid_identifier_fails_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &simulated_toml(false));

    spinner(&config)
        .args(["tenant", "create", "Not_Valid", "--name", "Bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tenant_spinner::input"));
}

#[test]
fn leading_dash_identifier_is_rejected_before_the_cluster() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &simulated_toml(false));

    spinner(&config)
        .args(["tenant", "create", "--name", "Bad", "--", "-acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tenant_spinner::input"))
        .stderr(predicate::str::contains("must start with a letter or digit"));
}

#[test]
fn quiet_suppresses_regular_output() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &simulated_toml(false));

    spinner(&config)
        .args(["--quiet", "tenant", "create", "acme", "--name", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn unknown_tenant_get_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &simulated_toml(false));

    spinner(&config)
        .args(["tenant", "get", "acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tenant not found"));
}

#[test]
fn config_validate_rejects_bad_pull_policy() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "[workload]\nimage_pull_policy = \"Sometimes\"\n");

    spinner(&config)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("image_pull_policy"));
}

#[test]
fn config_validate_requires_existing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    spinner(&missing)
        .args(["config", "validate"])
        .assert()
        .failure();
}

#[test]
fn config_show_reports_backend() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &simulated_toml(false));

    spinner(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("simulated"))
        .stdout(predicate::str::contains("tenant-app:latest"));
}
