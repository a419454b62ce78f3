//! Integration tests for `fleet-setup capabilities`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fleet_setup() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fleet-setup"))
}

fn config(yaml: &str) -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, yaml).expect("write config");
    (dir, path.to_string_lossy().into_owned())
}

fn capabilities_json(path: &str) -> serde_json::Value {
    let output = fleet_setup()
        .args(["capabilities", "--json"])
        .env("FLEET_SETUP_CONFIG", path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_capabilities_default_config_all_disabled() {
    let (_dir, path) = config("");
    let json = capabilities_json(&path);
    assert_eq!(json["is_agentless_enabled"], false);
    assert_eq!(json["is_agentless_api_enabled"], false);
    assert_eq!(json["is_default_agentless_policy_enabled"], false);
}

#[test]
fn test_capabilities_cloud_with_api() {
    let (_dir, path) = config(
        "features:\n  agentless: true\nagentless:\n  enabled: true\n  api:\n    url: https://agentless.example\ncloud:\n  is_cloud_enabled: true\n",
    );
    let json = capabilities_json(&path);
    assert_eq!(json["is_agentless_enabled"], true);
    assert_eq!(json["is_agentless_api_enabled"], true);
    assert_eq!(json["is_default_agentless_policy_enabled"], false);
}

#[test]
fn test_capabilities_serverless() {
    let (_dir, path) = config(
        "features:\n  agentless: true\nagentless:\n  enabled: true\ncloud:\n  is_serverless_enabled: true\n",
    );
    let json = capabilities_json(&path);
    assert_eq!(json["is_agentless_enabled"], true);
    assert_eq!(json["is_default_agentless_policy_enabled"], true);
}

#[test]
fn test_capabilities_human_output() {
    let (_dir, path) = config("");
    fleet_setup()
        .args(["capabilities", "--no-color"])
        .env("FLEET_SETUP_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("agentless enabled"));
}

#[test]
fn test_capabilities_malformed_config_fails() {
    let (_dir, path) = config("features: [not, a, map\n");
    fleet_setup()
        .arg("capabilities")
        .env("FLEET_SETUP_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}
