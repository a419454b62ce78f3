//! Integration tests for `fleet-setup setup`.
//!
//! Each test writes its own config and package descriptors to a temp dir and
//! points `FLEET_SETUP_CONFIG` at it.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const CLOUD: &str = "features:\n  agentless: true\nagentless:\n  enabled: true\n  api:\n    url: https://agentless.example\ncloud:\n  is_cloud_enabled: true\n";
const SERVERLESS: &str =
    "features:\n  agentless: true\nagentless:\n  enabled: true\ncloud:\n  is_serverless_enabled: true\n";

const CSPM_PACKAGE: &str = r"
name: cloud_security_posture
version: 1.9.0
policy_templates:
  - name: cspm
    deployment_modes:
      default:
        enabled: true
      agentless:
        enabled: true
        organization: security
        division: cloud
        team: posture
  - name: kspm
";

const AGENTLESS_ONLY_PACKAGE: &str = r#"{
  "name": "cloud_asset_inventory",
  "policy_templates": [
    {"name": "asset_inventory", "deployment_modes": {"default": {"enabled": false}, "agentless": {"enabled": true}}}
  ]
}"#;

fn fleet_setup() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fleet-setup"))
}

struct Fixture {
    dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new(config_yaml: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = dir.path().join("config.yaml");
        std::fs::write(&config, config_yaml).expect("write config");
        Self { dir, config }
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = fleet_setup();
        cmd.env("FLEET_SETUP_CONFIG", &self.config)
            .env_remove("FLEET_SETUP_API_KEY");
        cmd
    }

    fn setup_json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .arg("setup")
            .args(args)
            .arg("--json")
            .output()
            .unwrap();
        assert!(output.status.success(), "{output:?}");
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn callbacks(report: &Value) -> Vec<&str> {
    report["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["callback"].as_str().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Switching
// ---------------------------------------------------------------------------

#[test]
fn test_select_agentless_on_cloud() {
    let fx = Fixture::new(CLOUD);
    let report = fx.setup_json(&["--policy-name", "cspm-1", "--select", "agentless"]);

    assert_eq!(report["initial"]["selected_setup_technology"], "agent_based");
    assert_eq!(report["final"]["selected_setup_technology"], "agentless");
    assert_eq!(
        callbacks(&report),
        ["set_new_agent_policy", "set_selected_policy_tab"]
    );
    assert_eq!(report["events"][1]["tab"], "existing");
    assert_eq!(report["agent_policy"]["name"], "Agentless policy for cspm-1");
    assert_eq!(report["agent_policy"]["supports_agentless"], true);
    assert!(report["agentless_policy_id"].is_null());
}

#[test]
fn test_select_agentless_attaches_template_tags() {
    let fx = Fixture::new(CLOUD);
    let pkg = fx.file("cspm.yaml", CSPM_PACKAGE);
    let report = fx.setup_json(&[
        "--policy-name",
        "cspm-1",
        "--package-info",
        path_arg(&pkg),
        "--select",
        "agentless",
        "--template",
        "cspm",
    ]);

    let tags = report["agent_policy"]["global_data_tags"].as_array().unwrap();
    let pairs: Vec<(&str, &str)> = tags
        .iter()
        .map(|t| (t["name"].as_str().unwrap(), t["value"].as_str().unwrap()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("organization", "security"),
            ("division", "cloud"),
            ("team", "posture")
        ]
    );
}

#[test]
fn test_unknown_template_omits_tags() {
    let fx = Fixture::new(CLOUD);
    let pkg = fx.file("cspm.yaml", CSPM_PACKAGE);
    let report = fx.setup_json(&[
        "--policy-name",
        "cspm-1",
        "--package-info",
        path_arg(&pkg),
        "--select",
        "agentless",
        "--template",
        "kspm",
    ]);
    assert!(report["agent_policy"].get("global_data_tags").is_none());
}

#[test]
fn test_select_agentless_then_rename() {
    let fx = Fixture::new(CLOUD);
    let report = fx.setup_json(&[
        "--policy-name",
        "endpoint-1",
        "--select",
        "agentless",
        "--rename",
        "endpoint-2",
    ]);
    assert_eq!(
        callbacks(&report),
        [
            "set_new_agent_policy",
            "set_selected_policy_tab",
            "set_new_agent_policy"
        ]
    );
    assert_eq!(report["agent_policy"]["name"], "Agentless policy for endpoint-2");
}

#[test]
fn test_select_is_noop_when_agentless_disabled() {
    let fx = Fixture::new("");
    let report = fx.setup_json(&["--policy-name", "cspm-1", "--select", "agentless"]);
    assert_eq!(report["final"]["selected_setup_technology"], "agent_based");
    assert!(report["events"].as_array().unwrap().is_empty());
    assert!(report["agent_policy"].is_null());
}

#[test]
fn test_select_agent_based_from_agentless_only_package() {
    let fx = Fixture::new(CLOUD);
    let pkg = fx.file("inventory.json", AGENTLESS_ONLY_PACKAGE);
    let report = fx.setup_json(&[
        "--policy-name",
        "inventory-1",
        "--package-info",
        path_arg(&pkg),
        "--select",
        "agent-based",
    ]);
    assert_eq!(report["initial"]["selected_setup_technology"], "agentless");
    assert_eq!(report["final"]["selected_setup_technology"], "agent_based");
    assert_eq!(report["events"][1]["tab"], "new");
    assert_eq!(report["agent_policy"]["name"], "Agent policy 1");
}

// ---------------------------------------------------------------------------
// Initial selection
// ---------------------------------------------------------------------------

#[test]
fn test_edit_with_agentless_policy_starts_agentless() {
    let fx = Fixture::new(CLOUD);
    let pkg = fx.file("cspm.yaml", CSPM_PACKAGE);
    let report = fx.setup_json(&[
        "--policy-name",
        "cspm-1",
        "--package-info",
        path_arg(&pkg),
        "--edit",
        "--agent-policy",
        "p1",
        "--agent-policy",
        "p2:agentless",
    ]);
    assert_eq!(report["initial"]["selected_setup_technology"], "agentless");
}

#[test]
fn test_edit_without_agentless_policy_starts_agent_based() {
    let fx = Fixture::new(CLOUD);
    let report = fx.setup_json(&["--policy-name", "cspm-1", "--edit", "--agent-policy", "p1"]);
    assert_eq!(report["initial"]["selected_setup_technology"], "agent_based");
}

// ---------------------------------------------------------------------------
// Serverless lookup
// ---------------------------------------------------------------------------

#[test]
fn test_serverless_without_fleet_url_degrades() {
    let fx = Fixture::new(SERVERLESS);
    let report = fx.setup_json(&["--policy-name", "cspm-1", "--select", "agentless"]);
    assert_eq!(report["initial"]["is_default_agentless_policy_enabled"], true);
    assert!(report["agentless_policy_id"].is_null());
    assert!(!callbacks(&report).contains(&"update_agent_policies"));
    assert_eq!(report["final"]["selected_setup_technology"], "agentless");
}

#[test]
fn test_serverless_unreachable_fleet_degrades() {
    let config = format!("{SERVERLESS}fleet:\n  url: http://127.0.0.1:9\n");
    let fx = Fixture::new(&config);
    let report = fx.setup_json(&["--policy-name", "cspm-1", "--select", "agentless"]);
    assert!(report["agentless_policy_id"].is_null());
    assert!(!callbacks(&report).contains(&"update_agent_policies"));
}

// ---------------------------------------------------------------------------
// Argument errors and human output
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_agent_policy_ref_fails() {
    let fx = Fixture::new(CLOUD);
    fx.cmd()
        .args(["setup", "--policy-name", "cspm-1", "--agent-policy", "p1:hosted"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("p1:hosted"));
}

#[test]
fn test_unknown_setup_technology_fails() {
    let fx = Fixture::new(CLOUD);
    fx.cmd()
        .args(["setup", "--policy-name", "cspm-1", "--select", "agent_based"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("agent-based"))
        .stderr(predicate::str::contains("agentless"));
}

#[test]
fn test_empty_policy_name_fails() {
    let fx = Fixture::new(CLOUD);
    fx.cmd()
        .args(["setup", "--policy-name", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("policy name"));
}

#[test]
fn test_missing_package_info_fails() {
    let fx = Fixture::new(CLOUD);
    fx.cmd()
        .args([
            "setup",
            "--policy-name",
            "cspm-1",
            "--package-info",
            "/nonexistent/package.yaml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_human_output_lists_callbacks() {
    let fx = Fixture::new(CLOUD);
    fx.cmd()
        .args([
            "setup",
            "--policy-name",
            "cspm-1",
            "--select",
            "agentless",
            "--no-color",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected setup technology:"))
        .stdout(predicate::str::contains("Agentless policy for cspm-1"))
        .stdout(predicate::str::contains("select policy tab 'existing'"));
}

#[test]
fn test_human_output_warns_when_shared_policy_missing() {
    let fx = Fixture::new(SERVERLESS);
    fx.cmd()
        .args([
            "setup",
            "--policy-name",
            "cspm-1",
            "--select",
            "agentless",
            "--no-color",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shared agentless policy not found"));
}

#[test]
fn test_human_output_agent_based_has_no_shared_policy_warning() {
    let fx = Fixture::new(SERVERLESS);
    fx.cmd()
        .args(["setup", "--policy-name", "cspm-1", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shared agentless policy").not());
}
