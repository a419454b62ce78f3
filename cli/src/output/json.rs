//! JSON output helpers.
//!
//! Provides the machine-readable renderer used by all `--json` code paths and
//! the error-object formatter used when a command fails.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::capability::CapabilityFlags;
use crate::domain::config::FleetSetupConfig;
use crate::output::SetupReport;

/// Renders domain types as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render the resolved agentless capabilities.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_capabilities(&self, flags: &CapabilityFlags) -> Result<()> {
        print_json(flags)
    }

    /// Render a setup run report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_setup(&self, report: &SetupReport) -> Result<()> {
        print_json(report)
    }

    /// Render the current configuration with its file path.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &FleetSetupConfig, path: &std::path::Path) -> Result<()> {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    /// Render the outcome of `config set`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_set(&self, key: &str, value: &str) -> Result<()> {
        print_json(&serde_json::json!({ "success": true, "key": key, "value": value }))
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_json(&serde_json::json!({ "version": version }))
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice; `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
