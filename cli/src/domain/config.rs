//! Domain types and validators for fleet-setup configuration.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::capability::{AgentlessApiConfig, AgentlessConfig, CloudContext, ExperimentalFeatures};
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "features.agentless",
    "agentless.enabled",
    "agentless.api.url",
    "cloud.is_cloud_enabled",
    "cloud.is_serverless_enabled",
    "fleet.url",
];

const BOOLEAN_KEYS: &[&str] = &[
    "features.agentless",
    "agentless.enabled",
    "cloud.is_cloud_enabled",
    "cloud.is_serverless_enabled",
];

const URL_KEYS: &[&str] = &["agentless.api.url", "fleet.url"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.fleet-setup/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FleetSetupConfig {
    /// Experimental feature flags.
    pub features: ExperimentalFeatures,
    /// Agentless deployment settings; absent means agentless is off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agentless: Option<AgentlessConfig>,
    /// Hosting context; absent means neither cloud nor serverless.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<CloudContext>,
    /// Fleet API endpoint used for agent policy lookups.
    pub fleet: FleetApiConfig,
}

/// Fleet API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FleetApiConfig {
    /// Kibana base URL, e.g. `http://localhost:5601`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    if BOOLEAN_KEYS.contains(&key) && value != "true" && value != "false" {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: "true, false".to_string(),
        }
        .into());
    }
    if URL_KEYS.contains(&key) && !(value.starts_with("http://") || value.starts_with("https://"))
    {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: "an http:// or https:// URL".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Apply a validated `key = value` setting to the config.
///
/// Setting a nested key creates its parent section when absent.
///
/// # Errors
///
/// Returns an error if the key or value fails validation.
pub fn apply_config_value(config: &mut FleetSetupConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;

    let flag = value == "true";
    match key {
        "features.agentless" => config.features.agentless = flag,
        "agentless.enabled" => config.agentless.get_or_insert_with(Default::default).enabled = flag,
        "agentless.api.url" => {
            config
                .agentless
                .get_or_insert_with(Default::default)
                .api
                .get_or_insert_with(AgentlessApiConfig::default)
                .url = Some(value.to_string());
        }
        "cloud.is_cloud_enabled" => {
            config.cloud.get_or_insert_with(Default::default).is_cloud_enabled = flag;
        }
        "cloud.is_serverless_enabled" => {
            config
                .cloud
                .get_or_insert_with(Default::default)
                .is_serverless_enabled = flag;
        }
        "fleet.url" => config.fleet.url = Some(value.to_string()),
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
