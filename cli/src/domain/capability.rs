//! Agentless capability resolution.
//!
//! Pure functions only; no I/O, no async, no global state.

use serde::{Deserialize, Serialize};

/// `agentless.api` section of the deployment config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AgentlessApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// `agentless` section of the deployment config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AgentlessConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<AgentlessApiConfig>,
}

impl AgentlessConfig {
    /// The agentless API URL, treating an empty string as unset.
    #[must_use]
    pub fn api_url(&self) -> Option<&str> {
        self.api
            .as_ref()
            .and_then(|api| api.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Hosting context of the running deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CloudContext {
    #[serde(default)]
    pub is_cloud_enabled: bool,
    #[serde(default)]
    pub is_serverless_enabled: bool,
}

/// Experimental features relevant to the setup flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExperimentalFeatures {
    #[serde(default)]
    pub agentless: bool,
}

/// What agentless capability the current deployment offers.
///
/// Invariant: both `is_agentless_api_enabled` and
/// `is_default_agentless_policy_enabled` imply `is_agentless_enabled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CapabilityFlags {
    pub is_agentless_enabled: bool,
    /// Cloud deployments create a dedicated agentless policy per integration.
    pub is_agentless_api_enabled: bool,
    /// Serverless deployments share one pre-provisioned agentless policy.
    pub is_default_agentless_policy_enabled: bool,
}

impl CapabilityFlags {
    /// All capabilities off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            is_agentless_enabled: false,
            is_agentless_api_enabled: false,
            is_default_agentless_policy_enabled: false,
        }
    }
}

/// Resolve agentless capability from the feature flag, deployment config and
/// cloud context. Any missing input yields all-false flags.
#[must_use]
pub fn resolve_capabilities(
    agentless_feature_enabled: bool,
    agentless_config: Option<&AgentlessConfig>,
    cloud: Option<&CloudContext>,
) -> CapabilityFlags {
    let (Some(config), Some(cloud)) = (agentless_config, cloud) else {
        return CapabilityFlags::disabled();
    };

    let is_agentless_enabled = config.enabled
        && agentless_feature_enabled
        && (cloud.is_cloud_enabled || cloud.is_serverless_enabled);

    CapabilityFlags {
        is_agentless_enabled,
        is_agentless_api_enabled: is_agentless_enabled
            && cloud.is_cloud_enabled
            && config.api_url().is_some(),
        is_default_agentless_policy_enabled: is_agentless_enabled && cloud.is_serverless_enabled,
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
