use serde::{Deserialize, Serialize};

/// Default (agent-based) deployment mode of a policy template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentMode {
    pub enabled: bool,
}

/// Agentless deployment mode, optionally carrying ownership labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AgentlessDeploymentMode {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DeploymentModes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DeploymentMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agentless: Option<AgentlessDeploymentMode>,
}

/// A named variant within a package describing its supported deployment modes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PolicyTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_modes: Option<DeploymentModes>,
}

impl PolicyTemplate {
    /// Agent-based deployment is on unless the template switches it off.
    pub fn is_default_enabled(&self) -> bool {
        self.deployment_modes
            .as_ref()
            .and_then(|modes| modes.default.as_ref())
            .is_none_or(|mode| mode.enabled)
    }

    pub fn is_agentless_enabled(&self) -> bool {
        self.agentless_mode().is_some_and(|mode| mode.enabled)
    }

    pub fn agentless_mode(&self) -> Option<&AgentlessDeploymentMode> {
        self.deployment_modes
            .as_ref()
            .and_then(|modes| modes.agentless.as_ref())
    }
}

/// Package descriptor as served by the package registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub policy_templates: Vec<PolicyTemplate>,
}

impl PackageInfo {
    pub fn find_policy_template(&self, name: &str) -> Option<&PolicyTemplate> {
        self.policy_templates.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PackagePolicyPackage {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
}

/// The integration configuration being authored; only the fields the setup flow reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PackagePolicy {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackagePolicyPackage>,
}
