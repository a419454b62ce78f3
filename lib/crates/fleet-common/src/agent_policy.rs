use serde::{Deserialize, Serialize};

/// Well-known id of the shared agentless agent policy on serverless deployments.
pub const AGENTLESS_POLICY_ID: &str = "agentless";

/// Data streams an agent policy ships monitoring data for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringType {
    Logs,
    Metrics,
}

/// Key/value label attached to an agent policy for organizational attribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalDataTag {
    pub name: String,
    pub value: String,
}

impl GlobalDataTag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Candidate agent policy owned by the integration form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AgentPolicyDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub namespace: String,
    #[serde(default)]
    pub monitoring_enabled: Vec<MonitoringType>,
    #[serde(default)]
    pub is_managed: bool,
    #[serde(default)]
    pub is_protected: bool,
    #[serde(default)]
    pub supports_agentless: bool,
    /// Seconds without check-in before an agent is reported inactive.
    pub inactivity_timeout: u64,
    /// Ordered tags; names are unique.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_data_tags: Option<Vec<GlobalDataTag>>,
}

/// Reference to an agent policy the integration is (or will be) attached to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AgentPolicyRef {
    pub id: String,
    #[serde(default)]
    pub supports_agentless: bool,
}

impl AgentPolicyRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            supports_agentless: false,
        }
    }
}

/// Agent policy as returned by the Fleet API; only the fields this crate reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentPolicyItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub supports_agentless: Option<bool>,
}

impl AgentPolicyItem {
    pub fn to_ref(&self) -> AgentPolicyRef {
        AgentPolicyRef {
            id: self.id.clone(),
            supports_agentless: self.supports_agentless.unwrap_or(false),
        }
    }
}
