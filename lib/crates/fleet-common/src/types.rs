use serde::{Deserialize, Serialize};
use std::fmt;

/// How an integration runs: on a user-managed agent or on hosted agentless infrastructure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SetupTechnology {
    #[default]
    #[cfg_attr(feature = "clap", value(name = "agent-based"))]
    AgentBased,
    Agentless,
}

impl SetupTechnology {
    pub fn as_str(self) -> &'static str {
        match self {
            SetupTechnology::AgentBased => "agent_based",
            SetupTechnology::Agentless => "agentless",
        }
    }
}

impl fmt::Display for SetupTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which agent policy tab the integration form shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SelectedPolicyTab {
    /// Create a new agent policy alongside the integration.
    New,
    /// Attach the integration to an existing agent policy.
    Existing,
}

impl SelectedPolicyTab {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectedPolicyTab::New => "new",
            SelectedPolicyTab::Existing => "existing",
        }
    }
}

impl fmt::Display for SelectedPolicyTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
