//! Environment adapters: the feature-flag, config and runtime-services
//! ports backed by a loaded `FleetSetupConfig`, plus the default policy
//! draft generator.

use fleet_common::AgentPolicyDraft;

use crate::application::ports::{
    ConfigAccessor, FeatureFlagService, PolicyDraftGenerator, RuntimeServices,
};
use crate::domain::agent_policy::new_agent_policy_with_defaults;
use crate::domain::capability::{AgentlessConfig, CloudContext, ExperimentalFeatures};
use crate::domain::config::FleetSetupConfig;

/// Snapshot of the deployment environment read from the config file.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    config: FleetSetupConfig,
}

impl Environment {
    #[must_use]
    pub fn new(config: FleetSetupConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FleetSetupConfig {
        &self.config
    }
}

impl FeatureFlagService for Environment {
    fn get(&self) -> ExperimentalFeatures {
        self.config.features
    }
}

impl ConfigAccessor for Environment {
    fn agentless(&self) -> Option<AgentlessConfig> {
        self.config.agentless.clone()
    }
}

impl RuntimeServices for Environment {
    fn cloud(&self) -> Option<CloudContext> {
        self.config.cloud
    }
}

/// Fleet's standard new-agent-policy defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicyGenerator;

impl PolicyDraftGenerator for DefaultPolicyGenerator {
    fn generate_defaults(&self, name: &str) -> AgentPolicyDraft {
        new_agent_policy_with_defaults(name)
    }
}
