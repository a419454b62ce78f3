//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure and the owning UI
//! must fulfill. This file imports only from `crate::domain` and
//! `fleet_common`; never from `crate::infra`, `crate::commands`, or
//! `crate::output`.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use fleet_common::{AgentPolicyDraft, AgentPolicyItem, AgentPolicyRef, SelectedPolicyTab};

use crate::domain::capability::{AgentlessConfig, CloudContext, ExperimentalFeatures};
use crate::domain::config::FleetSetupConfig;
use crate::domain::error::LookupError;

// ── Environment Ports ─────────────────────────────────────────────────────────

/// Experimental feature flags (the injected replacement for a global singleton).
pub trait FeatureFlagService {
    /// Current experimental feature values.
    fn get(&self) -> ExperimentalFeatures;
}

/// Deployment configuration accessor.
pub trait ConfigAccessor {
    /// The `agentless` config section, or `None` when not configured.
    fn agentless(&self) -> Option<AgentlessConfig>;
}

/// Runtime services accessor.
pub trait RuntimeServices {
    /// The cloud hosting context, or `None` when the cloud plugin is absent.
    fn cloud(&self) -> Option<CloudContext>;
}

// ── Agent Policy Ports ────────────────────────────────────────────────────────

/// Fetches a single agent policy by id.
///
/// `Send + Sync` so the controller can run the lookup as a background task.
/// Retries, if any, belong to the implementation.
#[async_trait]
pub trait AgentPolicyLookup: Send + Sync {
    /// Fetch the agent policy with the given id.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NotFound` when the policy does not exist and
    /// another variant on transport or decoding failures.
    async fn get_one_agent_policy(&self, id: &str) -> Result<AgentPolicyItem, LookupError>;
}

/// Synthesizes a new agent policy draft with default values.
pub trait PolicyDraftGenerator {
    /// Build a draft named `name` with defaults for every other field.
    fn generate_defaults(&self, name: &str) -> AgentPolicyDraft;
}

// ── Callback Port ─────────────────────────────────────────────────────────────

/// Callbacks into the owning form. Sync trait; invoked on the owner's thread.
pub trait SetupCallbacks {
    /// Replace the candidate agent policy.
    fn set_new_agent_policy(&self, policy: &AgentPolicyDraft);
    /// Attach the integration to the given existing agent policies.
    fn update_agent_policies(&self, policies: &[AgentPolicyRef]);
    /// Switch the agent policy tab.
    fn set_selected_policy_tab(&self, tab: SelectedPolicyTab);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save/path).
pub trait ConfigStore {
    /// Load the current configuration, returning defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<FleetSetupConfig>;
    /// Persist the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &FleetSetupConfig) -> Result<()>;
    /// Path of the backing configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
