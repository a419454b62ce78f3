//! Initial setup technology selection.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

pub use fleet_common::{SelectedPolicyTab, SetupTechnology};
use fleet_common::{AgentPolicyRef, PackageInfo};

use crate::domain::capability::CapabilityFlags;

/// Returns `true` when every policy template of the package runs agentless
/// only: at least one template, all with agentless enabled, none with the
/// default (agent-based) mode enabled.
#[must_use]
pub fn is_agentless_only_package(package_info: &PackageInfo) -> bool {
    !package_info.policy_templates.is_empty()
        && package_info
            .policy_templates
            .iter()
            .all(|t| t.is_agentless_enabled() && !t.is_default_enabled())
}

/// Compute the setup technology selected when the form mounts.
///
/// Rules, first match wins:
/// 1. agentless disabled → agent-based
/// 2. editing and a linked agent policy supports agentless → agentless
/// 3. package is agentless-only → agentless
/// 4. otherwise → agent-based
#[must_use]
pub fn initial_setup_technology(
    capabilities: &CapabilityFlags,
    is_edit_page: bool,
    agent_policies: &[AgentPolicyRef],
    package_info: Option<&PackageInfo>,
) -> SetupTechnology {
    if !capabilities.is_agentless_enabled {
        return SetupTechnology::AgentBased;
    }
    if is_edit_page && agent_policies.iter().any(|p| p.supports_agentless) {
        return SetupTechnology::Agentless;
    }
    if package_info.is_some_and(is_agentless_only_package) {
        return SetupTechnology::Agentless;
    }
    SetupTechnology::AgentBased
}

// ── Unit tests ───────────────────────────────────────────────────────────────
