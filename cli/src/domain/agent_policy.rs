//! Agent policy draft synthesis: defaults, agentless naming and data tags.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use fleet_common::{AgentPolicyDraft, GlobalDataTag, MonitoringType, PackageInfo};

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_NAMESPACE: &str = "default";

/// Two weeks, matching Fleet's default for new agent policies.
pub const DEFAULT_INACTIVITY_TIMEOUT: u64 = 1_209_600;

const AGENTLESS_POLICY_NAME_PREFIX: &str = "Agentless policy for ";

// ── Synthesis ────────────────────────────────────────────────────────────────

/// A new agent policy with Fleet's defaults and the given name.
#[must_use]
pub fn new_agent_policy_with_defaults(name: &str) -> AgentPolicyDraft {
    AgentPolicyDraft {
        name: name.to_string(),
        description: String::new(),
        namespace: DEFAULT_NAMESPACE.to_string(),
        monitoring_enabled: vec![MonitoringType::Logs, MonitoringType::Metrics],
        is_managed: false,
        is_protected: false,
        supports_agentless: false,
        inactivity_timeout: DEFAULT_INACTIVITY_TIMEOUT,
        global_data_tags: None,
    }
}

/// Name of the dedicated agentless agent policy for a package policy.
#[must_use]
pub fn agentless_policy_name(package_policy_name: &str) -> String {
    format!("{AGENTLESS_POLICY_NAME_PREFIX}{package_policy_name}")
}

/// Ownership tags declared by the named policy template's agentless mode.
///
/// Order is organization, division, team; absent labels are skipped.
/// Returns `None` when the package, template or labels are missing.
#[must_use]
pub fn agentless_global_data_tags(
    package_info: Option<&PackageInfo>,
    policy_template_name: Option<&str>,
) -> Option<Vec<GlobalDataTag>> {
    let mode = package_info?
        .find_policy_template(policy_template_name?)?
        .agentless_mode()?;

    let tags: Vec<GlobalDataTag> = [
        ("organization", mode.organization.as_deref()),
        ("division", mode.division.as_deref()),
        ("team", mode.team.as_deref()),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.map(|v| GlobalDataTag::new(name, v)))
    .collect();

    (!tags.is_empty()).then_some(tags)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
