//! Application service: agentless capability resolution from injected
//! collaborators.

use crate::application::ports::{ConfigAccessor, FeatureFlagService, RuntimeServices};
use crate::domain::capability::{CapabilityFlags, resolve_capabilities};

/// Read the feature flag, deployment config and cloud context, and resolve
/// what agentless capability is available. Never fails: missing inputs mean
/// the feature is off.
pub fn use_agentless(
    features: &impl FeatureFlagService,
    config: &impl ConfigAccessor,
    runtime: &impl RuntimeServices,
) -> CapabilityFlags {
    let agentless_config = config.agentless();
    let cloud = runtime.cloud();
    let flags = resolve_capabilities(
        features.get().agentless,
        agentless_config.as_ref(),
        cloud.as_ref(),
    );
    tracing::debug!(
        agentless = flags.is_agentless_enabled,
        agentless_api = flags.is_agentless_api_enabled,
        default_agentless_policy = flags.is_default_agentless_policy_enabled,
        "resolved agentless capabilities",
    );
    flags
}
