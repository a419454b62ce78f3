//! Property-based tests for capability resolution and the setup controller.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;

use fleet_setup::domain::capability::{
    AgentlessApiConfig, AgentlessConfig, CloudContext, resolve_capabilities,
};
use fleet_setup::domain::setup_technology::{SetupTechnology, is_agentless_only_package};

use crate::mocks::{cloud_capabilities, controller, no_lookup, package, params, template};

fn agentless_config(enabled: bool, url: Option<String>) -> AgentlessConfig {
    AgentlessConfig {
        enabled,
        api: Some(AgentlessApiConfig { url }),
    }
}

// ============================================================================
// resolve_capabilities() property tests
// ============================================================================

proptest! {
    /// `is_agentless_enabled` holds iff feature AND config AND (cloud OR serverless).
    #[test]
    fn prop_agentless_enabled_truth_table(
        feature in any::<bool>(),
        config_enabled in any::<bool>(),
        cloud in any::<bool>(),
        serverless in any::<bool>(),
    ) {
        let cfg = agentless_config(config_enabled, None);
        let ctx = CloudContext { is_cloud_enabled: cloud, is_serverless_enabled: serverless };
        let flags = resolve_capabilities(feature, Some(&cfg), Some(&ctx));
        prop_assert_eq!(flags.is_agentless_enabled, feature && config_enabled && (cloud || serverless));
    }

    /// Derived flags imply the base flag and their own preconditions.
    #[test]
    fn prop_derived_flags_imply_base(
        feature in any::<bool>(),
        config_enabled in any::<bool>(),
        cloud in any::<bool>(),
        serverless in any::<bool>(),
        url in proptest::option::of("https?://[a-z]{1,12}\\.example"),
    ) {
        let has_url = url.is_some();
        let cfg = agentless_config(config_enabled, url);
        let ctx = CloudContext { is_cloud_enabled: cloud, is_serverless_enabled: serverless };
        let flags = resolve_capabilities(feature, Some(&cfg), Some(&ctx));

        if flags.is_agentless_api_enabled {
            prop_assert!(flags.is_agentless_enabled && cloud && has_url);
        }
        if flags.is_default_agentless_policy_enabled {
            prop_assert!(flags.is_agentless_enabled && serverless);
        }
        prop_assert_eq!(flags.is_agentless_api_enabled, flags.is_agentless_enabled && cloud && has_url);
        prop_assert_eq!(flags.is_default_agentless_policy_enabled, flags.is_agentless_enabled && serverless);
    }
}

// ============================================================================
// Initial selection property tests
// ============================================================================

proptest! {
    /// A package is agentless-only iff it has templates and none enable the default mode
    /// while all enable agentless.
    #[test]
    fn prop_agentless_only_package(modes in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..6)) {
        let templates = modes
            .iter()
            .enumerate()
            .map(|(i, (default, agentless))| template(&format!("t{i}"), *default, *agentless))
            .collect();
        let expected = !modes.is_empty() && modes.iter().all(|(d, a)| !d && *a);
        prop_assert_eq!(is_agentless_only_package(&package(templates)), expected);
    }

    /// The agentless draft always tracks the latest package policy name.
    #[test]
    fn prop_rename_tracks_latest_name(names in proptest::collection::vec("[a-z][a-z0-9-]{0,15}", 1..6)) {
        let mut c = controller(params(cloud_capabilities(), "initial"), no_lookup());
        c.handle_setup_technology_change(SetupTechnology::Agentless, None);
        for name in &names {
            c.set_package_policy_name(name);
        }
        let last = names.last().unwrap();
        let draft = c.callbacks().last_policy().unwrap();
        prop_assert_eq!(draft.name, format!("Agentless policy for {last}"));
    }
}
