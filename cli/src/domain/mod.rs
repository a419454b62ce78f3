//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `reqwest`.
//! All functions are synchronous and take data in, returning data out.

pub mod agent_policy;
pub mod capability;
pub mod config;
pub mod error;
pub mod setup_technology;

pub use agent_policy::{
    agentless_global_data_tags, agentless_policy_name, new_agent_policy_with_defaults,
};
pub use capability::{
    AgentlessApiConfig, AgentlessConfig, CapabilityFlags, CloudContext, ExperimentalFeatures,
    resolve_capabilities,
};
pub use config::{FleetSetupConfig, apply_config_value, validate_config_key, validate_config_value};
pub use error::{ConfigError, LookupError, PackageError};
pub use setup_technology::{
    SelectedPolicyTab, SetupTechnology, initial_setup_technology, is_agentless_only_package,
};
