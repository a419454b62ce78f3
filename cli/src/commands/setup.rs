//! `fleet-setup setup`: run the setup technology controller for one
//! integration and report what it asked the form to do.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fleet_common::{AgentPolicyRef, PackageInfo, PackagePolicy, PackagePolicyPackage};

use crate::app::AppContext;
use crate::application::services::capabilities::use_agentless;
use crate::application::services::setup_technology::{
    SetupTechnologyController, SetupTechnologyParams,
};
use crate::domain::agent_policy::new_agent_policy_with_defaults;
use crate::domain::error::PackageError;
use crate::domain::setup_technology::SetupTechnology;
use crate::infra::{DefaultPolicyGenerator, lookup_for};
use crate::output::{RecordingCallbacks, SetupReport};

/// Name Fleet proposes for the first agent policy created from the form.
pub const DEFAULT_AGENT_POLICY_NAME: &str = "Agent policy 1";

/// Arguments for the setup command.
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Name of the package policy (integration) being authored
    #[arg(long)]
    pub policy_name: String,

    /// Package name (defaults to the name in --package-info)
    #[arg(long)]
    pub package_name: Option<String>,

    /// Package descriptor with policy templates (YAML, or JSON by extension)
    #[arg(long, value_name = "FILE")]
    pub package_info: Option<PathBuf>,

    /// Editing an existing package policy
    #[arg(long)]
    pub edit: bool,

    /// Linked agent policy, `<id>` or `<id>:agentless` (repeatable)
    #[arg(long = "agent-policy", value_name = "REF", value_parser = parse_agent_policy_ref)]
    pub agent_policies: Vec<AgentPolicyRef>,

    /// Switch to this setup technology after mounting
    #[arg(long, value_enum)]
    pub select: Option<SetupTechnology>,

    /// Policy template whose agentless labels become global data tags
    #[arg(long)]
    pub template: Option<String>,

    /// Rename the package policy after the switch
    #[arg(long)]
    pub rename: Option<String>,
}

/// Run the setup command.
///
/// # Errors
///
/// Returns an error if the config or package descriptor cannot be loaded, or
/// if output rendering fails. Lookup failures are not errors.
pub async fn run(app: &AppContext, args: &SetupArgs) -> Result<()> {
    if args.policy_name.trim().is_empty() {
        return Err(PackageError::EmptyPolicyName.into());
    }

    let env = app.environment()?;
    let capabilities = use_agentless(&env, &env, &env);
    let package_info = args
        .package_info
        .as_deref()
        .map(load_package_info)
        .transpose()?;
    let lookup = lookup_for(&env.config().fleet, app.api_key.clone())?;

    let package_name = args
        .package_name
        .clone()
        .or_else(|| package_info.as_ref().map(|p| p.name.clone()))
        .filter(|name| !name.is_empty());
    let params = SetupTechnologyParams {
        capabilities,
        new_agent_policy: new_agent_policy_with_defaults(DEFAULT_AGENT_POLICY_NAME),
        package_policy: PackagePolicy {
            name: args.policy_name.clone(),
            package: package_name.map(|name| PackagePolicyPackage {
                name,
                ..Default::default()
            }),
        },
        package_info,
        is_edit_page: args.edit,
        agent_policies: args.agent_policies.clone(),
    };

    let mut controller = SetupTechnologyController::new(
        params,
        DefaultPolicyGenerator,
        lookup,
        RecordingCallbacks::new(),
    );
    controller.mount();
    controller.settle().await;
    let initial = controller.state();

    if let Some(target) = args.select {
        controller.handle_setup_technology_change(target, args.template.as_deref());
    }
    if let Some(name) = &args.rename {
        controller.set_package_policy_name(name);
    }

    let report = SetupReport {
        initial,
        final_state: controller.state(),
        agentless_policy_id: controller.agentless_policy_id().map(str::to_string),
        events: controller.callbacks().events(),
        agent_policy: controller.callbacks().latest_policy(),
    };
    app.renderer().render_setup(&report)
}

/// Parse `<id>` or `<id>:agentless` into an agent policy reference.
///
/// # Errors
///
/// Returns `PackageError::InvalidPolicyRef` for an empty id or unknown suffix.
pub fn parse_agent_policy_ref(value: &str) -> Result<AgentPolicyRef, PackageError> {
    let (id, supports_agentless) = match value.split_once(':') {
        None => (value, false),
        Some((id, "agentless")) => (id, true),
        Some(_) => return Err(PackageError::InvalidPolicyRef(value.to_string())),
    };
    if id.is_empty() {
        return Err(PackageError::InvalidPolicyRef(value.to_string()));
    }
    Ok(AgentPolicyRef {
        id: id.to_string(),
        supports_agentless,
    })
}

/// Load a package descriptor; `.json` files are parsed as JSON, anything else as YAML.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_package_info(path: &Path) -> Result<PackageInfo> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }
}
