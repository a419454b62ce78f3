//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::domain::capability::CapabilityFlags;
use crate::domain::config::FleetSetupConfig;
use crate::domain::setup_technology::SetupTechnology;
use crate::output::{OutputContext, SetupEvent, SetupReport};

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the resolved agentless capabilities.
    pub fn render_capabilities(&self, flags: &CapabilityFlags) {
        self.ctx.header("Agentless capabilities:");
        self.print_check(flags.is_agentless_enabled, "agentless enabled");
        self.print_check(
            flags.is_agentless_api_enabled,
            "agentless API (dedicated policy per integration)",
        );
        self.print_check(
            flags.is_default_agentless_policy_enabled,
            "default agentless policy (shared)",
        );
    }

    /// Render a setup run report.
    pub fn render_setup(&self, report: &SetupReport) {
        self.ctx.kv(
            "Initial setup technology:",
            &self.technology_label(report.initial.selected_setup_technology),
        );
        self.ctx.kv(
            "Selected setup technology:",
            &self.technology_label(report.final_state.selected_setup_technology),
        );
        self.ctx.kv(
            "Existing agentless policy:",
            report.agentless_policy_id.as_deref().unwrap_or("(none)"),
        );
        let final_state = &report.final_state;
        if final_state.is_default_agentless_policy_enabled
            && final_state.selected_setup_technology == SetupTechnology::Agentless
            && report.agentless_policy_id.is_none()
        {
            self.ctx
                .warn("Shared agentless policy not found; a new agent policy will be used");
        }

        if self.ctx.quiet {
            return;
        }
        println!();
        if report.events.is_empty() {
            self.ctx.info("No changes requested");
            return;
        }
        self.ctx.header("Callbacks:");
        for event in &report.events {
            match event {
                SetupEvent::SetNewAgentPolicy { policy } => {
                    println!("    → set new agent policy \"{}\"", policy.name);
                    if let Some(tags) = &policy.global_data_tags {
                        for tag in tags {
                            println!(
                                "        {} {}",
                                format!("{}:", tag.name).style(self.ctx.styles.dim),
                                tag.value
                            );
                        }
                    }
                }
                SetupEvent::UpdateAgentPolicies { policies } => {
                    let ids: Vec<&str> = policies.iter().map(|p| p.id.as_str()).collect();
                    println!("    → attach to agent policies [{}]", ids.join(", "));
                }
                SetupEvent::SetSelectedPolicyTab { tab } => {
                    println!("    → select policy tab '{tab}'");
                }
            }
        }
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &FleetSetupConfig, path: &std::path::Path) {
        let agentless = config.agentless.as_ref();
        let cloud = config.cloud.unwrap_or_default();
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<30} {}", "features.agentless:", config.features.agentless);
        println!(
            "  {:<30} {}",
            "agentless.enabled:",
            agentless.is_some_and(|a| a.enabled)
        );
        println!(
            "  {:<30} {}",
            "agentless.api.url:",
            agentless.and_then(|a| a.api_url()).unwrap_or("(not set)")
        );
        println!("  {:<30} {}", "cloud.is_cloud_enabled:", cloud.is_cloud_enabled);
        println!(
            "  {:<30} {}",
            "cloud.is_serverless_enabled:", cloud.is_serverless_enabled
        );
        println!(
            "  {:<30} {}",
            "fleet.url:",
            config.fleet.url.as_deref().unwrap_or("(not set)")
        );
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        println!(
            "    {:<28} {}",
            "FLEET_SETUP_CONFIG:",
            std::env::var("FLEET_SETUP_CONFIG").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<28} {}",
            "FLEET_SETUP_API_KEY:",
            if std::env::var("FLEET_SETUP_API_KEY").is_ok() {
                "(set)"
            } else {
                "(not set)"
            }
        );
        println!();
    }

    /// Render the outcome of `config set`.
    pub fn render_config_set(&self, key: &str, value: &str) {
        self.ctx.success(&format!("Set {key} = {value}"));
    }

    pub fn render_version(&self, version: &str) {
        println!("fleet-setup {version}");
    }

    fn technology_label(&self, technology: SetupTechnology) -> String {
        match technology {
            SetupTechnology::Agentless => {
                format!("{}", "agentless".style(self.ctx.styles.agentless))
            }
            SetupTechnology::AgentBased => "agent-based".to_string(),
        }
    }

    fn print_check(&self, ok: bool, msg: &str) {
        if self.ctx.quiet {
            return;
        }
        if ok {
            println!("    {} {msg}", "✓".style(self.ctx.styles.success));
        } else {
            println!("    {} {msg}", "✗".style(self.ctx.styles.error));
        }
    }
}
