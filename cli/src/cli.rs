//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use fleet_setup::app::{AppContext, AppFlags, OutputFlags};
use fleet_setup::commands;

/// Resolve agentless capabilities and drive Fleet's setup technology selection
#[derive(Parser)]
#[command(
    name = "fleet-setup",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Fleet API key used for agent policy lookups
    #[arg(long, global = true, env = "FLEET_SETUP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show resolved agentless capabilities
    Capabilities,

    /// Select a setup technology for an integration
    Setup(commands::setup::SetupArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            api_key,
            command,
        } = self;
        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            api_key,
        });

        match command {
            Command::Version => commands::version::run(&app),
            Command::Capabilities => commands::capabilities::run(&app),
            Command::Setup(args) => commands::setup::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
        }
    }
}
