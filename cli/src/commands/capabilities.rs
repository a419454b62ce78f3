//! `fleet-setup capabilities`: show which agentless capabilities resolve
//! from the current configuration.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::capabilities::use_agentless;

/// Run the capabilities command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or output fails.
pub fn run(app: &AppContext) -> Result<()> {
    let env = app.environment()?;
    let flags = use_agentless(&env, &env, &env);
    app.renderer().render_capabilities(&flags)
}
