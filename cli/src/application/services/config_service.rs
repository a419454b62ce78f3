//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{FleetSetupConfig, apply_config_value};

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<FleetSetupConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &FleetSetupConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist a single `key = value` setting, returning the updated config.
///
/// # Errors
///
/// Returns an error if validation fails or the store cannot be read or written.
/// Nothing is written when validation fails.
pub fn set_config_value(
    store: &impl ConfigStore,
    key: &str,
    value: &str,
) -> Result<FleetSetupConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    tracing::info!(key, value, "configuration updated");
    Ok(config)
}
