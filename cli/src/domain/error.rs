//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `reqwest`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Lookup errors ─────────────────────────────────────────────────────────────

/// Errors returned by the agent policy lookup port.
///
/// None of these are fatal to the setup flow: the controller degrades to
/// "no existing agentless policy known".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Agent policy '{0}' not found.")]
    NotFound(String),

    #[error("Agent policy request failed: {0}")]
    Transport(String),

    #[error("Agent policy response could not be decoded: {0}")]
    Decode(String),

    #[error("Agent policy lookup unavailable: no Fleet URL configured.")]
    Unavailable,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}

// ── Package errors ────────────────────────────────────────────────────────────

/// Errors related to package descriptors supplied on the command line.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Invalid agent policy reference '{0}': expected <id> or <id>:agentless")]
    InvalidPolicyRef(String),

    #[error("Package policy name must not be empty.")]
    EmptyPolicyName,
}
