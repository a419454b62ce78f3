//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: config file access and the
//! Fleet HTTP API.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod environment;
pub mod fleet_api;

pub use config::YamlConfigStore;
pub use environment::{DefaultPolicyGenerator, Environment};
pub use fleet_api::{UnavailableLookup, lookup_for};
