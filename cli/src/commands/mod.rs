//! Command implementations

pub mod capabilities;
pub mod config;
pub mod setup;
pub mod version;
