//! Configuration for GitHub pull request discovery
//!
//! This crate provides:
//! - Config file locations (CWD, platform config dir, home directory)
//! - Configuration file loading (TOML)
//! - Discovery configuration (`DiscoveryConfig`)

pub mod config_file;
pub mod discovery_config;
pub mod error;
pub mod paths;

pub use config_file::load_config_file;
pub use discovery_config::{DiscoveryConfig, ExclusionConfig, LookupFailurePolicy};
pub use error::ConfigError;
