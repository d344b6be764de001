use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading discovery configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `DiscoveryConfig`
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
