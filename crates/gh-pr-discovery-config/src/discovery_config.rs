//! Discovery configuration
//!
//! Configuration loaded from `.gh-pr-discovery.toml`:
//!
//! ```toml
//! strategy_id = 4
//!
//! [exclusion]
//! pipeline_file = "Jenkinsfile"
//! trusted_authors = ["release-bot"]
//! on_lookup_failure = "continue"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Discovery configuration for one scanned repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Persisted strategy id (0-4), decoded by the discovery crate
    #[serde(default = "default_strategy_id")]
    pub strategy_id: i64,

    /// Settings of the modified-pipeline exclusion filter
    #[serde(default)]
    pub exclusion: ExclusionConfig,
}

/// Settings of the filter that drops pull requests modifying the pipeline file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionConfig {
    /// Repository-relative path of the pipeline definition file
    #[serde(default = "default_pipeline_file")]
    pub pipeline_file: String,

    /// Author logins whose pipeline changes never exclude a pull request
    #[serde(default)]
    pub trusted_authors: Vec<String>,

    /// What to do when an author or changed-file lookup fails
    #[serde(default)]
    pub on_lookup_failure: LookupFailurePolicy,
}

/// Reaction to a failed hosting API lookup while classifying a head
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupFailurePolicy {
    /// Treat an unreadable author as untrusted and skip unreadable file lists
    #[default]
    Continue,
    /// Exclude the head when anything about its pull request cannot be read
    Exclude,
}

fn default_strategy_id() -> i64 {
    1 // Merge only
}

fn default_pipeline_file() -> String {
    "Jenkinsfile".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            strategy_id: default_strategy_id(),
            exclusion: ExclusionConfig::default(),
        }
    }
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            pipeline_file: default_pipeline_file(),
            trusted_authors: Vec::new(),
            on_lookup_failure: LookupFailurePolicy::default(),
        }
    }
}

impl ExclusionConfig {
    /// Whether `login` is on the allow-list
    ///
    /// An empty login never matches, even if the allow-list contains one.
    pub fn is_trusted_author(&self, login: &str) -> bool {
        !login.is_empty() && self.trusted_authors.iter().any(|author| author == login)
    }
}

impl DiscoveryConfig {
    /// Load config from the first config file found, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded discovery config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default discovery config");
        Self::default()
    }

    /// Read config from an explicit path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.strategy_id, 1);
        assert_eq!(config.exclusion.pipeline_file, "Jenkinsfile");
        assert!(config.exclusion.trusted_authors.is_empty());
        assert_eq!(
            config.exclusion.on_lookup_failure,
            LookupFailurePolicy::Continue
        );
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            strategy_id = 4

            [exclusion]
            trusted_authors = ["release-bot", "sonarpp"]
            on_lookup_failure = "exclude"
        "#;
        let config = DiscoveryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.strategy_id, 4);
        assert_eq!(
            config.exclusion.trusted_authors,
            vec!["release-bot".to_string(), "sonarpp".to_string()]
        );
        assert_eq!(
            config.exclusion.on_lookup_failure,
            LookupFailurePolicy::Exclude
        );
        // pipeline_file should use default
        assert_eq!(config.exclusion.pipeline_file, "Jenkinsfile");
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = DiscoveryConfig::from_toml_str("strategy_id = 3").unwrap();
        assert_eq!(config.strategy_id, 3);
        assert_eq!(config.exclusion, ExclusionConfig::default());
    }

    #[test]
    fn test_config_keeps_unknown_strategy_id() {
        let config = DiscoveryConfig::from_toml_str("strategy_id = 17").unwrap();
        assert_eq!(config.strategy_id, 17);
    }

    #[test]
    fn test_config_parse_error() {
        let err = DiscoveryConfig::from_toml_str("strategy_id = \"four\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_path_missing_file() {
        let path = std::env::temp_dir().join("gh-pr-discovery-missing-config.toml");
        let err = DiscoveryConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("gh-pr-discovery-missing-config.toml"));
    }

    #[test]
    fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "gh-pr-discovery-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "strategy_id = 2\n[exclusion]\npipeline_file = \"ci/Jenkinsfile\"\n")
            .unwrap();

        let config = DiscoveryConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.strategy_id, 2);
        assert_eq!(config.exclusion.pipeline_file, "ci/Jenkinsfile");
    }

    #[test]
    fn test_is_trusted_author() {
        let config = ExclusionConfig {
            trusted_authors: vec!["release-bot".to_string(), String::new()],
            ..ExclusionConfig::default()
        };
        assert!(config.is_trusted_author("release-bot"));
        assert!(!config.is_trusted_author("Release-Bot"));
        assert!(!config.is_trusted_author("alice"));
        assert!(!config.is_trusted_author(""));
    }
}
