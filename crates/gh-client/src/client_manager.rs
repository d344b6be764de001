//! Multi-host GitHub client manager
//!
//! Scans can target github.com as well as GitHub Enterprise hosts.
//! Clients are lazily initialized per host and shared by every scan
//! request that targets the same host.

use crate::{GitHubClient, OctocrabClient, DEFAULT_HOST};
use anyhow::{Context, Result};
use log::{debug, info};
use octocrab::Octocrab;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the host-specific token variable, e.g. `GITHUB_TOKEN_GHE_EXAMPLE_COM`
pub fn token_env_key(host: &str) -> String {
    format!(
        "GITHUB_TOKEN_{}",
        host.replace(['.', '-'], "_").to_uppercase()
    )
}

/// REST API base URI for a host
///
/// github.com uses `api.github.com`, enterprise hosts serve the API under `/api/v3`.
pub fn api_base_uri(host: &str) -> String {
    if host == DEFAULT_HOST {
        "https://api.github.com".to_string()
    } else {
        format!("https://{}/api/v3", host)
    }
}

/// Resolves GitHub tokens for different hosts
///
/// Tries multiple sources in order:
/// 1. Host-specific env var (e.g., `GITHUB_TOKEN_GHE_EXAMPLE_COM`)
/// 2. `gh auth token --hostname {host}` command
/// 3. Generic `GITHUB_TOKEN` or `GH_TOKEN` (github.com only)
#[derive(Debug, Clone)]
pub struct TokenResolver {
    /// Cached default token from GITHUB_TOKEN/GH_TOKEN
    default_token: Option<String>,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver {
    /// Create a new token resolver
    pub fn new() -> Self {
        let default_token = std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok();

        Self { default_token }
    }

    /// Get a token for the given host (None = github.com)
    pub async fn get_token(&self, host: Option<&str>) -> Result<String> {
        let host = host.unwrap_or(DEFAULT_HOST);

        let env_key = token_env_key(host);
        if let Ok(token) = std::env::var(&env_key) {
            debug!("Using token from env var {} for host {}", env_key, host);
            return Ok(token);
        }

        debug!("Trying gh auth token for host {}", host);
        let output = tokio::process::Command::new("gh")
            .args(["auth", "token", "--hostname", host])
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let token = String::from_utf8(output.stdout)
                    .context("Invalid UTF-8 in gh auth token output")?
                    .trim()
                    .to_string();
                if !token.is_empty() {
                    debug!("Using token from gh CLI for host {}", host);
                    return Ok(token);
                }
            }
            Ok(_) => debug!("gh auth token returned no token for host {}", host),
            Err(e) => debug!("Could not run gh auth token: {}", e),
        }

        // Fallback to default token (for github.com only)
        if host == DEFAULT_HOST {
            if let Some(ref token) = self.default_token {
                debug!("Using default token (GITHUB_TOKEN/GH_TOKEN) for github.com");
                return Ok(token.clone());
            }
        }

        Err(anyhow::anyhow!(
            "No token found for host '{}'. \
             Set {} or run 'gh auth login --hostname {}'",
            host,
            env_key,
            host
        ))
    }
}

/// Manages GitHub API clients for multiple hosts
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::ClientManager;
///
/// let mut manager = ClientManager::new();
///
/// // Get client for github.com
/// let client = manager.client_for(None).await?;
///
/// // Get client for enterprise host
/// let ghe_client = manager.client_for(Some("ghe.example.com")).await?;
/// ```
#[derive(Default)]
pub struct ClientManager {
    clients: HashMap<String, Arc<dyn GitHubClient>>,
    tokens: TokenResolver,
}

impl ClientManager {
    /// Create an empty client manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the client for the given host (None = github.com)
    pub async fn client_for(&mut self, host: Option<&str>) -> Result<Arc<dyn GitHubClient>> {
        let key = host.unwrap_or(DEFAULT_HOST).to_string();

        if let Some(client) = self.clients.get(&key) {
            return Ok(Arc::clone(client));
        }

        let client = self.create_client(&key).await?;
        self.clients.insert(key, Arc::clone(&client));
        Ok(client)
    }

    /// Register a client for a host, replacing any existing one
    pub fn insert_client(&mut self, host: Option<&str>, client: Arc<dyn GitHubClient>) {
        let key = host.unwrap_or(DEFAULT_HOST).to_string();
        self.clients.insert(key, client);
    }

    /// Check if a client exists for the given host (without creating one)
    pub fn has_client(&self, host: Option<&str>) -> bool {
        self.clients.contains_key(host.unwrap_or(DEFAULT_HOST))
    }

    /// Remove a client for the given host
    ///
    /// This can be useful for forcing re-authentication after token changes.
    pub fn remove_client(&mut self, host: Option<&str>) {
        self.clients.remove(host.unwrap_or(DEFAULT_HOST));
    }

    async fn create_client(&self, host: &str) -> Result<Arc<dyn GitHubClient>> {
        info!("Creating GitHub client for host: {}", host);

        let token = self.tokens.get_token(Some(host)).await?;

        let mut builder = Octocrab::builder().personal_token(token);
        if host != DEFAULT_HOST {
            builder = builder
                .base_uri(api_base_uri(host))
                .context("Failed to set base URI")?;
        }

        let octocrab = builder.build().context("Failed to build Octocrab client")?;

        info!("GitHub client created for host: {}", host);
        Ok(Arc::new(OctocrabClient::new(Arc::new(octocrab))))
    }
}
