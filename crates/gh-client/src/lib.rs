//! GitHub API client for pull request discovery
//!
//! This crate provides a trait-based GitHub API client. Discovery rules only
//! depend on the `GitHubClient` trait; the octocrab-backed implementation
//! talks to github.com or a GitHub Enterprise host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_pull_requests()                         │
//! │  - fetch_pull_request_author()                   │
//! │  - fetch_pull_request_files()                    │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ OctocrabClient  │◄────────│ ClientManager       │
//! │ (direct API)    │         │ (one per host)      │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GitHubClient, OctocrabClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let octocrab = octocrab::Octocrab::builder()
//!     .personal_token("token".to_string())
//!     .build()?;
//!
//! let client = OctocrabClient::new(Arc::new(octocrab));
//! let prs = client.fetch_pull_requests("owner", "repo", None).await?;
//! for pr in &prs {
//!     let files = client.fetch_pull_request_files("owner", "repo", pr.number).await?;
//!     println!("#{} touches {} files", pr.number, files.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod client_manager;
pub mod octocrab_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use client::GitHubClient;
pub use client_manager::{ClientManager, TokenResolver};
pub use octocrab_client::OctocrabClient;
pub use types::{ChangedFile, FileStatus, PullRequest};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
