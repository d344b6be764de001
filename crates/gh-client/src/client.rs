//! GitHub client trait
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy. Discovery code only talks to the hosting
//! API through this trait, so tests can substitute a mock.

use crate::types::{ChangedFile, PullRequest};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Defines the subset of the GitHub API needed to discover pull requests
/// and classify their contents.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, PullRequest};
///
/// async fn list_prs(client: &dyn GitHubClient) -> anyhow::Result<Vec<PullRequest>> {
///     client.fetch_pull_requests("rust-lang", "rust", Some("master")).await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch open pull requests for a repository
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner (user or organization)
    /// * `repo` - Repository name
    /// * `base_branch` - Optional base branch filter (e.g., "main")
    ///
    /// # Returns
    ///
    /// A list of open pull requests, or an error if the API call fails.
    async fn fetch_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        base_branch: Option<&str>,
    ) -> anyhow::Result<Vec<PullRequest>>;

    /// Fetch the login of the user who opened a pull request
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    ///
    /// # Returns
    ///
    /// The author login, or an error if the lookup fails or the
    /// pull request has no associated user.
    async fn fetch_pull_request_author(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String>;

    /// Fetch the files changed by a pull request
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    ///
    /// # Returns
    ///
    /// Every changed file, across all pages, in API order.
    async fn fetch_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<ChangedFile>>;
}
