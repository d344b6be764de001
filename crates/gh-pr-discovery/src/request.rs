//! Per-scan request state shared by discovery rules

use crate::context::ScanContext;
use crate::head::ScanHead;
use gh_client::{GitHubClient, PullRequest};
use log::{debug, info};
use std::fmt;
use std::sync::Arc;

/// A repository on the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/name`
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Whether `full_name` names this repository (GitHub names are case-insensitive)
    pub fn is_same_repository(&self, full_name: &str) -> bool {
        full_name.eq_ignore_ascii_case(&self.full_name())
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// State of one scan of one repository
///
/// Holds the open pull requests, fetched at most once per scan, and the
/// client rules use for per-pull-request lookups.
pub struct ScanRequest {
    repository: RepositoryRef,
    client: Arc<dyn GitHubClient>,
    pull_requests: Option<Vec<PullRequest>>,
}

impl ScanRequest {
    /// A request without pull request support
    pub fn new(repository: RepositoryRef, client: Arc<dyn GitHubClient>) -> Self {
        Self {
            repository,
            client,
            pull_requests: None,
        }
    }

    /// Attach the already fetched open pull requests
    pub fn with_pull_requests(mut self, pull_requests: Vec<PullRequest>) -> Self {
        self.pull_requests = Some(pull_requests);
        self
    }

    /// Build the request for a decorated context
    ///
    /// Open pull requests are fetched only when some trait asked for origin
    /// pull requests.
    pub async fn prepare(
        context: &ScanContext,
        repository: RepositoryRef,
        client: Arc<dyn GitHubClient>,
    ) -> anyhow::Result<Self> {
        let request = Self::new(repository, client);
        if !context.wants_origin_prs() {
            debug!(
                "No trait wants pull requests of {}, skipping fetch",
                request.repository
            );
            return Ok(request);
        }

        let pull_requests = request
            .client
            .fetch_pull_requests(&request.repository.owner, &request.repository.name, None)
            .await?;
        info!(
            "Scanning {} open pull requests of {}",
            pull_requests.len(),
            request.repository
        );
        Ok(request.with_pull_requests(pull_requests))
    }

    pub fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    pub fn client(&self) -> &dyn GitHubClient {
        self.client.as_ref()
    }

    /// Open pull requests, or `None` if this request cannot supply them
    pub fn pull_requests(&self) -> Option<&[PullRequest]> {
        self.pull_requests.as_deref()
    }

    /// One head per open pull request
    pub fn change_request_heads(&self) -> Vec<ScanHead> {
        self.pull_requests()
            .unwrap_or_default()
            .iter()
            .map(|pr| ScanHead::from_pull_request(pr, &self.repository))
            .collect()
    }
}

impl fmt::Debug for ScanRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanRequest")
            .field("repository", &self.repository)
            .field(
                "pull_requests",
                &self.pull_requests.as_ref().map(|prs| prs.len()),
            )
            .finish_non_exhaustive()
    }
}
