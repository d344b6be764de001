//! Head filters
//!
//! A filter removes otherwise discovered heads from the buildable set.
//! [`ExcludeModifiedPipelineFilter`] drops pull requests that change the
//! pipeline definition file itself, unless an allow-listed author opened
//! them: a pull request must not silently alter its own build recipe.

use crate::head::{pull_request_head_name, ScanHead};
use crate::request::ScanRequest;
use async_trait::async_trait;
use gh_client::{ChangedFile, PullRequest};
use gh_pr_discovery_config::{ExclusionConfig, LookupFailurePolicy};
use log::{debug, info, warn};
use thiserror::Error;

/// Policy removing heads from the buildable set
///
/// Filters never fail: a head that cannot be classified is reported
/// according to the filter's own failure policy.
#[async_trait]
pub trait HeadFilter: Send + Sync {
    /// Human readable name of the filter
    fn display_name(&self) -> &'static str;

    /// Whether `head` must be dropped
    async fn is_excluded(&self, request: &ScanRequest, head: &ScanHead) -> bool;
}

/// A hosting API lookup that failed while classifying a pull request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Failed to look up author of pull request #{number}: {message}")]
    Author { number: u64, message: String },

    #[error("Failed to list changed files of pull request #{number}: {message}")]
    ChangedFiles { number: u64, message: String },
}

/// Outcome of checking a pull request author against the allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorCheck {
    /// The author is allow-listed
    Trusted(String),
    /// The author is known and not allow-listed
    NotTrusted(String),
    /// The author could not be determined; never grants the allow-list bypass
    LookupFailed(LookupError),
}

/// Excludes pull requests that modified the pipeline file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeModifiedPipelineFilter {
    config: ExclusionConfig,
}

impl ExcludeModifiedPipelineFilter {
    pub fn new(config: ExclusionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExclusionConfig {
        &self.config
    }

    /// Resolve the author of `pr` and check it against the allow-list
    ///
    /// Uses the login from the pull request listing when present, otherwise
    /// asks the hosting API.
    pub async fn check_author(&self, request: &ScanRequest, pr: &PullRequest) -> AuthorCheck {
        let login = match &pr.author {
            Some(login) => login.clone(),
            None => {
                let repository = request.repository();
                match request
                    .client()
                    .fetch_pull_request_author(&repository.owner, &repository.name, pr.number)
                    .await
                {
                    Ok(login) => login,
                    Err(e) => {
                        return AuthorCheck::LookupFailed(LookupError::Author {
                            number: pr.number,
                            message: format!("{:#}", e),
                        })
                    }
                }
            }
        };

        if self.config.is_trusted_author(&login) {
            AuthorCheck::Trusted(login)
        } else {
            AuthorCheck::NotTrusted(login)
        }
    }

    /// Whether `file` is the pipeline file with at least one changed line
    pub fn modifies_pipeline(&self, file: &ChangedFile) -> bool {
        file.filename == self.config.pipeline_file && file.has_line_changes()
    }

    async fn pull_request_modifies_pipeline(
        &self,
        request: &ScanRequest,
        pr: &PullRequest,
    ) -> Result<bool, LookupError> {
        let repository = request.repository();
        let files = request
            .client()
            .fetch_pull_request_files(&repository.owner, &repository.name, pr.number)
            .await
            .map_err(|e| LookupError::ChangedFiles {
                number: pr.number,
                message: format!("{:#}", e),
            })?;

        Ok(files.iter().any(|file| self.modifies_pipeline(file)))
    }

    fn excludes_on_failure(&self) -> bool {
        self.config.on_lookup_failure == LookupFailurePolicy::Exclude
    }
}

#[async_trait]
impl HeadFilter for ExcludeModifiedPipelineFilter {
    fn display_name(&self) -> &'static str {
        "Exclude pull requests that modify the pipeline file"
    }

    async fn is_excluded(&self, request: &ScanRequest, head: &ScanHead) -> bool {
        if !head.is_change_request() {
            return false;
        }
        let Some(pull_requests) = request.pull_requests() else {
            debug!(
                "{} cannot list pull requests, not filtering {}",
                request.repository(),
                head.name()
            );
            return false;
        };

        // Only the pull request backing the head can exclude it, so lookups
        // for every other pull request are skipped.
        for pr in pull_requests
            .iter()
            .filter(|pr| pull_request_head_name(pr.number) == head.name())
        {
            match self.check_author(request, pr).await {
                AuthorCheck::Trusted(login) => {
                    debug!("{} opened by trusted author {}, not filtering", head.name(), login);
                    continue;
                }
                AuthorCheck::NotTrusted(_) => {}
                AuthorCheck::LookupFailed(e) => {
                    warn!("{}; treating author of {} as untrusted", e, head.name());
                    if self.excludes_on_failure() {
                        info!("Excluding {}: author unknown", head.name());
                        return true;
                    }
                }
            }

            match self.pull_request_modifies_pipeline(request, pr).await {
                Ok(true) => {
                    info!(
                        "Excluding {}: pull request modifies {}",
                        head.name(),
                        self.config.pipeline_file
                    );
                    return true;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("{}", e);
                    if self.excludes_on_failure() {
                        info!("Excluding {}: changed files unknown", head.name());
                        return true;
                    }
                }
            }
        }

        false
    }
}
