//! Shared fixtures for unit tests

use crate::request::{RepositoryRef, ScanRequest};
use async_trait::async_trait;
use chrono::Utc;
use gh_client::{ChangedFile, FileStatus, GitHubClient, PullRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock client for testing
///
/// Author and file lookups fail for pull requests that were not registered.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockClient {
    prs: Vec<PullRequest>,
    fail_pull_requests: bool,
    authors: HashMap<u64, String>,
    files: HashMap<u64, Vec<ChangedFile>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_pull_requests(mut self, prs: Vec<PullRequest>) -> Self {
        self.prs = prs;
        self
    }

    pub(crate) fn failing_pull_requests(mut self) -> Self {
        self.fail_pull_requests = true;
        self
    }

    pub(crate) fn with_author(mut self, pr_number: u64, login: &str) -> Self {
        self.authors.insert(pr_number, login.to_string());
        self
    }

    pub(crate) fn with_files(mut self, pr_number: u64, files: Vec<ChangedFile>) -> Self {
        self.files.insert(pr_number, files);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn record_call(&self) {
        *self.call_count.lock().unwrap() += 1;
    }
}

#[async_trait]
impl GitHubClient for MockClient {
    async fn fetch_pull_requests(
        &self,
        _owner: &str,
        _repo: &str,
        _base_branch: Option<&str>,
    ) -> anyhow::Result<Vec<PullRequest>> {
        self.record_call();
        if self.fail_pull_requests {
            anyhow::bail!("connection reset");
        }
        Ok(self.prs.clone())
    }

    async fn fetch_pull_request_author(
        &self,
        _owner: &str,
        _repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String> {
        self.record_call();
        self.authors
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("user of #{} not found", pr_number))
    }

    async fn fetch_pull_request_files(
        &self,
        _owner: &str,
        _repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<ChangedFile>> {
        self.record_call();
        self.files
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("files of #{} not found", pr_number))
    }
}

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The repository every fixture scans
pub(crate) fn repository() -> RepositoryRef {
    RepositoryRef::new("owner", "repo")
}

/// A pull request from a branch of the scanned repository
pub(crate) fn test_pr(number: u64, author: Option<&str>) -> PullRequest {
    fork_pr(number, author, Some("owner/repo"))
}

/// A pull request whose head lives in `head_repo`
pub(crate) fn fork_pr(number: u64, author: Option<&str>, head_repo: Option<&str>) -> PullRequest {
    PullRequest {
        number,
        title: format!("Test PR {}", number),
        author: author.map(String::from),
        head_sha: "abc123".to_string(),
        base_branch: "main".to_string(),
        head_branch: "feature".to_string(),
        head_repo: head_repo.map(String::from),
        base_repo: Some("owner/repo".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        html_url: format!("https://github.com/owner/repo/pull/{}", number),
    }
}

pub(crate) fn changed_file(filename: &str, additions: u64, deletions: u64) -> ChangedFile {
    ChangedFile {
        filename: filename.to_string(),
        additions,
        deletions,
        changes: additions + deletions,
        status: FileStatus::Modified,
    }
}

pub(crate) fn request_without_pull_requests() -> ScanRequest {
    ScanRequest::new(repository(), Arc::new(MockClient::new()))
}
