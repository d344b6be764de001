//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! This client makes real API calls without any caching.

use crate::client::GitHubClient;
use crate::types::{ChangedFile, FileStatus, PullRequest};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use std::sync::Arc;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        base_branch: Option<&str>,
    ) -> anyhow::Result<Vec<PullRequest>> {
        debug!("Fetching PRs for {}/{}", owner, repo);

        let mut prs = Vec::new();
        let mut page_num = 1u32;
        const PER_PAGE: u8 = 100;

        loop {
            let pulls = self.octocrab.pulls(owner, repo);
            let mut request = pulls
                .list()
                .state(octocrab::params::State::Open)
                .per_page(PER_PAGE)
                .page(page_num);

            if let Some(branch) = base_branch {
                request = request.base(branch);
            }

            let page = request.send().await?;
            let page_len = page.items.len();

            prs.extend(page.items.iter().map(convert_pull_request));

            if page_len < PER_PAGE as usize {
                break;
            }

            page_num += 1;
        }

        // Ascending PR number, matching the order GitHub lists pull requests in scans
        prs.sort_by(|a, b| a.number.cmp(&b.number));

        debug!("Fetched {} PRs for {}/{}", prs.len(), owner, repo);
        Ok(prs)
    }

    async fn fetch_pull_request_author(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String> {
        debug!("Fetching author of {}/{}#{}", owner, repo, pr_number);

        let pr = self.octocrab.pulls(owner, repo).get(pr_number).await?;

        pr.user
            .map(|user| user.login)
            .with_context(|| format!("{}/{}#{} has no author", owner, repo, pr_number))
    }

    async fn fetch_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<ChangedFile>> {
        debug!("Fetching changed files of {}/{}#{}", owner, repo, pr_number);

        let first_page = self
            .octocrab
            .pulls(owner, repo)
            .list_files(pr_number)
            .await?;
        let entries = self.octocrab.all_pages(first_page).await?;

        let files: Vec<ChangedFile> = entries
            .into_iter()
            .map(|entry| ChangedFile {
                status: convert_file_status(&entry.status),
                filename: entry.filename,
                additions: entry.additions,
                deletions: entry.deletions,
                changes: entry.changes,
            })
            .collect();

        debug!(
            "Fetched {} changed files of {}/{}#{}",
            files.len(),
            owner,
            repo,
            pr_number
        );
        Ok(files)
    }
}

/// Convert octocrab PullRequest to our PullRequest type
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        author: pr.user.as_ref().map(|u| u.login.clone()),
        head_sha: pr.head.sha.clone(),
        base_branch: pr.base.ref_field.clone(),
        head_branch: pr.head.ref_field.clone(),
        head_repo: pr.head.repo.as_ref().and_then(|r| r.full_name.clone()),
        base_repo: pr.base.repo.as_ref().and_then(|r| r.full_name.clone()),
        created_at: pr.created_at.unwrap_or_else(chrono::Utc::now),
        updated_at: pr.updated_at.unwrap_or_else(chrono::Utc::now),
        html_url: pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default(),
    }
}

/// Convert octocrab DiffEntryStatus enum to our enum
fn convert_file_status(status: &octocrab::models::repos::DiffEntryStatus) -> FileStatus {
    use octocrab::models::repos::DiffEntryStatus as DES;
    match status {
        DES::Added => FileStatus::Added,
        DES::Removed => FileStatus::Removed,
        DES::Modified => FileStatus::Modified,
        DES::Renamed => FileStatus::Renamed,
        DES::Copied => FileStatus::Copied,
        DES::Changed => FileStatus::Changed,
        DES::Unchanged => FileStatus::Unchanged,
        #[allow(unreachable_patterns)]
        _ => FileStatus::Changed,
    }
}
