//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from the discovery domain model
//! to keep this crate pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request from the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// Author's GitHub username, if the list endpoint returned one
    pub author: Option<String>,

    /// HEAD commit SHA
    pub head_sha: String,

    /// Base branch name (e.g., "main")
    pub base_branch: String,

    /// HEAD branch name (e.g., "feature/foo")
    pub head_branch: String,

    /// Full name of the repository the head branch lives in (e.g., "owner/repo")
    ///
    /// `None` when the source repository was deleted.
    pub head_repo: Option<String>,

    /// Full name of the repository the PR targets
    pub base_repo: Option<String>,

    /// When the PR was created
    pub created_at: DateTime<Utc>,

    /// When the PR was last updated
    pub updated_at: DateTime<Utc>,

    /// PR URL for opening in browser
    pub html_url: String,
}

impl PullRequest {
    /// Owner part of the head repository full name
    pub fn head_owner(&self) -> Option<&str> {
        self.head_repo
            .as_deref()
            .and_then(|full_name| full_name.split_once('/'))
            .map(|(owner, _)| owner)
    }
}

/// A file touched by a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Path relative to the repository root
    pub filename: String,

    /// Number of lines added
    pub additions: u64,

    /// Number of lines deleted
    pub deletions: u64,

    /// Total number of changed lines
    pub changes: u64,

    /// Kind of change
    pub status: FileStatus,
}

impl ChangedFile {
    /// Whether the file carries any line-level change
    pub fn has_line_changes(&self) -> bool {
        self.additions > 0 || self.deletions > 0
    }
}

/// Status of a file in a pull request diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Added,
    Removed,
    #[default]
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_pr(head_repo: Option<&str>) -> PullRequest {
        PullRequest {
            number: 42,
            title: "Test PR".to_string(),
            author: Some("testuser".to_string()),
            head_sha: "abc123".to_string(),
            base_branch: "main".to_string(),
            head_branch: "feature/test".to_string(),
            head_repo: head_repo.map(String::from),
            base_repo: Some("owner/repo".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            html_url: "https://github.com/owner/repo/pull/42".to_string(),
        }
    }

    #[test]
    fn test_head_owner() {
        assert_eq!(
            create_test_pr(Some("contributor/repo")).head_owner(),
            Some("contributor")
        );
        assert_eq!(create_test_pr(Some("malformed")).head_owner(), None);
        assert_eq!(create_test_pr(None).head_owner(), None);
    }

    #[test]
    fn test_has_line_changes() {
        let mut file = ChangedFile {
            filename: "Jenkinsfile".to_string(),
            additions: 0,
            deletions: 0,
            changes: 0,
            status: FileStatus::Modified,
        };
        assert!(!file.has_line_changes());

        file.deletions = 2;
        assert!(file.has_line_changes());

        file.deletions = 0;
        file.additions = 1;
        assert!(file.has_line_changes());
    }

    #[test]
    fn test_pull_request_serialization() {
        let pr = create_test_pr(Some("owner/repo"));

        let json = serde_json::to_string(&pr).unwrap();
        let deserialized: PullRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, pr);
    }

    #[test]
    fn test_file_status_serde() {
        let json = serde_json::to_string(&FileStatus::Renamed).unwrap();
        assert_eq!(json, "\"renamed\"");

        let deserialized: FileStatus = serde_json::from_str("\"removed\"").unwrap();
        assert_eq!(deserialized, FileStatus::Removed);
    }
}
