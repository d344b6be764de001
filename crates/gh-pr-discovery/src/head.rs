//! Discovered heads, their categories and origins

use crate::request::RepositoryRef;
use gh_client::PullRequest;
use strum::EnumIter;

/// Name under which a pull request head is built, e.g. `PR-42`
pub fn pull_request_head_name(number: u64) -> String {
    format!("PR-{}", number)
}

/// Kind of head a scan looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum HeadCategory {
    /// Plain branches
    Branch,
    /// Pull requests
    ChangeRequest,
    /// Tags
    Tag,
}

/// Where the source branch of a head lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeadOrigin {
    /// The scanned repository itself
    Default,
    /// A fork, identified by its owner
    Fork(String),
}

/// Origin class, used to ask authorities whether they understand an origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginKind {
    Default,
    Fork,
}

impl HeadOrigin {
    pub fn kind(&self) -> OriginKind {
        match self {
            HeadOrigin::Default => OriginKind::Default,
            HeadOrigin::Fork(_) => OriginKind::Fork,
        }
    }
}

/// Pull request behind a change-request head
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeRequest {
    /// Pull request number
    pub number: u64,
    /// Branch the pull request targets
    pub target: String,
}

/// A discovered head
///
/// Created by discovery from hosting API data; rules only read it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanHead {
    name: String,
    origin: Option<HeadOrigin>,
    change_request: Option<ChangeRequest>,
}

impl ScanHead {
    /// A plain branch of the scanned repository
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: Some(HeadOrigin::Default),
            change_request: None,
        }
    }

    /// A pull request head named `PR-<number>`
    pub fn pull_request(
        number: u64,
        target: impl Into<String>,
        origin: Option<HeadOrigin>,
    ) -> Self {
        Self {
            name: pull_request_head_name(number),
            origin,
            change_request: Some(ChangeRequest {
                number,
                target: target.into(),
            }),
        }
    }

    /// The head of `pr` as seen when scanning `repository`
    ///
    /// The origin is [`HeadOrigin::Default`] when the source branch lives in
    /// `repository`, a fork otherwise, and unset when the source repository
    /// no longer exists.
    pub fn from_pull_request(pr: &PullRequest, repository: &RepositoryRef) -> Self {
        let origin = match (pr.head_repo.as_deref(), pr.head_owner()) {
            (Some(head_repo), _) if repository.is_same_repository(head_repo) => {
                Some(HeadOrigin::Default)
            }
            (Some(_), Some(owner)) => Some(HeadOrigin::Fork(owner.to_string())),
            _ => None,
        };

        Self::pull_request(pr.number, pr.base_branch.clone(), origin)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Option<&HeadOrigin> {
        self.origin.as_ref()
    }

    pub fn change_request(&self) -> Option<&ChangeRequest> {
        self.change_request.as_ref()
    }

    pub fn is_change_request(&self) -> bool {
        self.change_request.is_some()
    }

    /// Whether the head is a pull request from the scanned repository itself
    pub fn is_origin_change_request(&self) -> bool {
        self.is_change_request() && self.origin == Some(HeadOrigin::Default)
    }

    pub fn category(&self) -> HeadCategory {
        if self.is_change_request() {
            HeadCategory::ChangeRequest
        } else {
            HeadCategory::Branch
        }
    }
}
