//! Trust authorities
//!
//! An authority decides whether a pull request head may run with elevated
//! build trust.

use crate::head::{HeadOrigin, OriginKind, ScanHead};
use crate::request::ScanRequest;

/// Policy deciding whether a change-request head is trusted
pub trait HeadAuthority: Send + Sync {
    /// Human readable name of the policy
    fn display_name(&self) -> &'static str;

    /// Whether this authority understands heads of the given origin class
    ///
    /// Callers must not consult an authority about origins it is not
    /// applicable to.
    fn is_applicable_to_origin(&self, origin: OriginKind) -> bool;

    /// Decide trust for a change-request head
    fn check_trusted(&self, request: &ScanRequest, head: &ScanHead) -> bool;

    /// Decide trust for any head; only change-request heads can be trusted
    fn is_trusted(&self, request: &ScanRequest, head: &ScanHead) -> bool {
        head.is_change_request() && self.check_trusted(request, head)
    }
}

/// Trusts pull requests whose source branch lives in the scanned repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OriginTrustAuthority;

impl HeadAuthority for OriginTrustAuthority {
    fn display_name(&self) -> &'static str {
        "Trust origin pull requests"
    }

    fn is_applicable_to_origin(&self, origin: OriginKind) -> bool {
        origin == OriginKind::Default
    }

    fn check_trusted(&self, _request: &ScanRequest, head: &ScanHead) -> bool {
        head.origin() == Some(&HeadOrigin::Default)
    }
}
