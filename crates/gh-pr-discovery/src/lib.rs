//! Origin pull request discovery rules
//!
//! Rules a repository scan uses to handle pull requests whose source branch
//! lives in the scanned repository itself:
//!
//! - which checkout strategies apply (merge commit, head commit, or both)
//! - whether such a pull request is trusted
//! - whether a pull request that modified the pipeline file is dropped
//!
//! # Flow
//!
//! ```text
//! OriginPullRequestDiscovery ──decorate──► ScanContext
//!                                            │ want_origin_prs
//!                                            │ authorities: OriginTrustAuthority
//!                                            │ filters: ExcludeModifiedPipelineFilter (id 4)
//!                                            │ origin_strategies
//!                                            ▼
//!                     ScanRequest::prepare ──► heads ──► ScanContext::evaluate
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::ClientManager;
//! use gh_pr_discovery::{
//!     HeadCategory, OriginPullRequestDiscovery, RepositoryRef, ScanContext, ScanRequest,
//! };
//! use gh_pr_discovery_config::DiscoveryConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = DiscoveryConfig::load();
//! let discovery = OriginPullRequestDiscovery::from_config(&config);
//!
//! let mut context = ScanContext::new([HeadCategory::ChangeRequest]);
//! context.apply_trait(&discovery);
//!
//! let client = ClientManager::new().client_for(None).await?;
//! let request =
//!     ScanRequest::prepare(&context, RepositoryRef::new("owner", "repo"), client).await?;
//!
//! for head in request.change_request_heads() {
//!     println!("{}: {:?}", head.name(), context.evaluate(&request, &head).await);
//! }
//! # Ok(())
//! # }
//! ```

pub mod authority;
pub mod context;
pub mod filter;
pub mod head;
pub mod origin_discovery;
pub mod request;
pub mod strategy;

#[cfg(test)]
mod test_support;

pub use authority::{HeadAuthority, OriginTrustAuthority};
pub use context::{HeadDecision, ScanContext, SourceTrait};
pub use filter::{AuthorCheck, ExcludeModifiedPipelineFilter, HeadFilter, LookupError};
pub use head::{pull_request_head_name, ChangeRequest, HeadCategory, HeadOrigin, OriginKind, ScanHead};
pub use origin_discovery::OriginPullRequestDiscovery;
pub use request::{RepositoryRef, ScanRequest};
pub use strategy::{ChangeRequestStrategy, DiscoveryStrategy, StrategySet};
