//! Discovery of pull requests originating from the scanned repository

use crate::authority::OriginTrustAuthority;
use crate::context::{ScanContext, SourceTrait};
use crate::filter::ExcludeModifiedPipelineFilter;
use crate::head::HeadCategory;
use crate::strategy::{DiscoveryStrategy, StrategySet};
use gh_pr_discovery_config::{DiscoveryConfig, ExclusionConfig};
use log::warn;
use std::sync::Arc;

/// Trait discovering pull requests whose source branch lives in the
/// scanned repository
///
/// Decorating a context always asks for origin pull requests, trusts them
/// and registers the configured checkout strategies. Strategy id 4 also
/// installs [`ExcludeModifiedPipelineFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPullRequestDiscovery {
    strategy_id: i64,
    strategy: DiscoveryStrategy,
    exclusion: ExclusionConfig,
}

impl OriginPullRequestDiscovery {
    /// Create from a persisted strategy id
    ///
    /// Unknown ids are kept as-is but select no checkout strategy.
    pub fn new(strategy_id: i64) -> Self {
        let strategy = DiscoveryStrategy::from_id(strategy_id);
        if strategy.id() != strategy_id {
            warn!(
                "Unknown pull request strategy id {}, no checkout strategy selected",
                strategy_id
            );
        }

        Self {
            strategy_id,
            strategy,
            exclusion: ExclusionConfig::default(),
        }
    }

    /// Create from a set of checkout strategies
    ///
    /// Never enables the modified-pipeline exclusion; that needs the raw id.
    pub fn from_strategies(strategies: StrategySet) -> Self {
        Self::new(strategies.encode())
    }

    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(config.strategy_id).with_exclusion(config.exclusion.clone())
    }

    /// Settings used when the exclusion filter is installed
    pub fn with_exclusion(mut self, exclusion: ExclusionConfig) -> Self {
        self.exclusion = exclusion;
        self
    }

    pub fn strategy_id(&self) -> i64 {
        self.strategy_id
    }

    pub fn strategy(&self) -> DiscoveryStrategy {
        self.strategy
    }

    pub fn strategies(&self) -> StrategySet {
        self.strategy.strategies()
    }
}

impl SourceTrait for OriginPullRequestDiscovery {
    fn display_name(&self) -> &'static str {
        "Discover pull requests from origin"
    }

    fn decorate(&self, context: &mut ScanContext) {
        if self.strategy.excludes_modified_pipeline() {
            context.add_filter(Arc::new(ExcludeModifiedPipelineFilter::new(
                self.exclusion.clone(),
            )));
        }
        context
            .want_origin_prs(true)
            .add_authority(Arc::new(OriginTrustAuthority))
            .add_origin_strategies(self.strategies());
    }

    fn include_category(&self, category: HeadCategory) -> bool {
        category == HeadCategory::ChangeRequest
    }
}
