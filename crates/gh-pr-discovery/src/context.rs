//! Scan context
//!
//! Configuration accumulated from every trait taking part in one scan.
//! Traits decorate the context through `&mut` before discovery starts;
//! afterwards it is only read.

use crate::authority::HeadAuthority;
use crate::filter::HeadFilter;
use crate::head::{HeadCategory, ScanHead};
use crate::request::ScanRequest;
use crate::strategy::StrategySet;
use log::debug;
use std::fmt;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// A configurable behaviour of a repository scan
pub trait SourceTrait: Send + Sync {
    /// Human readable name of the trait
    fn display_name(&self) -> &'static str;

    /// Register this trait's rules into `context`
    fn decorate(&self, context: &mut ScanContext);

    /// Whether this trait is relevant when scanning for `category`
    fn include_category(&self, category: HeadCategory) -> bool;
}

/// What a scan does with one discovered head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadDecision {
    /// Dropped from the buildable set
    Excluded,
    /// Buildable with the given trust and checkout strategies
    Included {
        trusted: bool,
        strategies: StrategySet,
    },
}

/// Scan-scoped configuration shared by all traits of one scan
///
/// All registrations are additive. Registering the same authority or filter
/// twice keeps both; deduplication is up to whoever assembles the traits.
pub struct ScanContext {
    categories: Vec<HeadCategory>,
    want_origin_prs: bool,
    authorities: Vec<Arc<dyn HeadAuthority>>,
    filters: Vec<Arc<dyn HeadFilter>>,
    origin_strategies: StrategySet,
}

impl Default for ScanContext {
    /// A context scanning for every head category
    fn default() -> Self {
        Self::new(HeadCategory::iter())
    }
}

impl ScanContext {
    /// A context scanning for the given head categories
    pub fn new(categories: impl IntoIterator<Item = HeadCategory>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            want_origin_prs: false,
            authorities: Vec::new(),
            filters: Vec::new(),
            origin_strategies: StrategySet::empty(),
        }
    }

    pub fn categories(&self) -> &[HeadCategory] {
        &self.categories
    }

    /// Ask for pull requests from the scanned repository itself
    ///
    /// Once requested by any trait the request sticks; passing `false`
    /// does not revoke it.
    pub fn want_origin_prs(&mut self, include: bool) -> &mut Self {
        self.want_origin_prs |= include;
        self
    }

    pub fn wants_origin_prs(&self) -> bool {
        self.want_origin_prs
    }

    pub fn add_authority(&mut self, authority: Arc<dyn HeadAuthority>) -> &mut Self {
        self.authorities.push(authority);
        self
    }

    pub fn add_filter(&mut self, filter: Arc<dyn HeadFilter>) -> &mut Self {
        self.filters.push(filter);
        self
    }

    /// Add checkout strategies for origin pull requests
    pub fn add_origin_strategies(&mut self, strategies: StrategySet) -> &mut Self {
        self.origin_strategies |= strategies;
        self
    }

    pub fn authorities(&self) -> &[Arc<dyn HeadAuthority>] {
        &self.authorities
    }

    pub fn filters(&self) -> &[Arc<dyn HeadFilter>] {
        &self.filters
    }

    pub fn origin_strategies(&self) -> StrategySet {
        self.origin_strategies
    }

    /// Decorate with `source_trait` if it is relevant to any scanned category
    ///
    /// Returns whether the trait was applied.
    pub fn apply_trait(&mut self, source_trait: &dyn SourceTrait) -> bool {
        let relevant = self
            .categories
            .iter()
            .any(|category| source_trait.include_category(*category));

        if relevant {
            source_trait.decorate(self);
        } else {
            debug!(
                "Skipping '{}', not relevant to {:?}",
                source_trait.display_name(),
                self.categories
            );
        }
        relevant
    }

    pub fn apply_traits<'a>(&mut self, traits: impl IntoIterator<Item = &'a dyn SourceTrait>) {
        for source_trait in traits {
            self.apply_trait(source_trait);
        }
    }

    /// Classify one discovered head: filters first, then trust, then strategies
    pub async fn evaluate(&self, request: &ScanRequest, head: &ScanHead) -> HeadDecision {
        if head.is_origin_change_request() && !self.want_origin_prs {
            return HeadDecision::Excluded;
        }

        for filter in &self.filters {
            if filter.is_excluded(request, head).await {
                debug!("{} excluded by '{}'", head.name(), filter.display_name());
                return HeadDecision::Excluded;
            }
        }

        let trusted = head.origin().is_some_and(|origin| {
            self.authorities.iter().any(|authority| {
                authority.is_applicable_to_origin(origin.kind())
                    && authority.is_trusted(request, head)
            })
        });

        let strategies = if head.is_origin_change_request() {
            self.origin_strategies
        } else {
            StrategySet::empty()
        };

        HeadDecision::Included {
            trusted,
            strategies,
        }
    }
}

impl fmt::Debug for ScanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let authorities: Vec<_> = self.authorities.iter().map(|a| a.display_name()).collect();
        let filters: Vec<_> = self.filters.iter().map(|f| f.display_name()).collect();
        f.debug_struct("ScanContext")
            .field("categories", &self.categories)
            .field("want_origin_prs", &self.want_origin_prs)
            .field("authorities", &authorities)
            .field("filters", &filters)
            .field("origin_strategies", &self.origin_strategies)
            .finish()
    }
}
