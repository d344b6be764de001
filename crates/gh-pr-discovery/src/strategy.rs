//! Checkout strategies for pull request heads
//!
//! A pull request can be built from its merge with the target branch, from
//! its head commit, or both. The persisted configuration stores the choice
//! as a small integer id; this module decodes that id exactly once into a
//! [`DiscoveryStrategy`] and a [`StrategySet`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// A way of checking out a pull request head
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeRequestStrategy {
    /// Build the pull request merged with the current target branch revision
    Merge,
    /// Build the pull request head revision as-is
    Head,
}

impl ChangeRequestStrategy {
    /// The set containing only this strategy
    pub fn as_set(self) -> StrategySet {
        match self {
            ChangeRequestStrategy::Merge => StrategySet::MERGE,
            ChangeRequestStrategy::Head => StrategySet::HEAD,
        }
    }
}

bitflags! {
    /// Set of checkout strategies to materialize per pull request head
    ///
    /// The bit layout doubles as the persisted encoding: MERGE-only is 1,
    /// HEAD-only is 2 and both is 3.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StrategySet: u8 {
        /// Build the merge commit
        const MERGE = 1 << 0;

        /// Build the head commit
        const HEAD = 1 << 1;
    }
}

impl Default for StrategySet {
    fn default() -> Self {
        Self::empty()
    }
}

impl StrategySet {
    /// Decode a persisted strategy id
    ///
    /// Total over all integers: anything that is not a known id yields the
    /// empty set.
    pub fn decode(id: i64) -> Self {
        match id {
            1 | 4 => Self::MERGE,
            2 => Self::HEAD,
            3 => Self::HEAD | Self::MERGE,
            _ => Self::empty(),
        }
    }

    /// Encode as a persisted strategy id (0-3)
    pub fn encode(self) -> i64 {
        i64::from(self.intersection(Self::all()).bits())
    }

    /// Check if the set contains `strategy`
    pub fn contains_strategy(self, strategy: ChangeRequestStrategy) -> bool {
        self.contains(strategy.as_set())
    }

    /// Strategies in the set, MERGE first
    pub fn strategies(self) -> Vec<ChangeRequestStrategy> {
        ChangeRequestStrategy::iter()
            .filter(|strategy| self.contains_strategy(*strategy))
            .collect()
    }
}

impl FromIterator<ChangeRequestStrategy> for StrategySet {
    fn from_iter<I: IntoIterator<Item = ChangeRequestStrategy>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, strategy| set | strategy.as_set())
    }
}

/// Strategy choice for origin pull requests, as offered to users
///
/// Serialized as its integer id so persisted configuration stays a plain
/// number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(from = "i64", into = "i64")]
pub enum DiscoveryStrategy {
    /// No checkout strategy; also the decoding of unknown ids
    #[default]
    None,
    /// Merge commit only
    MergeOnly,
    /// Head commit only
    HeadOnly,
    /// Both merge and head commits
    MergeAndHead,
    /// Merge commit only, and drop pull requests that modified the pipeline file
    MergeExcludingModifiedPipeline,
}

impl DiscoveryStrategy {
    /// Decode a persisted id, mapping unknown ids to [`DiscoveryStrategy::None`]
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => Self::MergeOnly,
            2 => Self::HeadOnly,
            3 => Self::MergeAndHead,
            4 => Self::MergeExcludingModifiedPipeline,
            _ => Self::None,
        }
    }

    /// The persisted id
    pub fn id(self) -> i64 {
        match self {
            Self::None => 0,
            Self::MergeOnly => 1,
            Self::HeadOnly => 2,
            Self::MergeAndHead => 3,
            Self::MergeExcludingModifiedPipeline => 4,
        }
    }

    /// Checkout strategies selected by this choice
    pub fn strategies(self) -> StrategySet {
        StrategySet::decode(self.id())
    }

    /// Whether the modified-pipeline exclusion filter is requested
    pub fn excludes_modified_pipeline(self) -> bool {
        self == Self::MergeExcludingModifiedPipeline
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::MergeOnly => "Merge only",
            Self::HeadOnly => "Head only",
            Self::MergeAndHead => "Head and merge",
            Self::MergeExcludingModifiedPipeline => {
                "Head and merge, excluding pull requests that modify the pipeline file"
            }
        }
    }

    /// Choices offered for selection, in id order
    pub fn options() -> impl Iterator<Item = Self> {
        Self::iter().filter(|strategy| *strategy != Self::None)
    }
}

impl From<i64> for DiscoveryStrategy {
    fn from(id: i64) -> Self {
        Self::from_id(id)
    }
}

impl From<DiscoveryStrategy> for i64 {
    fn from(strategy: DiscoveryStrategy) -> Self {
        strategy.id()
    }
}

/// Never yields [`DiscoveryStrategy::MergeExcludingModifiedPipeline`]
impl From<StrategySet> for DiscoveryStrategy {
    fn from(set: StrategySet) -> Self {
        Self::from_id(set.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_known_ids() {
        assert_eq!(StrategySet::decode(0), StrategySet::empty());
        assert_eq!(StrategySet::decode(1), StrategySet::MERGE);
        assert_eq!(StrategySet::decode(2), StrategySet::HEAD);
        assert_eq!(
            StrategySet::decode(3),
            StrategySet::HEAD | StrategySet::MERGE
        );
        assert_eq!(StrategySet::decode(4), StrategySet::MERGE);
    }

    #[test]
    fn test_decode_unknown_ids_is_empty() {
        for id in [-1, 5, 7, 42, i64::MIN, i64::MAX] {
            assert!(StrategySet::decode(id).is_empty(), "id {} should decode to empty", id);
        }
    }

    #[test]
    fn test_encode() {
        assert_eq!(StrategySet::empty().encode(), 0);
        assert_eq!(StrategySet::MERGE.encode(), 1);
        assert_eq!(StrategySet::HEAD.encode(), 2);
        assert_eq!((StrategySet::MERGE | StrategySet::HEAD).encode(), 3);
    }

    #[test]
    fn test_encode_ignores_unknown_bits() {
        assert_eq!(StrategySet::from_bits_retain(0b101).encode(), 1);
    }

    #[test]
    fn test_strategies_lists_merge_first() {
        assert_eq!(
            StrategySet::all().strategies(),
            vec![ChangeRequestStrategy::Merge, ChangeRequestStrategy::Head]
        );
        assert_eq!(
            StrategySet::HEAD.strategies(),
            vec![ChangeRequestStrategy::Head]
        );
        assert!(StrategySet::empty().strategies().is_empty());
    }

    #[test]
    fn test_collect_strategies() {
        let set: StrategySet = [ChangeRequestStrategy::Head, ChangeRequestStrategy::Head]
            .into_iter()
            .collect();
        assert_eq!(set, StrategySet::HEAD);
        assert!(set.contains_strategy(ChangeRequestStrategy::Head));
        assert!(!set.contains_strategy(ChangeRequestStrategy::Merge));
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(ChangeRequestStrategy::Merge.to_string(), "MERGE");
        assert_eq!(ChangeRequestStrategy::Head.to_string(), "HEAD");
    }

    #[test]
    fn test_discovery_strategy_from_id() {
        for strategy in DiscoveryStrategy::iter() {
            assert_eq!(DiscoveryStrategy::from_id(strategy.id()), strategy);
        }
        assert_eq!(DiscoveryStrategy::from_id(9), DiscoveryStrategy::None);
        assert_eq!(DiscoveryStrategy::from_id(-4), DiscoveryStrategy::None);
    }

    #[test]
    fn test_only_id_four_excludes_modified_pipeline() {
        let excluding: Vec<_> = DiscoveryStrategy::iter()
            .filter(|strategy| strategy.excludes_modified_pipeline())
            .map(DiscoveryStrategy::id)
            .collect();
        assert_eq!(excluding, vec![4]);
        assert_eq!(
            DiscoveryStrategy::MergeExcludingModifiedPipeline.strategies(),
            StrategySet::MERGE
        );
    }

    #[test]
    fn test_from_strategy_set_never_yields_extended_choice() {
        assert_eq!(
            DiscoveryStrategy::from(StrategySet::MERGE),
            DiscoveryStrategy::MergeOnly
        );
        assert_eq!(
            DiscoveryStrategy::from(StrategySet::HEAD),
            DiscoveryStrategy::HeadOnly
        );
        assert_eq!(
            DiscoveryStrategy::from(StrategySet::all()),
            DiscoveryStrategy::MergeAndHead
        );
        assert_eq!(
            DiscoveryStrategy::from(StrategySet::empty()),
            DiscoveryStrategy::None
        );
    }

    #[test]
    fn test_options() {
        let options: Vec<(i64, &str)> = DiscoveryStrategy::options()
            .map(|strategy| (strategy.id(), strategy.label()))
            .collect();
        assert_eq!(
            options,
            vec![
                (1, "Merge only"),
                (2, "Head only"),
                (3, "Head and merge"),
                (
                    4,
                    "Head and merge, excluding pull requests that modify the pipeline file"
                ),
            ]
        );
    }

    #[test]
    fn test_discovery_strategy_serde_as_id() {
        let json = serde_json::to_string(&DiscoveryStrategy::MergeExcludingModifiedPipeline).unwrap();
        assert_eq!(json, "4");

        let decoded: DiscoveryStrategy = serde_json::from_str("2").unwrap();
        assert_eq!(decoded, DiscoveryStrategy::HeadOnly);

        let unknown: DiscoveryStrategy = serde_json::from_str("12").unwrap();
        assert_eq!(unknown, DiscoveryStrategy::None);
    }
}
