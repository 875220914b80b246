//! Read-only stores of precomputed partial metrics.
//!
//! A store maps the canonical identity of a subset to a previously
//! computed aggregation. Stores are populated offline by a separate
//! precomputation pass and never written to during a search, so they
//! are shared immutably across workers without synchronization.

use std::collections::HashMap;

use crate::location::{LocationKey, TaggedLocation};

/// Canonical identity of a subset.
///
/// Member keys are sorted, so the key is independent of enumeration
/// order and of which coordinate space (normalized or not) produced
/// the subset. Build it from the denormalized view of the members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubsetKey {
    members: Vec<LocationKey>,
}

impl SubsetKey {
    /// Canonical key for a group of locations.
    #[must_use]
    pub fn new(members: &[&TaggedLocation]) -> Self {
        let mut keys: Vec<LocationKey> = members.iter().map(|m| m.key()).collect();
        keys.sort();
        Self { members: keys }
    }

    /// Number of members in the keyed subset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the keyed subset has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A mapping from canonical subset identity to a precomputed value.
///
/// Lookups that miss are a recoverable condition: the caller computes
/// the value directly instead.
#[derive(Debug, Clone, Default)]
pub struct PrecalculatedStore {
    values: HashMap<SubsetKey, f64>,
}

impl PrecalculatedStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a subset. Used by offline precomputation
    /// passes; searches never call this.
    pub fn insert(&mut self, key: SubsetKey, value: f64) {
        self.values.insert(key, value);
    }

    /// Look up the precomputed value for a subset.
    #[must_use]
    pub fn get(&self, key: &SubsetKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Number of stored subsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The three independent precomputed stores a cost function consults.
#[derive(Debug, Clone, Default)]
pub struct PrecalculatedSet {
    /// Query-distance aggregations, keyed by subset.
    pub query_distance: Option<PrecalculatedStore>,
    /// Inter-group distance aggregations, keyed by subset.
    pub inter_distance: Option<PrecalculatedStore>,
    /// Keyword relevance aggregations, keyed by subset.
    pub keyword_similarity: Option<PrecalculatedStore>,
}

impl PrecalculatedSet {
    /// A set with no stores; every aggregation computes directly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
