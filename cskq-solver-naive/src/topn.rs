//! Bounded collection of the lowest-cost candidates.
//!
//! Workers feed `(cost, subset)` pairs in arbitrary completion order;
//! the selector keeps at most `N` of them, ascending by cost with ties
//! broken on the canonical (lexicographic index) ordering of the
//! subset. Merging is commutative, so the final ranking is identical
//! for any worker count or scheduling order. Infinite-cost entries
//! sort after every finite entry and survive only while the list has
//! room.

use std::cmp::Ordering;

/// One candidate subset and its evaluated cost.
///
/// The subset is represented by its sorted index combination into the
/// dataset; the indices double as the deterministic tie-break key.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// Evaluated cost; `f64::INFINITY` for disqualified subsets.
    pub cost: f64,
    /// Sorted dataset index combination identifying the subset.
    pub indices: Vec<usize>,
}

impl RankedCandidate {
    fn ordering(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.indices.len().cmp(&other.indices.len()))
            .then_with(|| self.indices.cmp(&other.indices))
    }
}

/// Keeps the `N` best candidates seen so far.
#[derive(Debug, Clone)]
pub struct TopNSelector {
    capacity: usize,
    // Sorted ascending at all times.
    entries: Vec<RankedCandidate>,
}

impl TopNSelector {
    /// A selector retaining at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(1024)),
        }
    }

    /// Offer a candidate; it is kept only if it improves on the worst
    /// retained entry once the selector is full.
    pub fn push(&mut self, candidate: RankedCandidate) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            match self.entries.last() {
                Some(worst) if candidate.ordering(worst) != Ordering::Less => return,
                _ => {}
            }
        }
        let position = self
            .entries
            .partition_point(|entry| entry.ordering(&candidate) == Ordering::Less);
        self.entries.insert(position, candidate);
        self.entries.truncate(self.capacity);
    }

    /// Fold another selector's entries into this one.
    pub fn merge(&mut self, other: Self) {
        for candidate in other.entries {
            self.push(candidate);
        }
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The retained candidates, ascending by cost.
    #[must_use]
    pub fn into_ranked(self) -> Vec<RankedCandidate> {
        self.entries
    }
}
