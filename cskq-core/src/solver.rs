//! The solver contract: rank candidate subsets for a query.

use thiserror::Error;

use crate::cost::CostError;
use crate::location::TaggedLocation;

/// A ranked answer: one subset and its cost.
///
/// Searches return solutions in ascending cost order; ties break on
/// the canonical ordering of the subset so results are reproducible.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Cost assigned by the cost function; `f64::INFINITY` marks a
    /// disqualified subset.
    pub cost: f64,
    /// The subset's members, in original-scale coordinates.
    pub members: Vec<TaggedLocation>,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// The dataset was empty.
    #[error("dataset must contain at least one location")]
    EmptyDataset,
    /// The requested result length was zero.
    #[error("result length must be at least 1")]
    ZeroResultLength,
    /// The subset size ceiling was zero.
    #[error("maximum subset size must be at least 1")]
    ZeroSubsetSize,
    /// A cost evaluation failed; the search aborts without partial
    /// results.
    #[error("cost evaluation failed")]
    Cost {
        /// Source error from the cost function.
        #[from]
        source: CostError,
    },
}

/// Rank candidate subsets of a dataset against a query.
///
/// Implementations must be deterministic: the same inputs return the
/// same ranked list, regardless of internal scheduling. They must be
/// `Send + Sync` so evaluations can run across threads.
pub trait Solver: Send + Sync {
    /// Produce the ranked list of solutions, ascending by cost.
    ///
    /// # Errors
    /// Returns [`SolveError`] for invalid parameters or when a cost
    /// evaluation fails. No partial results are returned.
    fn solve(&self) -> Result<Vec<Solution>, SolveError>;
}
