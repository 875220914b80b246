//! Facade crate for the CSKQ subset-search engine.
//!
//! Re-exports the core domain types and the exhaustive solver so
//! callers can depend on a single crate.

#![forbid(unsafe_code)]

pub use cskq_core::{
    combined_cosine_distance, combined_keyword_universe, cosine_similarity,
    denormalize_solutions, keyword_vectors, normalize, one_hot_encode,
    separated_cosine_distance, CostError, CostFunction, CostFunctionConfig, CostModel, Dataset,
    DistanceMetric, EvaluationResult, Evaluator, KeywordRelevance, KeywordSimilarity,
    LocationKey, NormalizationParams, PrecalculatedSet, PrecalculatedStore, SimilarityError,
    Solution, SolveError, Solver, SubsetKey, TaggedLocation, COORD_PRECISION,
};

#[cfg(feature = "solver-naive")]
pub use cskq_solver_naive::{
    partition, precompute_stores, subset_count, NaiveSolver, NaiveSolverConfig,
    PrecomputeOptions, RankedCandidate, SubsetEnumerator, TopNSelector,
};
