//! Core domain types and scoring primitives for the CSKQ engine.
//!
//! A collective spatial keyword query asks for the groups of dataset
//! locations that best serve a query point: close to it, compact, and
//! relevant to its keywords. This crate provides the pieces a solver
//! needs to rank such groups — the [`TaggedLocation`] model,
//! [`DistanceMetric`]s, keyword relevance, coordinate
//! [`normalize`](normalize()) / denormalization, the polymorphic
//! [`CostFunction`] families, and the read-only
//! [`PrecalculatedStore`]s that let expensive partial metrics be
//! computed once and reused.
//!
//! Search strategies live in companion crates and implement the
//! [`Solver`] trait.

#![forbid(unsafe_code)]

mod cost;
mod distance;
mod evaluate;
mod location;
mod normalize;
mod precalc;
mod similarity;
mod solver;

pub use cost::{CostError, CostFunction, CostFunctionConfig, CostModel};
pub use distance::DistanceMetric;
pub use evaluate::{EvaluationResult, Evaluator};
pub use location::{Dataset, LocationKey, TaggedLocation, COORD_PRECISION};
pub use normalize::{denormalize_solutions, normalize, NormalizationParams};
pub use precalc::{PrecalculatedSet, PrecalculatedStore, SubsetKey};
pub use similarity::{
    combined_cosine_distance, combined_keyword_universe, cosine_similarity, keyword_vectors,
    one_hot_encode, separated_cosine_distance, KeywordRelevance, KeywordSimilarity,
    SimilarityError,
};
pub use solver::{Solution, SolveError, Solver};
