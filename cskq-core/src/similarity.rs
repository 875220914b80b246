//! Keyword relevance metrics.
//!
//! Relevance is expressed as a cosine *distance* in `[0, 1]`: `0.0`
//! means the keyword sets agree perfectly, `1.0` means they share
//! nothing. One-hot encodings are built either pairwise (over the
//! union of the two lists) or against a combined universe spanning the
//! query and a whole subset. An embedding-backed metric can be
//! injected through [`KeywordSimilarity`]; the engine never implements
//! one itself.

use std::sync::Arc;

use thiserror::Error;

use crate::location::TaggedLocation;

/// Errors raised while computing keyword relevance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimilarityError {
    /// The two vectors handed to the cosine computation differ in
    /// length.
    #[error("vectors must have the same length, got {left} and {right}")]
    LengthMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },
    /// A vector consists only of zeroes, so the cosine ratio is
    /// undefined.
    #[error("cosine similarity is undefined for an all-zero vector")]
    ZeroVector,
    /// An injected metric had no representation for a keyword set.
    #[error("no comparable representation for keywords: {detail}")]
    NoRepresentation {
        /// Human-readable description from the metric.
        detail: String,
    },
}

/// Cosine similarity of two equal-length vectors.
///
/// # Errors
/// Returns [`SimilarityError::LengthMismatch`] for vectors of unequal
/// length and [`SimilarityError::ZeroVector`] when either vector is
/// all zeroes. Neither condition is silently coerced to a default.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(SimilarityError::ZeroVector);
    }
    Ok(dot / (norm_a * norm_b))
}

/// One-hot encode two keyword lists against a shared universe.
///
/// Matching is case-insensitive. The result vectors have the
/// universe's length.
#[must_use]
pub fn one_hot_encode(a: &[String], b: &[String], universe: &[String]) -> (Vec<f64>, Vec<f64>) {
    let lower = |list: &[String]| -> Vec<String> {
        list.iter().map(|kw| kw.to_lowercase()).collect()
    };
    let (a_lower, b_lower) = (lower(a), lower(b));
    let mut vector_a = Vec::with_capacity(universe.len());
    let mut vector_b = Vec::with_capacity(universe.len());
    for keyword in universe {
        let keyword = keyword.to_lowercase();
        vector_a.push(f64::from(u8::from(a_lower.contains(&keyword))));
        vector_b.push(f64::from(u8::from(b_lower.contains(&keyword))));
    }
    (vector_a, vector_b)
}

/// Build one-hot vectors over the deduplicated union of two lists.
#[must_use]
pub fn keyword_vectors(a: &[String], b: &[String]) -> (Vec<f64>, Vec<f64>) {
    let mut universe: Vec<String> = Vec::new();
    for keyword in a.iter().chain(b) {
        let keyword = keyword.to_lowercase();
        if !universe.contains(&keyword) {
            universe.push(keyword);
        }
    }
    one_hot_encode(a, b, &universe)
}

/// Keyword universe spanning the query and every subset member.
#[must_use]
pub fn combined_keyword_universe(query: &TaggedLocation, subset: &[&TaggedLocation]) -> Vec<String> {
    let mut universe: Vec<String> = Vec::new();
    let members = subset.iter().flat_map(|member| member.keywords.iter());
    for keyword in query.keywords.iter().chain(members) {
        let keyword = keyword.to_lowercase();
        if !universe.contains(&keyword) {
            universe.push(keyword);
        }
    }
    universe
}

/// Cosine distance over pairwise union vectors.
///
/// # Errors
/// Propagates [`cosine_similarity`] failures; an empty keyword list
/// surfaces as [`SimilarityError::ZeroVector`].
pub fn separated_cosine_distance(a: &[String], b: &[String]) -> Result<f64, SimilarityError> {
    let (vector_a, vector_b) = keyword_vectors(a, b);
    Ok(1.0 - cosine_similarity(&vector_a, &vector_b)?)
}

/// Cosine distance over one-hot vectors against a combined universe.
///
/// # Errors
/// Propagates [`cosine_similarity`] failures; a keyword list with no
/// overlap with the universe surfaces as
/// [`SimilarityError::ZeroVector`].
pub fn combined_cosine_distance(
    a: &[String],
    b: &[String],
    universe: &[String],
) -> Result<f64, SimilarityError> {
    let (vector_a, vector_b) = one_hot_encode(a, b, universe);
    Ok(1.0 - cosine_similarity(&vector_a, &vector_b)?)
}

/// Externally supplied keyword similarity, e.g. embedding-based.
///
/// Implementations return a relevance distance where `0.0` is a
/// perfect match. They must be thread-safe so searches can fan the
/// metric out across workers.
pub trait KeywordSimilarity: Send + Sync {
    /// Relevance distance between a query keyword list and a member
    /// keyword list.
    ///
    /// # Errors
    /// Returns [`SimilarityError::NoRepresentation`] when either list
    /// cannot be represented by the backing model.
    fn relevance(&self, query: &[String], member: &[String]) -> Result<f64, SimilarityError>;
}

/// The keyword-relevance policy used by a cost function.
#[derive(Clone)]
pub enum KeywordRelevance {
    /// Pairwise one-hot encoding over the union of each query/member
    /// pair.
    Separated,
    /// One-hot encoding against the combined universe of the query
    /// and the whole subset.
    Combined,
    /// Injected similarity backed by an external model.
    Embedding(Arc<dyn KeywordSimilarity>),
}

impl KeywordRelevance {
    /// Relevance distance between the query's keywords and one
    /// member's keywords. `universe` is the combined keyword universe
    /// of the subset under evaluation; only [`Self::Combined`]
    /// consults it.
    ///
    /// # Errors
    /// Propagates the underlying metric's [`SimilarityError`].
    pub fn relevance(
        &self,
        query: &[String],
        member: &[String],
        universe: &[String],
    ) -> Result<f64, SimilarityError> {
        match self {
            Self::Separated => separated_cosine_distance(query, member),
            Self::Combined => combined_cosine_distance(query, member, universe),
            Self::Embedding(model) => model.relevance(query, member),
        }
    }
}

impl std::fmt::Debug for KeywordRelevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Separated => f.write_str("Separated"),
            Self::Combined => f.write_str("Combined"),
            Self::Embedding(_) => f.write_str("Embedding(..)"),
        }
    }
}
