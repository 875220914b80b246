//! Cost functions scoring a `(query, subset)` pair.
//!
//! Every cost is a weighted combination of three aggregated signals:
//! the distance between the query and the subset, the spread within
//! the subset, and the keyword relevance of the subset to the query.
//! The family variants differ only in how the query term aggregates
//! ([`CostModel::MaxSum`] vs [`CostModel::NearestSum`]) or in the
//! combination formula ([`CostModel::Minkowski`]).
//!
//! Families are a closed enum dispatched through a single evaluation
//! function; the per-subset hot loop never goes through a trait
//! object.

use thiserror::Error;

use crate::distance::DistanceMetric;
use crate::location::TaggedLocation;
use crate::precalc::{PrecalculatedSet, PrecalculatedStore, SubsetKey};
use crate::similarity::{combined_keyword_universe, KeywordRelevance, SimilarityError};

/// Errors raised while evaluating a cost function.
///
/// Threshold violations are not errors; they surface as an infinite
/// cost and participate normally in ranking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostError {
    /// The keyword-relevance computation failed.
    #[error("failed to compute keyword relevance")]
    Relevance {
        /// Source error from the similarity metric.
        #[from]
        source: SimilarityError,
    },
}

/// Weights, thresholds and injected metrics shared by every family.
///
/// Weights carry no sum-to-one invariant; callers may use any
/// non-negative values. Thresholds gate the three aggregated terms
/// unless [`disable_thresholds`](Self::disable_thresholds) is set.
#[derive(Debug, Clone)]
pub struct CostFunctionConfig {
    /// Weight of the query-distance term.
    pub alpha: f64,
    /// Weight of the inter-group spread term.
    pub beta: f64,
    /// Weight of the keyword-relevance term.
    pub omega: f64,
    /// Disqualify subsets whose query term exceeds this.
    pub query_distance_threshold: f64,
    /// Disqualify subsets whose spread term exceeds this.
    pub dataset_distance_threshold: f64,
    /// Disqualify subsets whose keyword term exceeds this.
    pub keyword_similarity_threshold: f64,
    /// Skip threshold gating entirely.
    pub disable_thresholds: bool,
    /// Distance metric for both distance terms.
    pub distance_metric: DistanceMetric,
    /// Keyword-relevance policy for the keyword term.
    pub keyword_relevance: KeywordRelevance,
}

impl CostFunctionConfig {
    /// Configuration with the given weights and the historical
    /// defaults elsewhere: thresholds of `0.7`, gating enabled,
    /// Euclidean distance and pairwise keyword relevance.
    #[must_use]
    pub fn new(alpha: f64, beta: f64, omega: f64) -> Self {
        Self {
            alpha,
            beta,
            omega,
            query_distance_threshold: 0.7,
            dataset_distance_threshold: 0.7,
            keyword_similarity_threshold: 0.7,
            disable_thresholds: false,
            distance_metric: DistanceMetric::Euclidean,
            keyword_relevance: KeywordRelevance::Separated,
        }
    }

    /// Replace the distance metric.
    #[must_use]
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    /// Replace the keyword-relevance policy.
    #[must_use]
    pub fn with_keyword_relevance(mut self, relevance: KeywordRelevance) -> Self {
        self.keyword_relevance = relevance;
        self
    }

    /// Set the three thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, query: f64, dataset: f64, keyword: f64) -> Self {
        self.query_distance_threshold = query;
        self.dataset_distance_threshold = dataset;
        self.keyword_similarity_threshold = keyword;
        self
    }

    /// Turn threshold gating off.
    #[must_use]
    pub fn without_thresholds(mut self) -> Self {
        self.disable_thresholds = true;
        self
    }
}

/// The scoring-formula family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostModel {
    /// Linear combination over worst-case terms:
    /// `alpha·maxQ + beta·maxD + omega·maxK`.
    MaxSum,
    /// Same combination, but the query term takes the distance to the
    /// *nearest* member instead of the farthest.
    NearestSum,
    /// Generalized combination replacing the query term with a power
    /// mean and raising each weighted term to `phi_2`.
    ///
    /// The formula is kept exactly as specified upstream, including
    /// the self-cancelling exponent on the keyword term. Its limit
    /// equivalence to [`Self::MaxSum`] as `phi_1 → ∞, phi_2 → 1` is
    /// asserted only with coarse tolerance; see the tests.
    Minkowski {
        /// Exponent of the query-distance power mean.
        phi_1: f64,
        /// Exponent applied to each weighted term.
        phi_2: f64,
    },
}

/// A scoring function over `(query, subset)` pairs.
///
/// Holds the family, the shared configuration and the optional
/// precalculated stores. The stores are read-only for the lifetime of
/// the function: lookups that miss fall back to direct computation and
/// never write back.
#[derive(Debug, Clone)]
pub struct CostFunction {
    model: CostModel,
    config: CostFunctionConfig,
    stores: PrecalculatedSet,
}

impl CostFunction {
    /// A cost function without precalculated stores.
    #[must_use]
    pub fn new(model: CostModel, config: CostFunctionConfig) -> Self {
        Self::with_stores(model, config, PrecalculatedSet::new())
    }

    /// A cost function consulting the given precalculated stores.
    #[must_use]
    pub fn with_stores(model: CostModel, config: CostFunctionConfig, stores: PrecalculatedSet) -> Self {
        Self {
            model,
            config,
            stores,
        }
    }

    /// The family this function belongs to.
    #[must_use]
    pub fn model(&self) -> CostModel {
        self.model
    }

    /// The shared configuration.
    #[must_use]
    pub fn config(&self) -> &CostFunctionConfig {
        &self.config
    }

    /// Score a subset against a query.
    ///
    /// `canonical` is the denormalized view of the same members, used
    /// to key precalculated lookups when the search runs in normalized
    /// space; pass `None` when `subset` already carries original
    /// coordinates.
    ///
    /// Returns `f64::INFINITY` when threshold gating disqualifies the
    /// subset.
    ///
    /// # Errors
    /// Returns [`CostError`] when the keyword-relevance computation
    /// fails; disqualification is not an error.
    pub fn cost(
        &self,
        query: &TaggedLocation,
        subset: &[&TaggedLocation],
        canonical: Option<&[&TaggedLocation]>,
    ) -> Result<f64, CostError> {
        let key = SubsetKey::new(canonical.unwrap_or(subset));
        let query_term = self.query_aggregation(query, subset, &key);
        let spread_term = self.inter_aggregation(subset, &key);
        let keyword_term = self.keyword_aggregation(query, subset, &key)?;

        if !self.config.disable_thresholds
            && (query_term > self.config.query_distance_threshold
                || spread_term > self.config.dataset_distance_threshold
                || keyword_term > self.config.keyword_similarity_threshold)
        {
            log::debug!(
                "subset disqualified: Q={query_term}, D={spread_term}, K={keyword_term}"
            );
            return Ok(f64::INFINITY);
        }

        let CostFunctionConfig {
            alpha, beta, omega, ..
        } = self.config;
        let cost = match self.model {
            CostModel::MaxSum | CostModel::NearestSum => {
                alpha * query_term + beta * spread_term + omega * keyword_term
            }
            CostModel::Minkowski { phi_2, .. } => {
                let a = (alpha * query_term).powf(phi_2);
                let b = (beta * spread_term).powf(phi_2);
                let c = ((omega * keyword_term).powf(phi_2)).powf(1.0 / phi_2);
                a + b + c
            }
        };
        Ok(cost)
    }

    /// The aggregated query-distance term for this family.
    ///
    /// Consults the query-distance store first; on a miss, aggregates
    /// `distance(query, member)` over all members.
    #[must_use]
    pub fn query_aggregation(
        &self,
        query: &TaggedLocation,
        subset: &[&TaggedLocation],
        key: &SubsetKey,
    ) -> f64 {
        if let Some(value) = consult(self.stores.query_distance.as_ref(), key, "query-distance") {
            return value;
        }
        let distances = subset
            .iter()
            .map(|member| self.config.distance_metric.distance(query.point, member.point));
        match self.model {
            CostModel::MaxSum => distances.fold(0.0, f64::max),
            CostModel::NearestSum => distances.fold(f64::INFINITY, f64::min),
            CostModel::Minkowski { phi_1, .. } => distances
                .map(|d| d.powf(phi_1))
                .sum::<f64>()
                .powf(1.0 / phi_1),
        }
    }

    /// The aggregated inter-group spread term.
    ///
    /// Consults the inter-distance store first; on a miss, takes the
    /// maximum pairwise distance. A singleton subset has spread `0.0`
    /// by definition.
    #[must_use]
    pub fn inter_aggregation(&self, subset: &[&TaggedLocation], key: &SubsetKey) -> f64 {
        if let Some(value) = consult(self.stores.inter_distance.as_ref(), key, "inter-distance") {
            return value;
        }
        if subset.len() <= 1 {
            return 0.0;
        }
        let mut maximum = 0.0_f64;
        for (index, first) in subset.iter().enumerate() {
            for second in &subset[index + 1..] {
                let value = self.config.distance_metric.distance(first.point, second.point);
                maximum = maximum.max(value);
            }
        }
        maximum
    }

    /// The aggregated keyword-relevance term.
    ///
    /// Consults the keyword-similarity store first; on a miss, takes
    /// the maximum relevance distance over all members.
    ///
    /// # Errors
    /// Propagates failures from the injected relevance metric.
    pub fn keyword_aggregation(
        &self,
        query: &TaggedLocation,
        subset: &[&TaggedLocation],
        key: &SubsetKey,
    ) -> Result<f64, CostError> {
        if let Some(value) = consult(
            self.stores.keyword_similarity.as_ref(),
            key,
            "keyword-similarity",
        ) {
            return Ok(value);
        }
        let universe = combined_keyword_universe(query, subset);
        let mut maximum = 0.0_f64;
        for member in subset {
            let value = self.config.keyword_relevance.relevance(
                &query.keywords,
                &member.keywords,
                &universe,
            )?;
            maximum = maximum.max(value);
        }
        Ok(maximum)
    }
}

/// Look up `key` in an optional store.
///
/// A miss on a populated store is logged as a warning: it usually
/// means a store built for different data was passed in. The search
/// still produces a correct result by computing directly.
fn consult(store: Option<&PrecalculatedStore>, key: &SubsetKey, label: &str) -> Option<f64> {
    let store = store?;
    match store.get(key) {
        Some(value) => {
            log::debug!("{label}: precalculated value {value}");
            Some(value)
        }
        None => {
            log::warn!(
                "{label}: no precalculated value for a subset of {} members; computing directly",
                key.len()
            );
            None
        }
    }
}
