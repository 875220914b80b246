//! Offline precomputation of the three partial-metric stores.
//!
//! This is the same enumeration pipeline as a search, run once without
//! the top-N cutoff, recording every subset's aggregated query
//! distance, inter-group distance and keyword relevance. The values
//! are computed in the same coordinate space a search with the same
//! options would use and keyed by the canonical (original-scale)
//! subset identity, so a later search given the resulting stores
//! returns results identical to a direct search.

use cskq_core::{
    normalize, CostFunction, CostFunctionConfig, CostModel, PrecalculatedSet, PrecalculatedStore,
    SolveError, SubsetKey, TaggedLocation,
};

use crate::enumerate::SubsetEnumerator;
use crate::partition::partition;
use crate::run_partitioned;

/// Options controlling a precomputation pass.
///
/// `normalize` must match the searches that will consume the stores;
/// values computed in one coordinate space are meaningless in the
/// other.
#[derive(Debug, Clone)]
pub struct PrecomputeOptions {
    /// Ceiling on subset size; clamped to the dataset size.
    pub max_subset_size: usize,
    /// Compute values in normalized unit-square coordinates.
    pub normalize: bool,
    /// Worker thread count; defaults to the available hardware
    /// parallelism.
    pub worker_count: Option<usize>,
    /// Interleave candidates round-robin across workers.
    pub rebalance: bool,
}

impl Default for PrecomputeOptions {
    fn default() -> Self {
        Self {
            max_subset_size: usize::MAX,
            normalize: true,
            worker_count: None,
            rebalance: false,
        }
    }
}

/// Populate the three precalculated stores for every candidate subset.
///
/// The given model and configuration define the aggregation semantics
/// (which extremum the query term takes, the distance metric, the
/// relevance policy); stores built for one cost function are only
/// meaningful to searches using the same one.
///
/// # Errors
/// Returns [`SolveError`] for an empty dataset, a zero subset-size
/// ceiling, or when a keyword-relevance computation fails.
pub fn precompute_stores(
    query: &TaggedLocation,
    dataset: &[TaggedLocation],
    model: CostModel,
    config: CostFunctionConfig,
    options: &PrecomputeOptions,
) -> Result<PrecalculatedSet, SolveError> {
    if dataset.is_empty() {
        return Err(SolveError::EmptyDataset);
    }
    if options.max_subset_size == 0 {
        return Err(SolveError::ZeroSubsetSize);
    }
    let cost_function = CostFunction::new(model, config);
    let (search_query, search_dataset, normalized) = if options.normalize {
        let (normalized_query, normalized_dataset, _) = normalize(query, dataset);
        (normalized_query, normalized_dataset, true)
    } else {
        (query.clone(), dataset.to_vec(), false)
    };

    let candidates: Vec<Vec<usize>> =
        SubsetEnumerator::new(dataset.len(), options.max_subset_size).collect();
    let worker_count = options
        .worker_count
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get));
    log::debug!(
        "precomputing {} subsets across {} workers",
        candidates.len(),
        worker_count
    );
    let chunks = partition(candidates, worker_count, options.rebalance);

    let batches = run_partitioned(chunks, |chunk| {
        let mut values = Vec::with_capacity(chunk.len());
        for indices in chunk {
            let subset: Vec<&TaggedLocation> =
                indices.iter().map(|&index| &search_dataset[index]).collect();
            let key = if normalized {
                let canonical: Vec<&TaggedLocation> =
                    indices.iter().map(|&index| &dataset[index]).collect();
                SubsetKey::new(&canonical)
            } else {
                SubsetKey::new(&subset)
            };
            let query_distance = cost_function.query_aggregation(&search_query, &subset, &key);
            let inter_distance = cost_function.inter_aggregation(&subset, &key);
            let keyword = cost_function.keyword_aggregation(&search_query, &subset, &key)?;
            values.push((key, query_distance, inter_distance, keyword));
        }
        Ok(values)
    })?;

    let mut query_store = PrecalculatedStore::new();
    let mut inter_store = PrecalculatedStore::new();
    let mut keyword_store = PrecalculatedStore::new();
    for batch in batches {
        for (key, query_distance, inter_distance, keyword) in batch {
            query_store.insert(key.clone(), query_distance);
            inter_store.insert(key.clone(), inter_distance);
            keyword_store.insert(key, keyword);
        }
    }
    Ok(PrecalculatedSet {
        query_distance: Some(query_store),
        inter_distance: Some(inter_store),
        keyword_similarity: Some(keyword_store),
    })
}
