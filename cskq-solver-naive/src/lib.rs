//! Exhaustive top-N subset search over a keyword-tagged dataset.
//!
//! The naive solver evaluates *every* subset of the dataset up to a
//! configured size ceiling — no pruning, no heuristics — and returns
//! the `N` cheapest under a [`CostFunction`]. The search is
//! embarrassingly parallel: candidates are partitioned across a fixed
//! pool of scoped worker threads that share no mutable state and
//! return owned result sets to a single collector. Because the top-N
//! merge is commutative with a deterministic tie-break, the final
//! ranking is identical for any worker count.
//!
//! [`precompute_stores`] runs the same pipeline without the top-N
//! cutoff to populate [`PrecalculatedSet`]s for later searches over
//! the same data.

#![forbid(unsafe_code)]

mod enumerate;
mod partition;
mod precompute;
mod topn;

pub use enumerate::{subset_count, SubsetEnumerator};
pub use partition::partition;
pub use precompute::{precompute_stores, PrecomputeOptions};
pub use topn::{RankedCandidate, TopNSelector};

use cskq_core::{
    denormalize_solutions, normalize, CostError, CostFunction, Dataset, Solution, SolveError,
    Solver, TaggedLocation,
};

/// Tuning knobs for a [`NaiveSolver`] search.
#[derive(Debug, Clone)]
pub struct NaiveSolverConfig {
    /// How many solutions to return (the `N` in top-N).
    pub result_length: usize,
    /// Ceiling on subset size; clamped to the dataset size.
    pub max_subset_size: usize,
    /// Run the search in normalized unit-square coordinates.
    pub normalize: bool,
    /// Worker thread count; defaults to the available hardware
    /// parallelism.
    pub worker_count: Option<usize>,
    /// Interleave candidates round-robin across workers instead of
    /// contiguous slicing, evening out the size-correlated load.
    pub rebalance: bool,
}

impl Default for NaiveSolverConfig {
    fn default() -> Self {
        Self {
            result_length: 10,
            max_subset_size: usize::MAX,
            normalize: true,
            worker_count: None,
            rebalance: false,
        }
    }
}

/// Exhaustive solver over every subset of the dataset.
///
/// # Examples
///
/// ```
/// use cskq_core::{CostFunction, CostFunctionConfig, CostModel, Solver, TaggedLocation};
/// use cskq_solver_naive::{NaiveSolver, NaiveSolverConfig};
///
/// let query = TaggedLocation::new(0.0, 0.0, ["food"]);
/// let dataset = vec![
///     TaggedLocation::new(1.0, 1.0, ["food"]),
///     TaggedLocation::new(5.0, 5.0, ["food"]),
/// ];
/// let cost_function = CostFunction::new(
///     CostModel::MaxSum,
///     CostFunctionConfig::new(1.0, 0.0, 0.0).without_thresholds(),
/// );
/// let solver = NaiveSolver::with_config(
///     query,
///     dataset,
///     cost_function,
///     NaiveSolverConfig {
///         result_length: 1,
///         normalize: false,
///         ..NaiveSolverConfig::default()
///     },
/// );
/// let results = solver.solve()?;
/// assert_eq!(results[0].members.len(), 1);
/// # Ok::<(), cskq_core::SolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NaiveSolver {
    query: TaggedLocation,
    dataset: Dataset,
    cost_function: CostFunction,
    config: NaiveSolverConfig,
}

impl NaiveSolver {
    /// A solver with default configuration.
    #[must_use]
    pub fn new(query: TaggedLocation, dataset: Dataset, cost_function: CostFunction) -> Self {
        Self::with_config(query, dataset, cost_function, NaiveSolverConfig::default())
    }

    /// A solver with explicit configuration.
    #[must_use]
    pub fn with_config(
        query: TaggedLocation,
        dataset: Dataset,
        cost_function: CostFunction,
        config: NaiveSolverConfig,
    ) -> Self {
        Self {
            query,
            dataset,
            cost_function,
            config,
        }
    }

    fn validate(&self) -> Result<(), SolveError> {
        if self.dataset.is_empty() {
            return Err(SolveError::EmptyDataset);
        }
        if self.config.result_length == 0 {
            return Err(SolveError::ZeroResultLength);
        }
        if self.config.max_subset_size == 0 {
            return Err(SolveError::ZeroSubsetSize);
        }
        Ok(())
    }
}

impl Solver for NaiveSolver {
    fn solve(&self) -> Result<Vec<Solution>, SolveError> {
        self.validate()?;
        let n = self.dataset.len();
        let (search_query, search_dataset, params) = if self.config.normalize {
            let (query, dataset, params) = normalize(&self.query, &self.dataset);
            (query, dataset, Some(params))
        } else {
            (self.query.clone(), self.dataset.clone(), None)
        };

        let candidates: Vec<Vec<usize>> =
            SubsetEnumerator::new(n, self.config.max_subset_size).collect();
        let worker_count = self.config.worker_count.unwrap_or_else(default_parallelism);
        log::debug!(
            "evaluating {} candidate subsets across {} workers (rebalance: {})",
            candidates.len(),
            worker_count,
            self.config.rebalance
        );
        let chunks = partition(candidates, worker_count, self.config.rebalance);

        let normalized = params.is_some();
        let selectors = run_partitioned(chunks, |chunk| {
            let mut selector = TopNSelector::new(self.config.result_length);
            for indices in chunk {
                let subset: Vec<&TaggedLocation> =
                    indices.iter().map(|&index| &search_dataset[index]).collect();
                let cost = if normalized {
                    let canonical: Vec<&TaggedLocation> =
                        indices.iter().map(|&index| &self.dataset[index]).collect();
                    self.cost_function
                        .cost(&search_query, &subset, Some(&canonical))?
                } else {
                    self.cost_function.cost(&search_query, &subset, None)?
                };
                selector.push(RankedCandidate { cost, indices });
            }
            Ok(selector)
        })?;

        let mut merged = TopNSelector::new(self.config.result_length);
        for selector in selectors {
            merged.merge(selector);
        }
        let solutions: Vec<Solution> = merged
            .into_ranked()
            .into_iter()
            .map(|candidate| Solution {
                cost: candidate.cost,
                members: candidate
                    .indices
                    .iter()
                    .map(|&index| search_dataset[index].clone())
                    .collect(),
            })
            .collect();
        Ok(match params {
            Some(params) => denormalize_solutions(solutions, &params),
            None => solutions,
        })
    }
}

/// Hardware parallelism, falling back to one worker when unknown.
fn default_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Evaluate chunks on scoped worker threads and collect their owned
/// outputs. The first worker error aborts the whole run.
pub(crate) fn run_partitioned<T, F>(
    chunks: Vec<Vec<Vec<usize>>>,
    worker: F,
) -> Result<Vec<T>, CostError>
where
    T: Send,
    F: Fn(Vec<Vec<usize>>) -> Result<T, CostError> + Sync,
{
    std::thread::scope(|scope| {
        let worker = &worker;
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| scope.spawn(move || worker(chunk)))
            .collect();
        let mut outputs = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            outputs.push(result?);
        }
        Ok(outputs)
    })
}
