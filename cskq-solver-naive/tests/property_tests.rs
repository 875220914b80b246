//! Property-based tests for the exhaustive solver.
//!
//! # Invariants tested
//!
//! - **Enumeration count:** the enumerator emits exactly
//!   `sum(C(n, k))` candidates for `k` in `1..=cap`.
//! - **Partition integrity:** every candidate lands in exactly one
//!   chunk in both partitioning modes.
//! - **Scheduling determinism:** the ranked results are bit-identical
//!   for any worker count and either partitioning mode.
//! - **Threshold monotonicity:** enabling thresholds never lowers a
//!   reported cost.

use cskq_core::{
    CostFunction, CostFunctionConfig, CostModel, DistanceMetric, KeywordRelevance, Solver,
    TaggedLocation,
};
use cskq_solver_naive::{
    partition, subset_count, NaiveSolver, NaiveSolverConfig, SubsetEnumerator,
};
use proptest::prelude::*;

const KEYWORD_POOL: &[&str] = &[
    "food", "fun", "outdoor", "family", "art", "history", "nature", "music",
];

fn location_strategy() -> impl Strategy<Value = TaggedLocation> {
    (
        -50.0_f64..50.0,
        -50.0_f64..50.0,
        proptest::sample::subsequence(KEYWORD_POOL.to_vec(), 1..=4),
    )
        .prop_map(|(x, y, keywords)| TaggedLocation::new(x, y, keywords))
}

fn dataset_strategy() -> impl Strategy<Value = Vec<TaggedLocation>> {
    proptest::collection::vec(location_strategy(), 1..=5)
}

fn max_sum(alpha: f64, beta: f64, omega: f64) -> CostFunction {
    CostFunction::new(
        CostModel::MaxSum,
        CostFunctionConfig::new(alpha, beta, omega)
            .with_distance_metric(DistanceMetric::Euclidean)
            .with_keyword_relevance(KeywordRelevance::Separated)
            .without_thresholds(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn enumerator_count_matches_the_formula(n in 1_usize..=9, cap in 1_usize..=9) {
        let emitted: Vec<Vec<usize>> = SubsetEnumerator::new(n, cap).collect();
        prop_assert_eq!(emitted.len() as u128, subset_count(n, cap));
        let bound = cap.min(n);
        for subset in &emitted {
            prop_assert!((1..=bound).contains(&subset.len()));
        }
    }

    #[test]
    fn partitioning_loses_nothing(
        items in proptest::collection::vec(any::<u32>(), 0..200),
        chunks in 1_usize..=8,
        rebalance in any::<bool>(),
    ) {
        let mut expected = items.clone();
        let mut seen: Vec<u32> = partition(items, chunks, rebalance)
            .into_iter()
            .flatten()
            .collect();
        expected.sort_unstable();
        seen.sort_unstable();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn ranking_is_independent_of_scheduling(
        query in location_strategy(),
        dataset in dataset_strategy(),
        worker_count in 2_usize..=6,
        rebalance in any::<bool>(),
    ) {
        let solve = |workers: usize, interleave: bool| {
            NaiveSolver::with_config(
                query.clone(),
                dataset.clone(),
                max_sum(0.3, 0.3, 0.4),
                NaiveSolverConfig {
                    result_length: 5,
                    normalize: false,
                    worker_count: Some(workers),
                    rebalance: interleave,
                    ..NaiveSolverConfig::default()
                },
            )
            .solve()
        };
        let baseline = solve(1, false);
        prop_assert_eq!(solve(worker_count, rebalance), baseline);
    }

    #[test]
    fn thresholds_never_lower_the_cost(
        query in location_strategy(),
        dataset in dataset_strategy(),
        query_threshold in 0.0_f64..100.0,
        dataset_threshold in 0.0_f64..100.0,
        keyword_threshold in 0.0_f64..1.0,
    ) {
        let gated = CostFunction::new(
            CostModel::MaxSum,
            CostFunctionConfig::new(0.3, 0.3, 0.4)
                .with_thresholds(query_threshold, dataset_threshold, keyword_threshold),
        );
        let open = max_sum(0.3, 0.3, 0.4);
        let members: Vec<&TaggedLocation> = dataset.iter().collect();
        let gated_cost = gated.cost(&query, &members, None);
        let open_cost = open.cost(&query, &members, None);
        match (gated_cost, open_cost) {
            (Ok(gated_cost), Ok(open_cost)) => prop_assert!(gated_cost >= open_cost),
            (gated_result, open_result) => prop_assert_eq!(gated_result, open_result),
        }
    }

    #[test]
    fn singleton_subsets_have_zero_spread(
        query in location_strategy(),
        member in location_strategy(),
    ) {
        let function = max_sum(0.0, 1.0, 0.0);
        let cost = function.cost(&query, &[&member], None);
        prop_assert_eq!(cost, Ok(0.0));
    }
}
