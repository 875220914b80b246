//! Consistency between direct searches and searches backed by
//! precomputed stores.

use cskq_core::{
    CostFunction, CostFunctionConfig, CostModel, DistanceMetric, KeywordRelevance, Solver,
    TaggedLocation,
};
use cskq_solver_naive::{
    precompute_stores, subset_count, NaiveSolver, NaiveSolverConfig, PrecomputeOptions,
};
use rstest::rstest;

fn fixture() -> (TaggedLocation, Vec<TaggedLocation>) {
    let query = TaggedLocation::new(0.0, 0.0, ["food", "fun", "outdoor", "family"]);
    let dataset = vec![
        TaggedLocation::new(1.0, 1.0, ["food", "fun", "outdoor"]),
        TaggedLocation::new(2.0, 2.0, ["food", "fun"]),
        TaggedLocation::new(3.0, 3.0, ["food"]),
        TaggedLocation::new(4.0, 4.0, ["food"]),
        TaggedLocation::new(5.0, 5.0, ["food"]),
    ];
    (query, dataset)
}

fn config(alpha: f64, beta: f64, omega: f64) -> CostFunctionConfig {
    CostFunctionConfig::new(alpha, beta, omega)
        .with_distance_metric(DistanceMetric::Euclidean)
        .with_keyword_relevance(KeywordRelevance::Combined)
        .without_thresholds()
}

#[rstest]
#[case(CostModel::MaxSum, false)]
#[case(CostModel::MaxSum, true)]
#[case(CostModel::NearestSum, false)]
#[case(CostModel::Minkowski { phi_1: 2.0, phi_2: 1.0 }, false)]
fn cached_search_matches_direct_search(#[case] model: CostModel, #[case] normalize: bool) {
    let (query, dataset) = fixture();
    let solver_config = NaiveSolverConfig {
        result_length: 10,
        normalize,
        ..NaiveSolverConfig::default()
    };

    let direct = NaiveSolver::with_config(
        query.clone(),
        dataset.clone(),
        CostFunction::new(model, config(0.3, 0.3, 0.4)),
        solver_config.clone(),
    )
    .solve()
    .expect("direct search succeeds");

    let options = PrecomputeOptions {
        normalize,
        ..PrecomputeOptions::default()
    };
    let stores = precompute_stores(&query, &dataset, model, config(0.3, 0.3, 0.4), &options)
        .expect("precompute succeeds");
    let cached = NaiveSolver::with_config(
        query,
        dataset,
        CostFunction::with_stores(model, config(0.3, 0.3, 0.4), stores),
        solver_config,
    )
    .solve()
    .expect("cached search succeeds");

    assert_eq!(cached.len(), direct.len());
    for (cached_solution, direct_solution) in cached.iter().zip(&direct) {
        assert!(
            (cached_solution.cost - direct_solution.cost).abs() < 1e-9,
            "{} vs {}",
            cached_solution.cost,
            direct_solution.cost
        );
        assert_eq!(cached_solution.members, direct_solution.members);
    }
}

#[rstest]
fn stores_cover_the_whole_candidate_space() {
    let (query, dataset) = fixture();
    let stores = precompute_stores(
        &query,
        &dataset,
        CostModel::MaxSum,
        config(0.3, 0.3, 0.4),
        &PrecomputeOptions {
            normalize: false,
            ..PrecomputeOptions::default()
        },
    )
    .expect("precompute succeeds");
    let expected = subset_count(dataset.len(), dataset.len());
    assert_eq!(
        stores.query_distance.expect("query store").len() as u128,
        expected
    );
    assert_eq!(
        stores.inter_distance.expect("inter store").len() as u128,
        expected
    );
    assert_eq!(
        stores.keyword_similarity.expect("keyword store").len() as u128,
        expected
    );
}

#[rstest]
fn stores_respect_the_subset_ceiling() {
    let (query, dataset) = fixture();
    let stores = precompute_stores(
        &query,
        &dataset,
        CostModel::MaxSum,
        config(0.3, 0.3, 0.4),
        &PrecomputeOptions {
            max_subset_size: 2,
            normalize: false,
            ..PrecomputeOptions::default()
        },
    )
    .expect("precompute succeeds");
    assert_eq!(
        stores.query_distance.expect("query store").len() as u128,
        subset_count(dataset.len(), 2)
    );
}
