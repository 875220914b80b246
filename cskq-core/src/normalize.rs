//! Coordinate normalization for numerically stable distance
//! comparisons.
//!
//! A search may run internally in a unit coordinate space; the
//! parameters captured here invert the transform before results are
//! returned. Degenerate axes (all points share the same value) map to
//! `0.0` uniformly — the inverse transform restores the shared
//! original value, so round-trips stay lossless.

use crate::location::{Dataset, TaggedLocation};
use crate::solver::Solution;

/// Parameters needed to undo a normalization.
///
/// Captured once per query+dataset pair and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizationParams {
    /// Largest x over the union of query and dataset.
    pub max_x: f64,
    /// Smallest x over the union of query and dataset.
    pub min_x: f64,
    /// Largest y over the union of query and dataset.
    pub max_y: f64,
    /// Smallest y over the union of query and dataset.
    pub min_y: f64,
}

impl NormalizationParams {
    fn scale(extent: f64, value: f64, min: f64) -> f64 {
        if extent == 0.0 {
            // Zero-width axis: every point collapses to 0.0.
            0.0
        } else {
            (value - min) / extent
        }
    }

    fn forward(&self, location: &mut TaggedLocation) {
        location.point.x = Self::scale(self.max_x - self.min_x, location.point.x, self.min_x);
        location.point.y = Self::scale(self.max_y - self.min_y, location.point.y, self.min_y);
    }

    fn inverse(&self, location: &mut TaggedLocation) {
        location.point.x = location.point.x * (self.max_x - self.min_x) + self.min_x;
        location.point.y = location.point.y * (self.max_y - self.min_y) + self.min_y;
    }
}

/// Remap the query and dataset into the unit square.
///
/// Returns the normalized query, the normalized dataset and the
/// parameters required to invert the transform. Keywords and names are
/// untouched.
#[must_use]
pub fn normalize(
    query: &TaggedLocation,
    dataset: &[TaggedLocation],
) -> (TaggedLocation, Dataset, NormalizationParams) {
    let xs = dataset.iter().chain(std::iter::once(query)).map(|l| l.point.x);
    let ys = dataset.iter().chain(std::iter::once(query)).map(|l| l.point.y);
    let params = NormalizationParams {
        max_x: xs.clone().fold(f64::NEG_INFINITY, f64::max),
        min_x: xs.fold(f64::INFINITY, f64::min),
        max_y: ys.clone().fold(f64::NEG_INFINITY, f64::max),
        min_y: ys.fold(f64::INFINITY, f64::min),
    };
    let mut normalized_query = query.clone();
    params.forward(&mut normalized_query);
    let mut normalized_dataset = dataset.to_vec();
    for location in &mut normalized_dataset {
        params.forward(location);
    }
    log::debug!(
        "normalized {} locations into [{}, {}] x [{}, {}]",
        normalized_dataset.len(),
        params.min_x,
        params.max_x,
        params.min_y,
        params.max_y
    );
    (normalized_query, normalized_dataset, params)
}

/// Map winning subsets' coordinates back to the original scale.
#[must_use]
pub fn denormalize_solutions(
    solutions: Vec<Solution>,
    params: &NormalizationParams,
) -> Vec<Solution> {
    solutions
        .into_iter()
        .map(|mut solution| {
            for member in &mut solution.members {
                params.inverse(member);
            }
            solution
        })
        .collect()
}
