//! Pluggable distance metrics over [`Coord`] pairs.
//!
//! A closed enum keeps dispatch branch-predictable in the per-subset
//! evaluation loop; every metric is pure and total.

use geo::{Coord, Distance, Haversine, Point};

/// Distance between two coordinates.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use cskq_core::DistanceMetric;
///
/// let a = Coord { x: 3.0, y: 4.0 };
/// let b = Coord { x: 7.0, y: 2.0 };
/// let d = DistanceMetric::Manhattan.distance(a, b);
/// assert_eq!(d, 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMetric {
    /// Straight-line distance in the coordinate plane.
    #[default]
    Euclidean,
    /// Axis-aligned (taxicab) distance.
    Manhattan,
    /// Great-circle distance in metres; `x` is longitude, `y` is
    /// latitude in degrees.
    Haversine,
}

impl DistanceMetric {
    /// Distance between `a` and `b` under this metric.
    #[must_use]
    pub fn distance(self, a: Coord<f64>, b: Coord<f64>) -> f64 {
        match self {
            Self::Euclidean => ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt(),
            Self::Manhattan => (a.x - b.x).abs() + (a.y - b.y).abs(),
            Self::Haversine => Haversine.distance(Point::from(a), Point::from(b)),
        }
    }
}
