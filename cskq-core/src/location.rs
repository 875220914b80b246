//! Geotagged, keyword-tagged locations and their canonical identity.
//!
//! A [`TaggedLocation`] pairs a 2D position with an ordered keyword
//! list. Equality and hashing go through [`LocationKey`], which rounds
//! coordinates to a fixed precision so that the two stay consistent and
//! locations keep the same identity after a normalize/denormalize
//! round-trip.

use geo::Coord;

/// Coordinate precision used for identity comparisons.
///
/// Coordinates are rounded to this resolution before equality and
/// hashing, so positions closer than `1e-6` on both axes compare equal.
pub const COORD_PRECISION: f64 = 1e-6;

/// A dataset element or query: a point with an ordered keyword list.
///
/// # Examples
///
/// ```
/// use cskq_core::TaggedLocation;
///
/// let site = TaggedLocation::new(1.0, 2.0, ["food", "fun"]);
/// assert_eq!(site.keywords, vec!["food", "fun"]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaggedLocation {
    /// Position, `x`/`y` in whatever scale the caller works in.
    pub point: Coord<f64>,
    /// Ordered keyword list; order matters for identity.
    pub keywords: Vec<String>,
    /// Optional display name; ignored by equality and hashing.
    pub name: Option<String>,
}

impl TaggedLocation {
    /// Construct a location from raw coordinates and keywords.
    pub fn new<I, S>(x: f64, y: f64, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            point: Coord { x, y },
            keywords: keywords.into_iter().map(Into::into).collect(),
            name: None,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The canonical identity of this location.
    #[must_use]
    pub fn key(&self) -> LocationKey {
        LocationKey::new(self)
    }
}

impl PartialEq for TaggedLocation {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TaggedLocation {}

impl std::hash::Hash for TaggedLocation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// An ordered collection of locations.
///
/// Insertion order is irrelevant to results but must stay stable: it
/// drives the reproducible enumeration order of candidate subsets.
pub type Dataset = Vec<TaggedLocation>;

/// Canonical, hashable identity of a [`TaggedLocation`].
///
/// Coordinates are stored as integer multiples of
/// [`COORD_PRECISION`]; keywords are kept in sequence. Two locations
/// with the same key are the same point for memoization purposes, no
/// matter which coordinate space they were observed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey {
    x: i64,
    y: i64,
    keywords: Vec<String>,
}

impl LocationKey {
    fn new(location: &TaggedLocation) -> Self {
        Self {
            x: quantize(location.point.x),
            y: quantize(location.point.y),
            keywords: location.keywords.clone(),
        }
    }
}

fn quantize(value: f64) -> i64 {
    // Saturates at the i64 range; datasets are nowhere near it.
    let scaled = (value / COORD_PRECISION).round();
    if scaled >= i64::MAX as f64 {
        i64::MAX
    } else if scaled <= i64::MIN as f64 {
        i64::MIN
    } else {
        scaled as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(location: &TaggedLocation) -> u64 {
        let mut hasher = DefaultHasher::new();
        location.hash(&mut hasher);
        hasher.finish()
    }

    #[rstest]
    #[case(1.0, 1.0, 1.0, 1.0, true)]
    // Differences below the precision threshold collapse to equal.
    #[case(1.0, 1.0, 1.0 + 1e-9, 1.0, true)]
    #[case(1.0, 1.0, 1.0 + 1e-3, 1.0, false)]
    #[case(1.0, 1.0, 1.0, 2.0, false)]
    fn equality_rounds_coordinates(
        #[case] x1: f64,
        #[case] y1: f64,
        #[case] x2: f64,
        #[case] y2: f64,
        #[case] expected: bool,
    ) {
        let a = TaggedLocation::new(x1, y1, ["food"]);
        let b = TaggedLocation::new(x2, y2, ["food"]);
        assert_eq!(a == b, expected);
        if expected {
            assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[rstest]
    fn keyword_order_is_part_of_identity() {
        let a = TaggedLocation::new(0.0, 0.0, ["food", "fun"]);
        let b = TaggedLocation::new(0.0, 0.0, ["fun", "food"]);
        assert_ne!(a, b);
    }

    #[rstest]
    fn name_does_not_affect_identity() {
        let a = TaggedLocation::new(0.0, 0.0, ["food"]).with_name("a");
        let b = TaggedLocation::new(0.0, 0.0, ["food"]).with_name("b");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }
}
