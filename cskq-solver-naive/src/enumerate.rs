//! Exhaustive subset enumeration over dataset index positions.
//!
//! Candidates are emitted in a deterministic order — increasing size,
//! then lexicographic within each size — so that a search is
//! reproducible run to run and the canonical tie-break in the top-N
//! merge has a stable meaning.

/// Iterator over every index combination of size `1..=max_subset_size`.
///
/// The total number of candidates is `sum(C(n, k))` for `k` in that
/// range, which is exponential in `n` when the ceiling is
/// unconstrained; callers bound the ceiling for large datasets.
///
/// # Examples
///
/// ```
/// use cskq_solver_naive::SubsetEnumerator;
///
/// let subsets: Vec<Vec<usize>> = SubsetEnumerator::new(3, 2).collect();
/// assert_eq!(
///     subsets,
///     vec![
///         vec![0], vec![1], vec![2],
///         vec![0, 1], vec![0, 2], vec![1, 2],
///     ],
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SubsetEnumerator {
    n: usize,
    max_size: usize,
    // Next combination to emit, or None once exhausted.
    current: Option<Vec<usize>>,
}

impl SubsetEnumerator {
    /// Enumerate subsets of `0..n` up to `min(n, max_subset_size)`
    /// members.
    #[must_use]
    pub fn new(n: usize, max_subset_size: usize) -> Self {
        let max_size = max_subset_size.min(n);
        let current = (n > 0 && max_size > 0).then(|| vec![0]);
        Self {
            n,
            max_size,
            current,
        }
    }

    /// Advance `combination` to its lexicographic successor of the
    /// same size, or report exhaustion of that size.
    fn step(n: usize, combination: &mut [usize]) -> bool {
        let k = combination.len();
        // Find the rightmost position that can still move.
        for offset in (0..k).rev() {
            if combination[offset] < n - k + offset {
                combination[offset] += 1;
                for position in offset + 1..k {
                    combination[position] = combination[position - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for SubsetEnumerator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.as_mut()?;
        let emitted = current.clone();
        if !Self::step(self.n, current) {
            // Move to the next size, starting from 0..k+1.
            let next_size = current.len() + 1;
            self.current = (next_size <= self.max_size).then(|| (0..next_size).collect());
        }
        Some(emitted)
    }
}

/// Number of candidates [`SubsetEnumerator`] emits for the given
/// bounds.
///
/// Saturates at `u128::MAX`; datasets large enough to hit that are far
/// beyond exhaustive search anyway.
#[must_use]
pub fn subset_count(n: usize, max_subset_size: usize) -> u128 {
    let max_size = max_subset_size.min(n);
    let mut total: u128 = 0;
    let mut binomial: u128 = 1;
    for k in 1..=max_size {
        // C(n, k) = C(n, k-1) * (n - k + 1) / k
        binomial = binomial
            .saturating_mul((n - k + 1) as u128)
            .checked_div(k as u128)
            .unwrap_or(u128::MAX);
        total = total.saturating_add(binomial);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(1, 1, 1)]
    #[case(3, 3, 7)]
    #[case(5, 5, 31)]
    #[case(5, 2, 15)]
    #[case(10, 3, 175)]
    // Ceiling above n clamps to n.
    #[case(4, 10, 15)]
    fn emits_expected_counts(#[case] n: usize, #[case] max: usize, #[case] expected: u128) {
        let emitted = SubsetEnumerator::new(n, max).count();
        assert_eq!(emitted as u128, expected);
        assert_eq!(subset_count(n, max), expected);
    }

    #[rstest]
    fn empty_dataset_emits_nothing() {
        assert_eq!(SubsetEnumerator::new(0, 3).count(), 0);
        assert_eq!(subset_count(0, 3), 0);
    }

    #[rstest]
    fn sizes_stay_within_bounds_and_subsets_are_unique() {
        let subsets: Vec<Vec<usize>> = SubsetEnumerator::new(6, 4).collect();
        let distinct: HashSet<Vec<usize>> = subsets.iter().cloned().collect();
        assert_eq!(distinct.len(), subsets.len());
        for subset in &subsets {
            assert!((1..=4).contains(&subset.len()));
            assert!(subset.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(subset.iter().all(|&index| index < 6));
        }
    }

    #[rstest]
    fn order_is_size_then_lexicographic() {
        let subsets: Vec<Vec<usize>> = SubsetEnumerator::new(4, 3).collect();
        for pair in subsets.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            assert!(
                left.len() < right.len() || (left.len() == right.len() && left < right),
                "{left:?} before {right:?}"
            );
        }
    }

    #[rstest]
    fn enumeration_is_reproducible() {
        let first: Vec<Vec<usize>> = SubsetEnumerator::new(7, 3).collect();
        let second: Vec<Vec<usize>> = SubsetEnumerator::new(7, 3).collect();
        assert_eq!(first, second);
    }
}
