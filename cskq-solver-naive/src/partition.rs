//! Splitting candidate lists into per-worker chunks.
//!
//! Contiguous slicing groups same-size subsets together, and
//! evaluation cost grows with subset size, so contiguous chunks load
//! workers unevenly. The rebalancing mode deals candidates round-robin
//! instead, spreading each size class across all workers.

/// Split `items` into at most `chunks` balanced groups.
///
/// Contiguous mode preserves enumeration order within each chunk and
/// sizes differ by at most one. Rebalancing mode interleaves items
/// round-robin across chunks. Empty chunks are never returned.
///
/// # Examples
///
/// ```
/// use cskq_solver_naive::partition;
///
/// let contiguous = partition(vec![1, 2, 3, 4, 5], 2, false);
/// assert_eq!(contiguous, vec![vec![1, 2, 3], vec![4, 5]]);
///
/// let interleaved = partition(vec![1, 2, 3, 4, 5], 2, true);
/// assert_eq!(interleaved, vec![vec![1, 3, 5], vec![2, 4]]);
/// ```
#[must_use]
pub fn partition<T>(items: Vec<T>, chunks: usize, rebalance: bool) -> Vec<Vec<T>> {
    if items.is_empty() || chunks == 0 {
        return Vec::new();
    }
    let chunk_count = chunks.min(items.len());
    if rebalance {
        let capacity = items.len().div_ceil(chunk_count);
        let mut partitions: Vec<Vec<T>> =
            (0..chunk_count).map(|_| Vec::with_capacity(capacity)).collect();
        for (index, item) in items.into_iter().enumerate() {
            partitions[index % chunk_count].push(item);
        }
        partitions
    } else {
        let base = items.len() / chunk_count;
        let remainder = items.len() % chunk_count;
        let mut partitions = Vec::with_capacity(chunk_count);
        let mut items = items.into_iter();
        for index in 0..chunk_count {
            let size = base + usize::from(index < remainder);
            partitions.push(items.by_ref().take(size).collect());
        }
        partitions
    }
}
