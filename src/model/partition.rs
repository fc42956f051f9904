//! # Chunk Partitioning
//!
//! ## Role
//! Split a flattened sequence of `total` elements into exactly `n` contiguous
//! chunk descriptors, one per worker.
//!
//! ## Chunk Size
//! ```text
//! chunk_size = total % n + total / n
//! ```
//! This is not a ceiling-division split. Every chunk gets the same nominal
//! length, remainder included, so the tail chunks run past the end of the
//! sequence and are clipped, or come out empty. For `total = 10, n = 3` the
//! size is `4` and the chunks are `[0, 4)`, `[4, 8)` and `[8, 10)`.
//!
//! Since `n * chunk_size = total + (n - 1) * (total % n) >= total`, the
//! clipped chunks always cover every index, and they are disjoint because
//! starts advance by exactly `chunk_size`.
//!
//! Do not replace this with an even split: chunk boundaries fix the
//! floating-point accumulation order, and totals must stay reproducible.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Nominal chunk length for `total` elements over `workers` chunks.
#[inline]
pub fn chunk_size(total: usize, workers: NonZeroUsize) -> usize {
    let n = workers.get();
    total % n + total / n
}

/// A contiguous sub-range of the flattened sequence assigned to one worker.
///
/// `start + len` may exceed the sequence length; use [`Chunk::clipped`]
/// before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Position in chunk order (0-based); also the reduce order
    pub index: usize,
    pub start: usize,
    pub len: usize,
}

impl Chunk {
    /// Index range clipped to a sequence of `total` elements.
    ///
    /// Chunks starting at or beyond `total` yield an empty range.
    #[inline]
    pub fn clipped(&self, total: usize) -> Range<usize> {
        let start = self.start.min(total);
        let end = self.start.saturating_add(self.len).min(total);
        start..end
    }

    #[inline]
    pub fn clipped_len(&self, total: usize) -> usize {
        self.clipped(total).len()
    }
}

/// The chunks for one summation call.
///
/// Descriptors are computed on demand from `(total, chunk_size, workers)`;
/// nothing is allocated per worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    total: usize,
    chunk_size: usize,
    workers: NonZeroUsize,
}

impl Partition {
    pub fn new(total: usize, workers: NonZeroUsize) -> Self {
        Self {
            total,
            chunk_size: chunk_size(total, workers),
            workers,
        }
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Descriptor for chunk `index`, if `index < len()`
    #[inline]
    pub fn chunk(&self, index: usize) -> Option<Chunk> {
        (index < self.len()).then(|| Chunk {
            index,
            start: index.saturating_mul(self.chunk_size),
            len: self.chunk_size,
        })
    }

    /// All chunks in chunk order
    pub fn chunks(&self) -> impl Iterator<Item = Chunk> + '_ {
        (0..self.len()).filter_map(move |index| self.chunk(index))
    }

    /// Number of chunks (always the worker count)
    #[inline]
    pub fn len(&self) -> usize {
        self.workers.get()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Chunks that receive at least one element after clipping
    pub fn n_nonempty(&self) -> usize {
        if self.chunk_size == 0 {
            return 0;
        }
        let reached = self.total / self.chunk_size + usize::from(self.total % self.chunk_size != 0);
        reached.min(self.len())
    }

    /// Clipped ranges in chunk order
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.chunks().map(move |chunk| chunk.clipped(self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_chunk_size_formula() {
        assert_eq!(chunk_size(10, nz(3)), 4);
        assert_eq!(chunk_size(10, nz(1)), 10);
        assert_eq!(chunk_size(12, nz(4)), 3);
        // Remainder dominates when n is large relative to total
        assert_eq!(chunk_size(10, nz(6)), 5);
        assert_eq!(chunk_size(2, nz(5)), 2);
        assert_eq!(chunk_size(0, nz(4)), 0);
    }

    #[test]
    fn test_ten_over_three() {
        let p = Partition::new(10, nz(3));
        assert_eq!(p.chunk_size(), 4);
        let starts: Vec<usize> = p.chunks().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 4, 8]);
        let ranges: Vec<Range<usize>> = p.ranges().collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..10]);
    }

    #[test]
    fn test_more_workers_than_elements() {
        let p = Partition::new(2, nz(5));
        assert_eq!(p.len(), 5);
        assert_eq!(p.n_nonempty(), 1);
        let lens: Vec<usize> = p.chunks().map(|c| c.clipped_len(2)).collect();
        assert_eq!(lens, vec![2, 0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_sequence() {
        let p = Partition::new(0, nz(3));
        assert_eq!(p.len(), 3);
        assert_eq!(p.n_nonempty(), 0);
        assert!(p.ranges().all(|r| r.is_empty()));
    }

    #[test]
    fn test_chunks_disjoint_and_covering() {
        for total in 0..40 {
            for n in 1..=(2 * total + 1) {
                let p = Partition::new(total, nz(n));
                let mut seen = vec![0u8; total];
                for range in p.ranges() {
                    for i in range {
                        seen[i] += 1;
                    }
                }
                assert!(
                    seen.iter().all(|&count| count == 1),
                    "total={} n={} coverage={:?}",
                    total,
                    n,
                    seen
                );
            }
        }
    }

    #[test]
    fn test_clipped_start_past_end() {
        let chunk = Chunk {
            index: 3,
            start: 12,
            len: 4,
        };
        assert_eq!(chunk.clipped(10), 10..10);
        assert_eq!(chunk.clipped_len(10), 0);
    }

    #[test]
    fn test_clipped_no_overflow() {
        let chunk = Chunk {
            index: 1,
            start: usize::MAX - 1,
            len: usize::MAX,
        };
        assert!(chunk.clipped(8).is_empty());
    }

    #[test]
    fn test_nonempty_count_matches_clipping() {
        for total in 0..40 {
            for n in 1..=(2 * total + 1) {
                let p = Partition::new(total, nz(n));
                let counted = p.ranges().filter(|r| !r.is_empty()).count();
                assert_eq!(p.n_nonempty(), counted, "total={} n={}", total, n);
            }
        }
    }

    #[test]
    fn test_huge_worker_count_is_lazy() {
        let p = Partition::new(1, nz(usize::MAX));
        assert_eq!(p.len(), usize::MAX);
        assert_eq!(p.chunk_size(), 1);
        assert_eq!(p.n_nonempty(), 1);
        assert_eq!(p.chunk(0).map(|c| c.clipped(1)), Some(0..1));
        let last = p.chunk(usize::MAX - 1).unwrap();
        assert!(last.clipped(1).is_empty());
        assert_eq!(p.chunk(usize::MAX), None);
        assert_eq!(p.chunks().take(3).count(), 3);
    }
}
