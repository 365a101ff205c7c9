//! Count Sketch frequency estimator
//!
//! A d×w matrix of signed counters. Each row hashes an item twice: once to
//! pick a bucket and once to pick a sign, so colliding items cancel in
//! expectation instead of only ever inflating each other. The estimate is
//! the median of the per-row signed values, clamped to zero.

use crate::frequency::{candidate_capacity, TopKTracker};
use crate::traits::{FrequencySketch, HeavyHitters, Sketch};
use core::mem::size_of;
use xxhash_rust::xxh3::xxh3_64_with_seed;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Default number of hash rows; must stay odd for a well-defined median
pub const DEFAULT_DEPTH: usize = 5;
/// Default buckets per row
pub const DEFAULT_WIDTH: usize = 2048;
/// Default base seed for row hash derivation
pub const DEFAULT_SEED: u64 = 42069;

/// Per-row seed pair: one hash selects the bucket, the other the sign
#[derive(Clone, Copy, Debug)]
struct SeedPair {
    bucket: u64,
    sign: u64,
}

/// Count Sketch with incremental heavy-hitter candidate tracking
///
/// Compared to [`CountMinSketch`](crate::frequency::CountMinSketch), the
/// signed/median design trades the one-sided guarantee for lower bias:
/// estimates can fall below the true count, but collision noise cancels in
/// expectation. Negative medians are clamped to zero, so estimates are
/// always non-negative.
///
/// Every `add` recomputes the item's estimate and offers it to an embedded
/// [`TopKTracker`].
///
/// # Example
///
/// ```
/// use streamcount::frequency::CountSketch;
///
/// let mut cs = CountSketch::for_stream(1_000, 0.01);
///
/// for _ in 0..40 {
///     cs.add(42);
/// }
///
/// let estimate = cs.estimate(42);
/// assert!(estimate >= 35 && estimate <= 45);
/// ```
#[derive(Clone, Debug)]
pub struct CountSketch {
    width: usize,
    table: Vec<Vec<i64>>,
    seeds: Vec<SeedPair>,
    tracker: TopKTracker,
    items_seen: u64,
}

impl CountSketch {
    /// Create a sketch sized for a stream of `n` items and heavy-hitter
    /// threshold `phi`, using the default matrix dimensions
    ///
    /// # Panics
    ///
    /// Panics if `phi` is not greater than zero.
    pub fn for_stream(_n: u64, phi: f64) -> Self {
        Self::with_dimensions(DEFAULT_DEPTH, DEFAULT_WIDTH, candidate_capacity(phi))
    }

    /// Create a sketch with explicit dimensions and tracker capacity
    ///
    /// # Panics
    ///
    /// Panics if `depth` is zero or even, or if `width` is zero.
    pub fn with_dimensions(depth: usize, width: usize, capacity: usize) -> Self {
        Self::with_seed(depth, width, capacity, DEFAULT_SEED)
    }

    /// Like [`with_dimensions`](Self::with_dimensions) with an explicit base
    /// seed, for reproducible hashing
    pub fn with_seed(depth: usize, width: usize, capacity: usize, seed: u64) -> Self {
        assert!(depth > 0, "depth must be positive");
        assert!(depth % 2 == 1, "depth must be odd for a well-defined median");
        assert!(width > 0, "width must be positive");

        let seeds = (0..depth)
            .map(|row| {
                let base = seed ^ (row as u64).wrapping_mul(0x9e3779b97f4a7c15);
                SeedPair {
                    bucket: base,
                    sign: base.wrapping_mul(0xff51afd7ed558ccd).wrapping_add(1),
                }
            })
            .collect();

        Self {
            width,
            table: vec![vec![0i64; width]; depth],
            seeds,
            tracker: TopKTracker::new(capacity),
            items_seen: 0,
        }
    }

    /// Number of hash rows
    pub fn depth(&self) -> usize {
        self.seeds.len()
    }

    /// Buckets per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of items added
    pub fn items_seen(&self) -> u64 {
        self.items_seen
    }

    /// The embedded heavy-hitter candidate tracker
    pub fn tracker(&self) -> &TopKTracker {
        &self.tracker
    }

    fn bucket_and_sign(&self, pair: SeedPair, bytes: &[u8; 8]) -> (usize, i64) {
        let bucket = (xxh3_64_with_seed(bytes, pair.bucket) as usize) % self.width;
        let sign = if xxh3_64_with_seed(bytes, pair.sign) % 2 == 0 {
            -1
        } else {
            1
        };
        (bucket, sign)
    }

    /// Add one occurrence of `item`
    ///
    /// Applies the per-row signed increment, then recomputes the item's
    /// estimate and offers it to the candidate tracker.
    ///
    /// Returns `false` only on an out-of-range bucket index, which is
    /// unreachable under correct modulo arithmetic and treated as an
    /// integrity fault: the update is dropped, never retried.
    pub fn add(&mut self, item: u64) -> bool {
        let bytes = item.to_le_bytes();

        for (row, &pair) in self.seeds.iter().enumerate() {
            let (col, sign) = self.bucket_and_sign(pair, &bytes);
            if col >= self.width {
                return false;
            }
            self.table[row][col] += sign;
        }

        self.items_seen += 1;
        let estimate = self.estimate(item);
        self.tracker.insert_or_update(item, estimate);
        true
    }

    /// Estimate the frequency of `item` as the median of the per-row signed
    /// bucket values, clamped to zero if negative
    pub fn estimate(&self, item: u64) -> u64 {
        let bytes = item.to_le_bytes();
        let mut counts: Vec<i64> = self
            .seeds
            .iter()
            .enumerate()
            .map(|(row, &pair)| {
                let (col, sign) = self.bucket_and_sign(pair, &bytes);
                sign * self.table[row][col]
            })
            .collect();

        let mid = counts.len() / 2;
        let (_, median, _) = counts.select_nth_unstable(mid);
        if *median > 0 {
            *median as u64
        } else {
            0
        }
    }

    /// Reset the sketch to empty
    pub fn clear(&mut self) {
        for row in &mut self.table {
            row.fill(0);
        }
        self.tracker.clear();
        self.items_seen = 0;
    }

    /// Memory usage in bytes
    pub fn size_bytes(&self) -> usize {
        size_of::<Self>()
            + self.seeds.len() * self.width * size_of::<i64>()
            + self.seeds.len() * size_of::<SeedPair>()
            + self.tracker.size_bytes()
    }
}

impl Sketch for CountSketch {
    type Item = u64;

    fn update(&mut self, item: &u64) {
        let _ = self.add(*item);
    }

    fn clear(&mut self) {
        CountSketch::clear(self);
    }

    fn size_bytes(&self) -> usize {
        CountSketch::size_bytes(self)
    }

    fn count(&self) -> u64 {
        self.items_seen
    }
}

impl FrequencySketch for CountSketch {
    fn estimate_frequency(&self, item: &u64) -> u64 {
        self.estimate(*item)
    }
}

impl HeavyHitters for CountSketch {
    fn heavy_hitters(&self, threshold: f64) -> Vec<(u64, u64)> {
        let min_count = (threshold * self.items_seen as f64) as u64;

        let mut hitters: Vec<(u64, u64)> = self
            .tracker
            .entries()
            .iter()
            .filter(|e| e.count >= min_count)
            .map(|e| (e.item, e.count))
            .collect();
        hitters.sort_by(|a, b| b.1.cmp(&a.1));
        hitters
    }

    fn top_k(&self, k: usize) -> Vec<(u64, u64)> {
        let mut items: Vec<(u64, u64)> = self
            .tracker
            .entries()
            .iter()
            .map(|e| (e.item, e.count))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items.truncate(k);
        items
    }
}
