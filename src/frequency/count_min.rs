//! Count-Min Sketch frequency estimator
//!
//! A d×w matrix of non-negative counters with one seeded hash per row. The
//! point-query estimate is the minimum counter across rows, which is always
//! at least the true frequency: collisions can only add, never subtract.

use crate::frequency::{candidate_capacity, TopKTracker};
use crate::math;
use crate::traits::{FrequencySketch, HeavyHitters, Sketch};
use core::mem::size_of;
use xxhash_rust::xxh3::xxh3_64_with_seed;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Default number of hash rows
pub const DEFAULT_DEPTH: usize = 5;
/// Default buckets per row
pub const DEFAULT_WIDTH: usize = 500;
/// Default base seed for row hash derivation
pub const DEFAULT_SEED: u64 = 1337;

/// Count-Min Sketch with incremental heavy-hitter candidate tracking
///
/// Point queries satisfy `true_count <= estimate <= true_count + ε·N` with
/// probability at least `1 - δ`, where `ε = e/width` and `δ = 1/2^depth`.
/// The error is one-sided: the estimate never underestimates.
///
/// Every `add` forwards the item's fresh minimum-of-rows count to an
/// embedded [`TopKTracker`], so heavy-hitter candidates are maintained
/// without ever re-scanning the counter matrix.
///
/// # Example
///
/// ```
/// use streamcount::frequency::CountMinSketch;
///
/// let mut cms = CountMinSketch::for_stream(1_000, 0.01);
///
/// cms.add(42);
/// cms.add(42);
/// cms.add(7);
///
/// assert!(cms.estimate(42) >= 2);
/// assert_eq!(cms.estimate(99_999), 0);
/// ```
#[derive(Clone, Debug)]
pub struct CountMinSketch {
    width: usize,
    table: Vec<Vec<u64>>,
    seeds: Vec<u64>,
    tracker: TopKTracker,
    items_seen: u64,
}

impl CountMinSketch {
    /// Create a sketch sized for a stream of `n` items and heavy-hitter
    /// threshold `phi`, using the default matrix dimensions
    ///
    /// The candidate tracker capacity comes from
    /// [`candidate_capacity`](crate::frequency::candidate_capacity).
    ///
    /// # Panics
    ///
    /// Panics if `phi` is not greater than zero.
    pub fn for_stream(_n: u64, phi: f64) -> Self {
        Self::with_dimensions(DEFAULT_DEPTH, DEFAULT_WIDTH, candidate_capacity(phi))
    }

    /// Create a sketch from error-bound parameters
    ///
    /// `width = ceil(e / epsilon)`, `depth = ceil(ln(1 / delta))`; the
    /// tracker holds `capacity` candidates.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon` or `delta` are not in (0, 1).
    pub fn with_error_bounds(epsilon: f64, delta: f64, capacity: usize) -> Self {
        assert!(epsilon > 0.0 && epsilon < 1.0, "epsilon must be in (0, 1)");
        assert!(delta > 0.0 && delta < 1.0, "delta must be in (0, 1)");

        let width = math::ceil(core::f64::consts::E / epsilon) as usize;
        let depth = math::ceil(math::ln(1.0 / delta)) as usize;
        Self::with_dimensions(depth, width, capacity)
    }

    /// Create a sketch with explicit dimensions and tracker capacity
    ///
    /// # Panics
    ///
    /// Panics if `depth` or `width` is zero.
    pub fn with_dimensions(depth: usize, width: usize, capacity: usize) -> Self {
        Self::with_seed(depth, width, capacity, DEFAULT_SEED)
    }

    /// Like [`with_dimensions`](Self::with_dimensions) with an explicit base
    /// seed, for reproducible hashing
    pub fn with_seed(depth: usize, width: usize, capacity: usize, seed: u64) -> Self {
        assert!(depth > 0, "depth must be positive");
        assert!(width > 0, "width must be positive");

        let seeds = (0..depth)
            .map(|row| seed ^ (row as u64).wrapping_mul(0x9e3779b97f4a7c15))
            .collect();

        Self {
            width,
            table: vec![vec![0u64; width]; depth],
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

    /// Add one occurrence of `item`
    ///
    /// Increments one bucket per row and tracks the minimum post-increment
    /// value in the same pass; that minimum is the item's current estimate
    /// and is offered to the candidate tracker.
    ///
    /// Returns `false` only on an out-of-range bucket index, which is
    /// unreachable under correct modulo arithmetic and treated as an
    /// integrity fault: the update is dropped, never retried.
    pub fn add(&mut self, item: u64) -> bool {
        let bytes = item.to_le_bytes();
        let mut min_count = u64::MAX;

        for (row, &seed) in self.seeds.iter().enumerate() {
            let col = (xxh3_64_with_seed(&bytes, seed) as usize) % self.width;
            if col >= self.width {
                return false;
            }
            self.table[row][col] = self.table[row][col].saturating_add(1);
            min_count = min_count.min(self.table[row][col]);
        }

        self.items_seen += 1;
        self.tracker.insert_or_update(item, min_count);
        true
    }

    /// Estimate the frequency of `item` as the minimum counter across rows
    pub fn estimate(&self, item: u64) -> u64 {
        let bytes = item.to_le_bytes();
        let mut min_count = u64::MAX;

        for (row, &seed) in self.seeds.iter().enumerate() {
            let col = (xxh3_64_with_seed(&bytes, seed) as usize) % self.width;
            min_count = min_count.min(self.table[row][col]);
        }

        min_count
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
            + self.seeds.len() * self.width * size_of::<u64>()
            + self.seeds.len() * size_of::<u64>()
            + self.tracker.size_bytes()
    }
}

impl Sketch for CountMinSketch {
    type Item = u64;

    fn update(&mut self, item: &u64) {
        let _ = self.add(*item);
    }

    fn clear(&mut self) {
        CountMinSketch::clear(self);
    }

    fn size_bytes(&self) -> usize {
        CountMinSketch::size_bytes(self)
    }

    fn count(&self) -> u64 {
        self.items_seen
    }
}

impl FrequencySketch for CountMinSketch {
    fn estimate_frequency(&self, item: &u64) -> u64 {
        self.estimate(*item)
    }
}

impl HeavyHitters for CountMinSketch {
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
