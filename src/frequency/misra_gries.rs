//! Misra-Gries deterministic frequent-items tracking
//!
//! An exact bounded-size frequency map with decrement-and-prune eviction.
//! Unlike the hashing sketches, its guarantee is combinatorial: any item
//! with true frequency above `N / (capacity + 1)` is tracked, and every
//! tracked count undercounts by at most `N / (capacity + 1)`.

use crate::frequency::candidate_capacity;
use crate::traits::{FrequencySketch, HeavyHitters, Sketch};
use core::mem::size_of;

#[cfg(feature = "std")]
use std::{collections::HashMap, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap as HashMap, vec::Vec};

/// Default inflation multiplier applied to the Zipfian candidate capacity
///
/// Misra-Gries accuracy depends on tracking more candidates than the
/// eventual top-k, so the capacity from
/// [`candidate_capacity`](crate::frequency::candidate_capacity) is inflated
/// by this factor.
pub const DEFAULT_MULTIPLIER: usize = 100;

/// Misra-Gries bounded frequency map
///
/// Holds at most `capacity` (item, count) entries. An arriving item that is
/// already tracked, or that finds room, increments its counter; otherwise
/// every tracked counter is decremented by one, counters that reach zero
/// are pruned, and the arriving item is discarded.
///
/// For a stream of `N` items:
///
/// - any item with true frequency greater than `N / (capacity + 1)` is
///   tracked, with `true - N / (capacity + 1) <= tracked <= true`
/// - any item never tracked has true frequency at most `N / (capacity + 1)`
///
/// [`estimate`](Self::estimate) returns 0 for absent items, which is
/// indistinguishable from "below threshold".
///
/// # Example
///
/// ```
/// use streamcount::frequency::MisraGries;
///
/// let mut mg = MisraGries::with_capacity(8);
///
/// for _ in 0..100 {
///     mg.add(1);
/// }
/// for item in 2..6u64 {
///     mg.add(item);
/// }
///
/// assert!(mg.estimate(1) >= 96);
/// ```
#[derive(Clone, Debug)]
pub struct MisraGries {
    map: HashMap<u64, u64>,
    capacity: usize,
    items_seen: u64,
}

impl MisraGries {
    /// Create a tracker sized for heavy-hitter threshold `phi`
    ///
    /// The capacity is the Zipfian candidate capacity inflated by
    /// [`DEFAULT_MULTIPLIER`].
    ///
    /// # Panics
    ///
    /// Panics if `phi` is not greater than zero.
    pub fn for_stream(_n: u64, phi: f64) -> Self {
        Self::with_multiplier(phi, DEFAULT_MULTIPLIER)
    }

    /// Create a tracker with an explicit inflation multiplier
    ///
    /// # Panics
    ///
    /// Panics if `phi` is not greater than zero or `multiplier` is zero.
    pub fn with_multiplier(phi: f64, multiplier: usize) -> Self {
        assert!(multiplier > 0, "multiplier must be positive");
        Self::with_capacity(candidate_capacity(phi) * multiplier)
    }

    /// Create a tracker holding at most `capacity` entries
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");

        Self {
            map: HashMap::new(),
            capacity,
            items_seen: 0,
        }
    }

    /// Maximum number of tracked entries (k2)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of tracked entries
    pub fn num_tracked(&self) -> usize {
        self.map.len()
    }

    /// Total number of items added
    pub fn items_seen(&self) -> u64 {
        self.items_seen
    }

    /// Check if an item is currently tracked
    pub fn contains(&self, item: u64) -> bool {
        self.map.contains_key(&item)
    }

    /// Add one occurrence of `item`
    ///
    /// Always succeeds; the `bool` return keeps the add surface uniform
    /// across backends. The decrement branch costs O(tracked entries) and
    /// dominates as the map approaches capacity.
    pub fn add(&mut self, item: u64) -> bool {
        self.items_seen += 1;

        if let Some(count) = self.map.get_mut(&item) {
            *count += 1;
            return true;
        }

        if self.map.len() < self.capacity {
            self.map.insert(item, 1);
            return true;
        }

        // At capacity: every counter pays one, zeros are pruned, and the
        // arriving item is not inserted.
        self.map.retain(|_, count| {
            *count -= 1;
            *count > 0
        });
        true
    }

    /// Tracked count for `item`, or 0 if absent
    pub fn estimate(&self, item: u64) -> u64 {
        self.map.get(&item).copied().unwrap_or(0)
    }

    /// The entire tracked map, descending by count
    pub fn tracked(&self) -> Vec<(u64, u64)> {
        let mut entries: Vec<(u64, u64)> = self.map.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Reset the tracker to empty
    pub fn clear(&mut self) {
        self.map.clear();
        self.items_seen = 0;
    }

    /// Memory usage in bytes
    pub fn size_bytes(&self) -> usize {
        // Map entries: key + count + per-entry table overhead.
        size_of::<Self>() + self.map.len() * (2 * size_of::<u64>() + 16)
    }
}

impl Sketch for MisraGries {
    type Item = u64;

    fn update(&mut self, item: &u64) {
        let _ = self.add(*item);
    }

    fn clear(&mut self) {
        MisraGries::clear(self);
    }

    fn size_bytes(&self) -> usize {
        MisraGries::size_bytes(self)
    }

    fn count(&self) -> u64 {
        self.items_seen
    }
}

impl FrequencySketch for MisraGries {
    fn estimate_frequency(&self, item: &u64) -> u64 {
        self.estimate(*item)
    }
}

impl HeavyHitters for MisraGries {
    fn heavy_hitters(&self, threshold: f64) -> Vec<(u64, u64)> {
        let min_count = (threshold * self.items_seen as f64) as u64;

        self.tracked()
            .into_iter()
            .filter(|&(_, count)| count >= min_count)
            .collect()
    }

    fn top_k(&self, k: usize) -> Vec<(u64, u64)> {
        let mut items = self.tracked();
        items.truncate(k);
        items
    }
}
