//! Bounded top-K tracking with an indexed min-heap
//!
//! The tracker keeps the k highest-count candidates seen so far without ever
//! re-scanning the counting backend. It is a priority admission filter: an
//! item earns residence only by outranking the current weakest resident.

use core::mem::size_of;

#[cfg(feature = "std")]
use std::{collections::HashMap, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap as HashMap, vec::Vec};

/// A resident (item, count) pair in the tracker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeapEntry {
    /// The tracked item
    pub item: u64,
    /// Count at the time of the item's last accepted update
    pub count: u64,
}

/// Bounded min-heap of (item, count) pairs with O(1) membership testing
///
/// Holds at most `capacity` entries ordered as a binary min-heap on count,
/// with slot 0 always the minimum. A side index maps each resident item to
/// its current heap slot; the heap array and the index are kept mutually
/// consistent under every mutation.
///
/// Counts are monotone from the tracker's point of view: an update for a
/// resident item is applied only if it is strictly greater than the stored
/// count, so an in-place update can only sink, never rise.
///
/// # Example
///
/// ```
/// use streamcount::frequency::TopKTracker;
///
/// let mut tracker = TopKTracker::new(2);
///
/// tracker.insert_or_update(1, 10);
/// tracker.insert_or_update(2, 20);
/// tracker.insert_or_update(3, 5); // does not outrank the minimum
///
/// assert!(tracker.is_tracked(1));
/// assert!(!tracker.is_tracked(3));
/// assert_eq!(tracker.min_count(), Some(10));
/// ```
#[derive(Clone, Debug)]
pub struct TopKTracker {
    capacity: usize,
    heap: Vec<HeapEntry>,
    index: HashMap<u64, usize>,
}

impl TopKTracker {
    /// Create a tracker holding at most `capacity` candidates
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: Vec::with_capacity(capacity),
            index: HashMap::new(),
        }
    }

    /// Maximum number of resident candidates (k)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of resident candidates
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if no candidates are resident
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Check if an item is currently resident
    pub fn is_tracked(&self, item: u64) -> bool {
        self.index.contains_key(&item)
    }

    /// Count stored for a resident item, or `None` if not resident
    pub fn tracked_count(&self, item: u64) -> Option<u64> {
        self.index.get(&item).map(|&slot| self.heap[slot].count)
    }

    /// Minimum count among residents, or `None` if empty
    pub fn min_count(&self) -> Option<u64> {
        self.heap.first().map(|e| e.count)
    }

    /// The resident set, in heap order (not sorted by count)
    pub fn entries(&self) -> &[HeapEntry] {
        &self.heap
    }

    /// Offer a fresh (item, count) estimate to the tracker
    ///
    /// - Resident item: the stored count is overwritten only if `count` is
    ///   strictly greater, then the slot is sifted downward (an increase can
    ///   only move away from the root).
    /// - New item with room: appended as a leaf and sifted upward.
    /// - New item that strictly outranks the minimum: the root is evicted,
    ///   overwritten, and sifted downward.
    /// - Otherwise the candidate is rejected silently. A count exactly equal
    ///   to the current minimum does not evict; the tie goes to the resident.
    pub fn insert_or_update(&mut self, item: u64, count: u64) {
        if let Some(&slot) = self.index.get(&item) {
            if count > self.heap[slot].count {
                self.heap[slot].count = count;
                self.sift_down(slot);
            }
        } else if self.heap.len() < self.capacity {
            self.heap.push(HeapEntry { item, count });
            let slot = self.heap.len() - 1;
            self.index.insert(item, slot);
            self.sift_up(slot);
        } else if self.heap.first().map_or(false, |min| count > min.count) {
            let evicted = self.heap[0].item;
            self.index.remove(&evicted);
            self.heap[0] = HeapEntry { item, count };
            self.index.insert(item, 0);
            self.sift_down(0);
        }
    }

    /// Remove all residents
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    /// Memory usage in bytes
    pub fn size_bytes(&self) -> usize {
        // Index entries: key + slot + per-entry table overhead.
        size_of::<Self>()
            + self.heap.capacity() * size_of::<HeapEntry>()
            + self.index.len() * (size_of::<u64>() + size_of::<usize>() + 16)
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut smallest = slot;

            if left < self.heap.len() && self.heap[left].count < self.heap[smallest].count {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].count < self.heap[smallest].count {
                smallest = right;
            }
            if smallest == slot {
                break;
            }

            self.heap.swap(slot, smallest);
            self.index.insert(self.heap[slot].item, slot);
            self.index.insert(self.heap[smallest].item, smallest);
            slot = smallest;
        }
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[parent].count <= self.heap[slot].count {
                break;
            }

            self.heap.swap(parent, slot);
            self.index.insert(self.heap[parent].item, parent);
            self.index.insert(self.heap[slot].item, slot);
            slot = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Structural invariant: heap order, size bound, and an index that
    /// mirrors the heap exactly (same item set, correct slot numbers).
    fn assert_invariants(tracker: &TopKTracker) {
        assert!(tracker.heap.len() <= tracker.capacity);

        for slot in 1..tracker.heap.len() {
            let parent = (slot - 1) / 2;
            assert!(
                tracker.heap[parent].count <= tracker.heap[slot].count,
                "heap order violated at slot {}: parent {} > child {}",
                slot,
                tracker.heap[parent].count,
                tracker.heap[slot].count
            );
        }

        assert_eq!(tracker.index.len(), tracker.heap.len());
        for (slot, entry) in tracker.heap.iter().enumerate() {
            assert_eq!(
                tracker.index.get(&entry.item),
                Some(&slot),
                "index slot mismatch for item {}",
                entry.item
            );
        }
    }

    #[test]
    fn fills_to_capacity() {
        let mut tracker = TopKTracker::new(4);

        for item in 0..4u64 {
            tracker.insert_or_update(item, item + 1);
            assert_invariants(&tracker);
        }

        assert_eq!(tracker.len(), 4);
        assert_eq!(tracker.min_count(), Some(1));
    }

    #[test]
    fn update_only_increases() {
        let mut tracker = TopKTracker::new(4);

        tracker.insert_or_update(7, 10);
        tracker.insert_or_update(7, 5); // stale estimate, ignored
        assert_eq!(tracker.tracked_count(7), Some(10));

        tracker.insert_or_update(7, 12);
        assert_eq!(tracker.tracked_count(7), Some(12));
        assert_invariants(&tracker);
    }

    #[test]
    fn eviction_replaces_minimum() {
        let mut tracker = TopKTracker::new(3);

        tracker.insert_or_update(1, 10);
        tracker.insert_or_update(2, 20);
        tracker.insert_or_update(3, 30);

        tracker.insert_or_update(4, 15);
        assert_invariants(&tracker);

        assert!(!tracker.is_tracked(1), "old minimum should be evicted");
        assert!(tracker.is_tracked(4));
        assert_eq!(tracker.min_count(), Some(15));
    }

    #[test]
    fn tie_with_minimum_is_rejected() {
        let mut tracker = TopKTracker::new(2);

        tracker.insert_or_update(1, 10);
        tracker.insert_or_update(2, 20);

        tracker.insert_or_update(3, 10); // equals the minimum, not strictly greater
        assert!(tracker.is_tracked(1));
        assert!(!tracker.is_tracked(3));
        assert_invariants(&tracker);
    }

    #[test]
    fn below_minimum_is_rejected() {
        let mut tracker = TopKTracker::new(2);

        tracker.insert_or_update(1, 10);
        tracker.insert_or_update(2, 20);
        tracker.insert_or_update(3, 4);

        assert_eq!(tracker.len(), 2);
        assert!(!tracker.is_tracked(3));
        assert_invariants(&tracker);
    }

    #[test]
    fn invariants_hold_under_mixed_workload() {
        // Deterministic pseudo-random mix of inserts, updates, and rejects.
        let mut tracker = TopKTracker::new(16);
        let mut state = 0x2545f4914f6cdd1du64;

        for _ in 0..10_000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;

            let item = state % 64;
            let count = (state >> 32) % 1_000;
            tracker.insert_or_update(item, count);
            assert_invariants(&tracker);
        }

        let min = tracker.min_count().unwrap();
        for entry in tracker.entries() {
            assert!(entry.count >= min);
        }
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut tracker = TopKTracker::new(0);

        tracker.insert_or_update(1, 100);
        assert!(tracker.is_empty());
        assert_eq!(tracker.min_count(), None);
    }

    #[test]
    fn clear_resets_completely() {
        let mut tracker = TopKTracker::new(4);

        tracker.insert_or_update(1, 10);
        tracker.insert_or_update(2, 20);

        tracker.clear();

        assert!(tracker.is_empty());
        assert!(!tracker.is_tracked(1));
        assert_invariants(&tracker);
    }

    #[test]
    fn size_bytes_tracks_occupancy() {
        let mut tracker = TopKTracker::new(8);
        let empty = tracker.size_bytes();

        for item in 0..8u64 {
            tracker.insert_or_update(item, item + 1);
        }

        assert!(tracker.size_bytes() > empty);
    }
}
