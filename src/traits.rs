//! Core traits for stream summaries
//!
//! All sketches implement the base [`Sketch`] trait; frequency-oriented
//! backends additionally implement [`FrequencySketch`] and [`HeavyHitters`].

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Core trait for all streaming sketches
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add one occurrence of an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Memory usage in bytes (fixed structure size plus dynamic containers)
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Frequency estimation sketches
pub trait FrequencySketch: Sketch {
    /// Estimate the frequency of an item
    ///
    /// Returns 0 for items that were never seen. Depending on the backend, 0
    /// may also mean "seen but below the tracking threshold"; the two cases
    /// are not distinguishable.
    fn estimate_frequency(&self, item: &Self::Item) -> u64;

    /// Check if an item's estimated frequency reaches a threshold
    fn exceeds_threshold(&self, item: &Self::Item, threshold: u64) -> bool {
        self.estimate_frequency(item) >= threshold
    }
}

/// Heavy hitters / Top-K capability
pub trait HeavyHitters: FrequencySketch
where
    Self::Item: Sized + Clone,
{
    /// Get items with estimated frequency above a fraction of the stream
    ///
    /// `threshold` is a fraction of the total item count (0.0 to 1.0).
    fn heavy_hitters(&self, threshold: f64) -> Vec<(Self::Item, u64)>;

    /// Get the k most frequent tracked items, descending by count
    fn top_k(&self, k: usize) -> Vec<(Self::Item, u64)>;
}
