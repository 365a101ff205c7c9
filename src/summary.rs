//! Stream summary facade
//!
//! [`StreamSummary`] owns exactly one frequency backend and presents the
//! uniform add / estimate / heavy-hitters / size surface a driver needs.
//! Backend selection happens once at construction through [`SketchKind`];
//! dispatch afterwards goes through the [`FrequencyBackend`] trait object,
//! and the backend (with its internal tracker or map) is dropped with the
//! summary as a single unit.

use crate::frequency::{CountMinSketch, CountSketch, MisraGries};

#[cfg(feature = "std")]
use std::{boxed::Box, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

/// Which frequency-estimation backend a [`StreamSummary`] should own
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SketchKind {
    /// Count-Min Sketch: one-sided overestimate, minimum-of-rows
    CountMin,
    /// Count Sketch: signed counters, median-of-rows
    Count,
    /// Misra-Gries: deterministic bounded frequency map
    MisraGries,
}

/// Capability set shared by all frequency backends
///
/// Object-safe so the facade can hold any backend behind one pointer.
pub trait FrequencyBackend {
    /// Add one occurrence of an item; `false` only on an internal
    /// integrity fault, in which case the single update is dropped
    fn add(&mut self, item: u64) -> bool;

    /// Best-effort frequency estimate; 0 may mean "never seen" or
    /// "below tracking threshold" depending on the backend
    fn estimate(&self, item: u64) -> u64;

    /// Current heavy-hitter candidate set, descending by count
    fn candidates(&self) -> Vec<(u64, u64)>;

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;
}

impl FrequencyBackend for CountMinSketch {
    fn add(&mut self, item: u64) -> bool {
        CountMinSketch::add(self, item)
    }

    fn estimate(&self, item: u64) -> u64 {
        CountMinSketch::estimate(self, item)
    }

    fn candidates(&self) -> Vec<(u64, u64)> {
        let mut items: Vec<(u64, u64)> = self
            .tracker()
            .entries()
            .iter()
            .map(|e| (e.item, e.count))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }

    fn size_bytes(&self) -> usize {
        CountMinSketch::size_bytes(self)
    }
}

impl FrequencyBackend for CountSketch {
    fn add(&mut self, item: u64) -> bool {
        CountSketch::add(self, item)
    }

    fn estimate(&self, item: u64) -> u64 {
        CountSketch::estimate(self, item)
    }

    fn candidates(&self) -> Vec<(u64, u64)> {
        let mut items: Vec<(u64, u64)> = self
            .tracker()
            .entries()
            .iter()
            .map(|e| (e.item, e.count))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }

    fn size_bytes(&self) -> usize {
        CountSketch::size_bytes(self)
    }
}

impl FrequencyBackend for MisraGries {
    fn add(&mut self, item: u64) -> bool {
        MisraGries::add(self, item)
    }

    fn estimate(&self, item: u64) -> u64 {
        MisraGries::estimate(self, item)
    }

    fn candidates(&self) -> Vec<(u64, u64)> {
        self.tracked()
    }

    fn size_bytes(&self) -> usize {
        MisraGries::size_bytes(self)
    }
}

/// Fixed-memory summary of a stream of 64-bit keys
///
/// Constructed once with the expected stream length `n`, the heavy-hitter
/// threshold fraction `phi`, and a backend kind; backend capacities are
/// derived from `(n, phi)` at construction and never change.
///
/// All methods assume a single logical writer: `add` calls must be
/// sequential, and reads must not overlap an in-flight `add`.
///
/// # Example
///
/// ```
/// use streamcount::{SketchKind, StreamSummary};
///
/// let mut summary = StreamSummary::new(1_000, 0.1, SketchKind::MisraGries);
///
/// for _ in 0..300 {
///     summary.add(1);
/// }
/// for _ in 0..50 {
///     summary.add(2);
/// }
///
/// let hitters = summary.heavy_hitters();
/// assert_eq!(hitters[0], (1, 300));
/// ```
pub struct StreamSummary {
    backend: Box<dyn FrequencyBackend>,
    n: u64,
    phi: f64,
}

impl StreamSummary {
    /// Create a summary for an expected stream of `n` items with
    /// heavy-hitter threshold fraction `phi`
    ///
    /// # Panics
    ///
    /// Panics if `phi` is not greater than zero: a sketch cannot size its
    /// candidate storage for a zero threshold.
    pub fn new(n: u64, phi: f64, kind: SketchKind) -> Self {
        assert!(phi > 0.0, "phi must be greater than zero");

        let backend: Box<dyn FrequencyBackend> = match kind {
            SketchKind::CountMin => Box::new(CountMinSketch::for_stream(n, phi)),
            SketchKind::Count => Box::new(CountSketch::for_stream(n, phi)),
            SketchKind::MisraGries => Box::new(MisraGries::for_stream(n, phi)),
        };

        Self { backend, n, phi }
    }

    /// Wrap a custom-configured backend
    ///
    /// Use this when the default dimensions are not appropriate, e.g. a
    /// [`CountMinSketch`] built with explicit `with_dimensions` parameters.
    pub fn from_backend(n: u64, phi: f64, backend: Box<dyn FrequencyBackend>) -> Self {
        assert!(phi > 0.0, "phi must be greater than zero");
        Self { backend, n, phi }
    }

    /// Expected stream length supplied at construction
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Heavy-hitter threshold fraction supplied at construction
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Add one occurrence of `item`
    ///
    /// Returns `false` only on an internal integrity fault (an out-of-range
    /// hashed bucket, unreachable under correct arithmetic); the single
    /// update is dropped, never retried.
    pub fn add(&mut self, item: u64) -> bool {
        self.backend.add(item)
    }

    /// Best-effort frequency estimate for `item`
    ///
    /// Always non-negative; 0 may mean "never seen" or "below the tracking
    /// threshold" depending on the backend.
    pub fn estimate(&self, item: u64) -> u64 {
        self.backend.estimate(item)
    }

    /// Heavy-hitter candidates, descending by count
    ///
    /// Count-Min and Count Sketch report their tracker's resident set;
    /// Misra-Gries reports its full tracked map. The threshold fraction was
    /// fixed at construction, so no further argument is needed here.
    pub fn heavy_hitters(&self) -> Vec<(u64, u64)> {
        self.backend.candidates()
    }

    /// Approximate memory footprint in bytes
    pub fn size_bytes(&self) -> usize {
        self.backend.size_bytes()
    }
}
