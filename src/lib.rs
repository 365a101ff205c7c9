//! # Streamcount
//!
//! Fixed-memory frequency estimation and heavy-hitter detection for data
//! streams.
//!
//! Streamcount answers "how often did this item occur?" and "which items
//! occurred more than a fraction φ of the time?" over a stream of 64-bit
//! keys, using memory that is independent of both the stream length and the
//! size of the item universe.
//!
//! ## Backends
//!
//! - [`CountMinSketch`](frequency::CountMinSketch): overestimating
//!   point-query estimator with a one-sided εN error bound
//! - [`CountSketch`](frequency::CountSketch): signed, median-based estimator
//!   that cancels collision noise in expectation
//! - [`MisraGries`](frequency::MisraGries): deterministic bounded frequency
//!   map, exact above a derived threshold
//!
//! Count-Min and Count Sketch maintain their heavy-hitter candidates
//! incrementally with a [`TopKTracker`](frequency::TopKTracker), a bounded
//! min-heap with O(1) membership testing.
//!
//! ## Quick start
//!
//! ```rust
//! use streamcount::{SketchKind, StreamSummary};
//!
//! // Expecting ~10,000 items; report items above 1% of the stream.
//! let mut summary = StreamSummary::new(10_000, 0.01, SketchKind::CountMin);
//!
//! for key in [7u64, 7, 7, 42, 7, 42, 9] {
//!     summary.add(key);
//! }
//!
//! assert!(summary.estimate(7) >= 4);
//! let hitters = summary.heavy_hitters();
//! assert_eq!(hitters[0].0, 7);
//! ```
//!
//! ## Concurrency
//!
//! All structures assume a single logical writer. `add` calls must arrive
//! sequentially; `estimate` and `heavy_hitters` are read-only and safe
//! between adds but not concurrently with them. Callers needing concurrent
//! access must impose external serialization (e.g. an `RwLock` with `add`
//! behind the write half).
//!
//! ## Feature flags
//!
//! - `std` (default): standard library support
//! - `libm`: float math for `no_std` builds (disable default features)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod frequency;
pub mod math;
pub mod summary;
pub mod traits;

pub mod prelude {
    pub use crate::frequency::{CountMinSketch, CountSketch, MisraGries, TopKTracker};
    pub use crate::summary::{SketchKind, StreamSummary};
    pub use crate::traits::*;
}

pub use frequency::{CountMinSketch, CountSketch, MisraGries};
pub use summary::{SketchKind, StreamSummary};
