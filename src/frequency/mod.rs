//! Frequency estimation algorithms
//!
//! This module provides interchangeable backends for estimating item
//! frequencies in a data stream, plus the bounded top-K structure that the
//! hashing backends use to track heavy-hitter candidates incrementally.
//!
//! # Algorithms
//!
//! - [`CountMinSketch`]: non-negative counter matrix, minimum-of-rows
//!   estimator; never underestimates
//! - [`CountSketch`]: signed counter matrix, median-of-rows estimator;
//!   lower bias at the cost of two hashes per row
//! - [`MisraGries`]: deterministic bounded frequency map with
//!   decrement-and-prune eviction
//! - [`TopKTracker`]: array-backed min-heap of (item, count) with an
//!   item-to-slot index for O(1) membership testing
//!
//! # Example
//!
//! ```
//! use streamcount::frequency::CountMinSketch;
//!
//! let mut cms = CountMinSketch::for_stream(1_000, 0.05);
//!
//! for key in [3u64, 3, 3, 17, 3] {
//!     cms.add(key);
//! }
//!
//! assert!(cms.estimate(3) >= 4);
//! ```

use crate::math;

mod count_min;
mod count_sketch;
mod misra_gries;
mod top_k;

pub use count_min::CountMinSketch;
pub use count_sketch::CountSketch;
pub use misra_gries::MisraGries;
pub use top_k::{HeapEntry, TopKTracker};

/// Riemann zeta function at 1.5, the assumed Zipfian skew of the stream.
const ZETA_1_5: f64 = 2.6123;

/// Number of heavy-hitter candidates worth tracking for threshold `phi`.
///
/// Computed as `floor((1 / (phi * zeta(1.5)))^(2/3))`, assuming item
/// frequencies follow a Zipfian distribution with exponent 1.5 over a large
/// universe. This is a sizing heuristic, not a correctness guarantee: for
/// streams with a different skew the returned capacity may be too small to
/// retain every true heavy hitter. The result is clamped to at least 1.
///
/// # Panics
///
/// Panics if `phi` is not greater than zero; a sketch cannot be sized for a
/// zero threshold.
pub fn candidate_capacity(phi: f64) -> usize {
    assert!(phi > 0.0, "phi must be greater than zero");

    let k = math::floor(math::pow(1.0 / (phi * ZETA_1_5), 2.0 / 3.0)) as usize;
    k.max(1)
}
