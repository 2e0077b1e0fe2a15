//! # Range folds over static sequences
//!
//! This library answers "combine everything in `[start, end)`" queries over
//! an immutable sequence, for any monoid: an associative operation with a
//! two-sided identity (sums, minima, string concatenation, ...).
//!
//! ## Core Algorithm
//!
//! 1. **Padding**: round the input length up to a power of two `L`, filling
//!    the extra leaves with the identity
//! 2. **Bottom-up build**: store the tree as one flat array of `2L - 1` nodes;
//!    every internal node holds `combine(left, right)`
//! 3. **Range decomposition**: split a query range into canonical node
//!    ranges and fold their aggregates left to right
//!
//! Result: O(n) build, at most `4 log2(L) + 1` node visits per query
//!
//! ## Usage Example
//!
//! ```
//! use rangefold::{monoid::Min, SegmentTree};
//!
//! let tree = SegmentTree::build(vec![5.0, 3.0, 8.0, 1.0, 4.0], Min::<f64>::new())?;
//! assert_eq!(tree.query(0, 5)?, 1.0);
//! assert_eq!(tree.query(0, 2)?, 3.0);
//! # Ok::<(), rangefold::RangeFoldError>(())
//! ```
//!
//! The tree is never mutated after construction, so a built tree can be
//! shared across threads and queried concurrently whenever its monoid is
//! `Sync`.

#![warn(missing_docs, missing_debug_implementations)]

pub mod monoid; // Combine strategies
pub mod tree; // Array-backed segment tree

// Re-exports for convenience
pub use monoid::{FnMonoid, Monoid};
pub use tree::{NodeSpan, QueryProfile, SegmentTree};

use thiserror::Error;

/// Errors reported while building or querying a tree
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFoldError {
    /// `combine(identity, identity)` did not return the identity
    #[error("identity element is not idempotent under the operation: combine(e, e) != e")]
    IdentityViolation,

    /// Range start lies after its end
    #[error("invalid range [{start}, {end}): start is greater than end")]
    InvalidRange {
        /// Requested start position
        start: usize,
        /// Requested end position
        end: usize,
    },

    /// Range extends past the end of the sequence
    #[error("range end {end} exceeds sequence length {len}")]
    OutOfBounds {
        /// Requested end position
        end: usize,
        /// Number of values in the tree
        len: usize,
    },
}
