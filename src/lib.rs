//! # Logarithmic-Time Range Aggregation
//!
//! This library implements a sequence container for rapidly applying
//! associative operations over contiguous index ranges.
//!
//! ## Core Algorithm
//!
//! 1. **Flat tree layout**: N elements live in the leaves of a complete
//!    binary tree stored in one 2N buffer (root at 1, children of `i` at
//!    `2i` and `2i+1`); non-power-of-two lengths split the leaves across
//!    the two deepest levels
//! 2. **Point update**: write one leaf, recompute its O(log N) ancestors
//! 3. **Range aggregate**: decompose `[left, right)` into fully-covered
//!    subtree roots via two biased ascents from the boundary leaves
//!
//! The combining operation only has to be associative; evaluation order is
//! strictly left to right, so non-commutative operations are supported.
//!
//! ## Usage Example
//!
//! ```
//! use rangefold::{AggregationTree, Sum};
//!
//! let mut tree = AggregationTree::new(13, Sum::<i64>::new())?;
//! for k in 0..tree.len() {
//!     tree.set(k, k as i64)?;
//! }
//! assert_eq!(tree.aggregate(3, 7)?, 3 + 4 + 5 + 6);
//! assert_eq!(tree.aggregate(5, 5)?, 0);
//! # Ok::<(), rangefold::TreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules - each implements a key component of the structure
pub mod agg; // Combining operations and their identities
pub mod tree; // Flat-buffer aggregation tree

// Re-exports for convenience
pub use agg::{Aggregator, Fold, Max, Min, Sum};
pub use tree::AggregationTree;

use thiserror::Error;

/// Errors reported by [`AggregationTree`] operations.
///
/// Every failure is synchronous and precedes any mutation; a failing call
/// leaves the tree exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Element access outside `[0, len)`.
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange {
        /// Logical position that was requested.
        index: usize,
        /// Number of elements in the tree.
        length: usize,
    },

    /// Range aggregate with a bound above the length.
    ///
    /// An inverted or empty range within bounds is not an error; it is the
    /// defined empty-range case and yields the identity.
    #[error("range bound {bound} exceeds length {length}")]
    BoundOutOfRange {
        /// Offending range bound.
        bound: usize,
        /// Number of elements in the tree.
        length: usize,
    },

    /// Construction with zero elements.
    #[error("tree length must be positive")]
    ZeroLength,
}
