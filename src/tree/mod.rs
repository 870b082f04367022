//! Flat-buffer aggregation tree
//!
//! One buffer of 2N nodes holds both the N elements (in the leaves) and
//! every cached subtree aggregate (in the internal nodes `[1, N)`). After
//! every completed update, `buffer[i] == combine(buffer[2i], buffer[2i+1])`
//! for all internal `i` — range queries rest entirely on that invariant
//! plus the left-to-right fold order of the decomposition.

mod layout;
mod path;

use tracing::trace;

use crate::agg::Aggregator;
use crate::TreeError;
use layout::LeafLayout;
use path::RootPath;

/// Fixed-length sequence with O(log N) point updates and O(log N)
/// aggregates over arbitrary contiguous ranges.
///
/// The length, the combining operation, and the identity element are fixed
/// at construction; elements can only be overwritten, never inserted or
/// removed. All operations are synchronous and non-blocking; `&mut self` on
/// [`set`](Self::set) gives every completed update the full aggregate
/// invariant with no torn intermediate state visible to readers.
#[derive(Clone)]
pub struct AggregationTree<A: Aggregator> {
    /// Heap-style node buffer of length 2N; index 0 is an unused sentinel.
    nodes: Vec<A::Value>,
    leaves: LeafLayout,
    agg: A,
    identity: A::Value,
}

impl<A: Aggregator> AggregationTree<A> {
    /// Create a tree of `length` elements, each initialized to the
    /// aggregator's identity.
    pub fn new(length: usize, agg: A) -> Result<Self, TreeError> {
        let identity = agg.identity();
        Self::with_identity(length, agg, identity)
    }

    /// Like [`new`](Self::new), but with an explicit identity element
    /// overriding the aggregator's own.
    ///
    /// The override must still be a two-sided identity for the combining
    /// operation; it seeds every element and is the result of empty
    /// aggregates.
    pub fn with_identity(length: usize, agg: A, identity: A::Value) -> Result<Self, TreeError> {
        if length == 0 {
            return Err(TreeError::ZeroLength);
        }

        let leaves = LeafLayout::new(length);
        let nodes = vec![identity.clone(); 2 * length];
        trace!(length, buffer = nodes.len(), "aggregation tree constructed");

        Ok(Self {
            nodes,
            leaves,
            agg,
            identity,
        })
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Always false; construction rejects zero-length trees.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The identity element in effect for this tree.
    pub fn identity(&self) -> &A::Value {
        &self.identity
    }

    /// Read the element at logical position `index`.
    pub fn get(&self, index: usize) -> Result<&A::Value, TreeError> {
        let slot = self.leaf_slot(index)?;
        Ok(&self.nodes[slot])
    }

    /// Overwrite the element at `index`, then recompute the cached
    /// aggregate of every ancestor, children before parents.
    ///
    /// The bounds check precedes the write; a failing call mutates nothing.
    pub fn set(&mut self, index: usize, value: A::Value) -> Result<(), TreeError> {
        let slot = self.leaf_slot(index)?;
        self.nodes[slot] = value;

        for node in RootPath::exact(slot).skip(1) {
            self.nodes[node] = self.agg.combine(
                self.nodes[layout::left_child(node)].clone(),
                self.nodes[layout::right_child(node)].clone(),
            );
        }

        Ok(())
    }

    /// Fold the elements of the half-open range `[left, right)` left to
    /// right with the combining operation.
    ///
    /// Returns the identity for `left >= right` without touching the
    /// buffer. Bounds above `len()` are errors.
    pub fn aggregate(&self, left: usize, right: usize) -> Result<A::Value, TreeError> {
        self.check_bound(left)?;
        self.check_bound(right)?;
        if left >= right {
            return Ok(self.identity.clone());
        }

        let levels = layout::node_level(right - left) as usize;
        let mut start = self.leaf_slot(left)?;
        let right_leaf = self.leaf_slot(right - 1)?;

        let mut acc = self.identity.clone();

        if start > right_leaf {
            // Inverted slot order means the boundary leaves sit on
            // different levels, the left one deeper. Lift the left ascent's
            // start onto the right leaf's level; a right-child left leaf is
            // not covered by its lifted ancestor, so fold it in directly.
            if layout::is_right_child(start) {
                acc = self.agg.combine(acc, self.nodes[start].clone());
                start = layout::parent(start + 1);
            } else {
                start = layout::parent(start);
            }
        }
        debug_assert_eq!(
            layout::node_level(start),
            layout::node_level(right_leaf),
            "ascent starting points must share a level"
        );

        let ascent_from_left = RootPath::drift_right(start).take(levels);
        let ascent_from_right = RootPath::drift_left(right_leaf).take(levels);

        // Subtree roots absorbed from the right boundary, collected deepest
        // first and folded in reverse to keep element order left to right.
        let mut from_right: Vec<usize> = Vec::new();

        for (left_node, right_node) in ascent_from_left.zip(ascent_from_right) {
            let crossed = left_node >= right_node;
            if !crossed || left_node == right_node {
                if layout::is_right_child(left_node) {
                    acc = self.agg.combine(acc, self.nodes[left_node].clone());
                }
                if layout::is_left_child(right_node) {
                    from_right.push(right_node);
                }
            }
            if crossed {
                break;
            }
        }

        for &node in from_right.iter().rev() {
            acc = self.agg.combine(acc, self.nodes[node].clone());
        }

        Ok(acc)
    }

    /// Apply many point updates in order through [`set`](Self::set).
    ///
    /// On error, entries already applied stay applied; the failing entry
    /// mutates nothing.
    pub fn set_many<I>(&mut self, entries: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = (usize, A::Value)>,
    {
        let mut applied = 0usize;
        for (index, value) in entries {
            self.set(index, value)?;
            applied += 1;
        }
        trace!(applied, "bulk update complete");
        Ok(())
    }

    /// Answer many range aggregates through [`aggregate`](Self::aggregate).
    pub fn aggregate_many<I>(&self, ranges: I) -> Result<Vec<A::Value>, TreeError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        ranges
            .into_iter()
            .map(|(left, right)| self.aggregate(left, right))
            .collect()
    }

    /// The elements in logical order.
    pub fn values(&self) -> impl Iterator<Item = &A::Value> + '_ {
        self.leaves.iter().map(move |slot| &self.nodes[slot])
    }

    fn leaf_slot(&self, index: usize) -> Result<usize, TreeError> {
        self.leaves.slot(index).ok_or(TreeError::IndexOutOfRange {
            index,
            length: self.len(),
        })
    }

    fn check_bound(&self, bound: usize) -> Result<(), TreeError> {
        if bound > self.len() {
            return Err(TreeError::BoundOutOfRange {
                bound,
                length: self.len(),
            });
        }
        Ok(())
    }
}

impl<A: Aggregator> std::fmt::Debug for AggregationTree<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregationTree")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
