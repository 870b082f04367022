//! Combining operations and their identities
//!
//! The tree is generic over any associative binary operation with a
//! two-sided identity element. The operation and its identity travel
//! together as one value implementing [`Aggregator`]; the identity is plain
//! data on the implementor, never configuration smuggled through a shared
//! function object.

mod ops;

pub use ops::{Fold, Max, Min, Sum};

/// An associative combining operation with a two-sided identity element.
///
/// Caller contract (not checked at runtime): `combine` must be associative,
/// and `identity()` must satisfy `combine(identity(), x) == x ==
/// combine(x, identity())` for every `x`. Commutativity is NOT required —
/// [`AggregationTree`](crate::AggregationTree) evaluates strictly left to
/// right. A non-associative operation yields unspecified (but memory-safe)
/// aggregate results.
pub trait Aggregator {
    /// Element type the operation combines.
    type Value: Clone;

    /// The identity element for [`combine`](Aggregator::combine).
    fn identity(&self) -> Self::Value;

    /// Combine two adjacent values, left operand before right.
    fn combine(&self, left: Self::Value, right: Self::Value) -> Self::Value;

    /// Fold a sequence left to right, starting from the identity.
    fn reduce<I>(&self, values: I) -> Self::Value
    where
        I: IntoIterator<Item = Self::Value>,
    {
        values
            .into_iter()
            .fold(self.identity(), |acc, value| self.combine(acc, value))
    }
}
