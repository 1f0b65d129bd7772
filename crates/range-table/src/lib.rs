#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static range aggregate tables
//!
//! Every table in this crate is built once from a sequence and an operation, and then answers
//! `op(a[left], ..., a[right])` for closed ranges `[left, right]` without ever changing. They
//! differ in what they require from the operation and in the cost of build and query:
//!
//! | Table             | Build           | Query      | Operation                   |
//! |-------------------|-----------------|------------|-----------------------------|
//! | [`SparseTable`]   | `O(n log n)`    | `O(1)`     | idempotent                  |
//! | [`DisjointTable`] | `O(n log n)`    | `O(1)`     | associative                 |
//! | [`SqrtTable`]     | `O(n log log n)`| `O(1)`     | associative                 |
//! | [`MaskTable`]     | `O(n)`          | `O(1)`     | selection by a strict order |
//! | [`ZkwTree`]       | `O(n)`          | `O(log n)` | associative, point updates  |
//! | [`SegmentTree`]   | `O(n)`          | `O(log n)` | associative, point updates  |
//!
//! Once built, a table can be shared between threads and queried concurrently.

mod error;
pub use error::{Error, Result};

mod util;

pub mod op;

pub mod disjoint;
pub mod mask;
pub mod sparse_table;
pub mod sqrt;
pub mod tree;

pub use disjoint::DisjointTable;
pub use mask::MaskTable;
pub use sparse_table::SparseTable;
pub use sqrt::SqrtTable;
pub use tree::{segment::SegmentTree, zkw::ZkwTree};

pub mod prelude {
    //! Import of useful traits and types from the crate

    pub use crate::{
        DisjointTable, MaskTable, PointUpdate, RangeQuery, SegmentTree, SparseTable, SqrtTable,
        ZkwTree, fold_range,
        op::*,
        sqrt::policy::{Aligned, BoundaryPolicy, Shuffled},
    };
}

use op::Operation;

/// Range aggregate queries over a fixed sequence.
pub trait RangeQuery<T> {
    /// Number of elements the table was built from.
    fn len(&self) -> usize;

    /// Tables can't be built from empty sequences, so this is `false` for every built table.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Aggregate of the closed range `[left, right]`.
    ///
    /// The range must satisfy `left <= right < len`. This is only checked in debug builds, use
    /// [`RangeQuery::checked_query`] for untrusted ranges.
    fn query(&self, left: usize, right: usize) -> T;

    /// Aggregate of the closed range `[left, right]`, or an error if the range is invalid.
    ///
    /// ```
    /// use range_table::{Error, prelude::*};
    ///
    /// let table = SparseTable::new(&[3, 1, 4], Max).unwrap();
    /// assert_eq!(table.checked_query(0, 2).unwrap(), 4);
    /// assert!(matches!(table.checked_query(2, 1), Err(Error::InvertedRange { .. })));
    /// assert!(matches!(table.checked_query(0, 3), Err(Error::OutOfBounds { .. })));
    /// ```
    fn checked_query(&self, left: usize, right: usize) -> Result<T> {
        if left > right {
            return Err(Error::InvertedRange { left, right });
        }
        let len = self.len();
        if right >= len {
            return Err(Error::OutOfBounds { right, len });
        }
        Ok(self.query(left, right))
    }
}

/// Tables which also support overwriting single elements after build.
pub trait PointUpdate<T>: RangeQuery<T> {
    /// Replace the element at `index` with `value`.
    fn update(&mut self, index: usize, value: T);
}

/// Fold `op` over `values[left..=right]` from left to right, without any precomputation.
///
/// # Panics
///
/// If the range is empty or out of bounds.
pub fn fold_range<T: Copy, F: Operation<T>>(values: &[T], op: &F, left: usize, right: usize) -> T {
    let range = &values[left..=right];
    range[1..]
        .iter()
        .fold(range[0], |acc, &value| op.combine(acc, value))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::op::{Max, Sum};

    #[test]
    fn test_fold_range() {
        let values = [3, 1, 4, 1, 5, 9, 2, 6];
        assert_eq!(fold_range(&values, &Max, 0, 7), 9);
        assert_eq!(fold_range(&values, &Max, 1, 3), 4);
        assert_eq!(fold_range(&values, &Max, 4, 4), 5);
        assert_eq!(fold_range(&values, &Sum, 0, 7), 31);
    }

    #[test]
    #[should_panic]
    fn test_fold_range_inverted() {
        fold_range(&[1, 2, 3], &Max, 2, 1);
    }
}
