//! Implementation of Sparse Table algorithm for idempotent range queries

use crate::{
    RangeQuery,
    error::Result,
    op::Idempotent,
    util::{ensure_non_empty, try_to_vec, try_vec},
};

/// Sparse table over an idempotent operation
///
/// Row `k` stores the aggregate of every window of length `2^k`. A query is answered by
/// combining the two (possibly overlapping) windows of the largest power of two that fits in
/// the range, which is why the operation has to be idempotent.
#[derive(Debug, Clone)]
pub struct SparseTable<T, F> {
    len: usize,
    tables: Vec<Vec<T>>,
    op: F,
}

impl<T: Copy, F: Idempotent<T>> SparseTable<T, F> {
    /// Create a new sparse table with given values
    pub fn new(values: &[T], op: F) -> Result<Self> {
        ensure_non_empty(values)?;
        let len = values.len();
        let n_tables = len.ilog2() as usize + 1;

        let mut tables = try_vec(n_tables)?;
        tables.push(try_to_vec(values)?);

        // Calculate all higher powers of 2
        for k in 1..n_tables {
            let half = 1 << (k - 1);
            let prev = &tables[k - 1];
            let len_k = len - (1 << k) + 1;
            let mut row = try_vec(len_k)?;

            // Give compiler a hint that i and i + half are within bounds
            assert!(len_k + half <= prev.len());
            for i in 0..len_k {
                row.push(op.combine(prev[i], prev[i + half]));
            }
            tables.push(row);
        }

        tracing::debug!(len, rows = n_tables, "built sparse table");
        Ok(Self { len, tables, op })
    }

    pub(crate) fn op(&self) -> &F {
        &self.op
    }
}

impl<T: Copy, F: Idempotent<T>> RangeQuery<T> for SparseTable<T, F> {
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn query(&self, left: usize, right: usize) -> T {
        // This function is very hot, so only check the range on debug builds
        debug_assert!(left <= right, "Left `{left}` must not exceed right `{right}`");
        debug_assert!(
            right < self.len,
            "Right `{right}` must be less than length {}",
            self.len
        );

        let k = (right - left + 1).ilog2() as usize;
        let row = &self.tables[k];

        // If length is a power of 2, both windows are the same one
        self.op.combine(row[left], row[right + 1 - (1 << k)])
    }
}
