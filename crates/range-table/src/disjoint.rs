//! Disjoint sparse table
//!
//! Level `h` splits the positions into aligned blocks of `2^(h + 1)` elements. Inside each
//! block, the left half stores aggregates from every position to the middle of the block and
//! the right half stores aggregates from the middle to every position.
//!
//! For a query `[l, r]` with `l != r`, the highest bit in which `l` and `r` differ selects the
//! level where both lie in the same block but in different halves. The answer is then the
//! left half aggregate at `l` combined with the right half aggregate at `r`. These two pieces
//! never overlap, so any associative operation works.

use crate::{
    RangeQuery,
    error::Result,
    op::Operation,
    util::{ceil_log2, ensure_non_empty, try_to_vec, try_vec},
};

#[derive(Debug, Clone)]
pub struct DisjointTable<T, F> {
    values: Vec<T>,
    levels: Vec<Vec<T>>,
    op: F,
}

impl<T: Copy, F: Operation<T>> DisjointTable<T, F> {
    pub fn new(values: &[T], op: F) -> Result<Self> {
        ensure_non_empty(values)?;
        let len = values.len();
        let depth = ceil_log2(len) as usize;

        let mut levels = try_vec(depth)?;
        for h in 0..depth {
            let half = 1 << h;
            let mut row = try_to_vec(values)?;
            for start in (0..len).step_by(2 * half) {
                let mid = usize::min(start + half, len);
                let end = usize::min(start + 2 * half, len);

                // Left half: aggregate from i to mid - 1
                for i in (start..mid - 1).rev() {
                    row[i] = op.combine(values[i], row[i + 1]);
                }
                // Right half: aggregate from mid to i
                for i in mid + 1..end {
                    row[i] = op.combine(row[i - 1], values[i]);
                }
            }
            levels.push(row);
        }

        tracing::debug!(len, levels = depth, "built disjoint table");
        Ok(Self {
            values: try_to_vec(values)?,
            levels,
            op,
        })
    }
}

impl<T: Copy, F: Operation<T>> RangeQuery<T> for DisjointTable<T, F> {
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn query(&self, left: usize, right: usize) -> T {
        debug_assert!(left <= right, "Left `{left}` must not exceed right `{right}`");
        debug_assert!(right < self.values.len());

        if left == right {
            return self.values[left];
        }
        let row = &self.levels[(left ^ right).ilog2() as usize];
        self.op.combine(row[left], row[right])
    }
}
