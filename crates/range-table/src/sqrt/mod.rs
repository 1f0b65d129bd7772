//! Recursive block (sqrt) table
//!
//! The table consists of layers of aligned blocks whose sizes are powers of two. The top layer
//! splits the whole sequence into sub-blocks of about `sqrt(n)` elements, and every further
//! layer splits the sub-blocks of the previous one again into sub-blocks of about the square
//! root of their size, until single elements are reached. This takes `O(log log n)` layers.
//!
//! Every layer stores for each position:
//!
//! - the aggregate from the start of its sub-block to the position (`prefix`),
//! - the aggregate from the position to the end of its sub-block (`suffix`),
//!
//! and for each outer block, the aggregate of every run of whole sub-blocks inside it
//! (`between`). As an outer block has about `sqrt` sub-blocks, this is linear for each layer.
//!
//! A query `[l, r]` is answered by the single layer in which `l` and `r` share an outer block
//! but not a sub-block, which is found from the highest bit in which they differ:
//!
//! ```text
//! | outer block                                                  |
//! | sub-block | sub-block | sub-block | sub-block | sub-block    |
//!       l ...........................................  r
//!       |suffix|        between        |   prefix   |
//! ```
//!
//! The three pieces are disjoint, so any associative operation works.
//!
//! All block boundaries can be shifted by an offset chosen by a [`BoundaryPolicy`] at build
//! time, see [`SqrtTable::with_policy`].

pub mod policy;

use policy::{Aligned, BoundaryPolicy};

use crate::{
    RangeQuery,
    error::Result,
    op::Operation,
    util::{ceil_log2, ensure_non_empty, try_to_vec, try_vec},
};

#[derive(Debug, Clone)]
struct Layer<T> {
    /// Each sub-block has `2^block_bits` positions
    block_bits: u32,
    /// Each outer block has `2^fan_bits` sub-blocks
    fan_bits: u32,
    prefix: Vec<T>,
    suffix: Vec<T>,
    /// For each outer block, a `2^fan_bits` square whose entry `(p, q)` is the aggregate of
    /// sub-blocks `p..=q`. Entries with `p > q` are never read.
    between: Vec<T>,
}

impl<T: Copy> Layer<T> {
    fn build<F: Operation<T>>(
        values: &[T],
        shift: usize,
        outer_bits: u32,
        block_bits: u32,
        op: &F,
    ) -> Result<Self> {
        let len = values.len();
        let block_mask = (1 << block_bits) - 1;

        let mut prefix = try_to_vec(values)?;
        for i in 1..len {
            if (i + shift) & block_mask != 0 {
                prefix[i] = op.combine(prefix[i - 1], values[i]);
            }
        }

        let mut suffix = try_to_vec(values)?;
        for i in (0..len - 1).rev() {
            if (i + 1 + shift) & block_mask != 0 {
                suffix[i] = op.combine(values[i], suffix[i + 1]);
            }
        }

        // Positions are shifted, so sub-blocks before `shift` are empty
        let virtual_len = len + shift;
        let sub_block = |g: usize| -> Option<T> {
            let first = usize::max(g << block_bits, shift);
            let last = usize::min(((g + 1) << block_bits) - 1, virtual_len - 1);
            (first <= last).then(|| suffix[first - shift])
        };

        let fan_bits = outer_bits - block_bits;
        let fan = 1 << fan_bits;
        let n_outer = (virtual_len + (1 << outer_bits) - 1) >> outer_bits;
        let mut between = try_vec(n_outer * fan * fan)?;
        for outer in 0..n_outer {
            for p in 0..fan {
                let mut acc: Option<T> = None;
                for q in 0..fan {
                    if q >= p {
                        acc = match (acc, sub_block((outer << fan_bits) + q)) {
                            (Some(a), Some(b)) => Some(op.combine(a, b)),
                            (a, None) => a,
                            (None, b) => b,
                        };
                    }
                    between.push(acc.unwrap_or(values[0]));
                }
            }
        }

        Ok(Self {
            block_bits,
            fan_bits,
            prefix,
            suffix,
            between,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SqrtTable<T, F> {
    values: Vec<T>,
    /// Offset added to every position before locating its block
    shift: usize,
    layers: Vec<Layer<T>>,
    /// Index of the layer to use, by highest differing bit of the shifted endpoints
    layer_of: Vec<u8>,
    op: F,
}

impl<T: Copy, F: Operation<T>> SqrtTable<T, F> {
    /// Build a table with blocks aligned to multiples of their size.
    pub fn new(values: &[T], op: F) -> Result<Self> {
        Self::with_policy(values, op, &mut Aligned)
    }

    /// Build a table whose block boundaries are shifted by an offset chosen by `policy`.
    ///
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use range_table::prelude::*;
    ///
    /// let values = [3, 1, 4, 1, 5, 9, 2, 6];
    /// let mut policy = Shuffled(SmallRng::seed_from_u64(42));
    /// let table = SqrtTable::with_policy(&values, Max, &mut policy).unwrap();
    /// assert_eq!(table.query(1, 3), 4);
    /// ```
    pub fn with_policy<P: BoundaryPolicy + ?Sized>(
        values: &[T],
        op: F,
        policy: &mut P,
    ) -> Result<Self> {
        ensure_non_empty(values)?;
        let len = values.len();

        // Shift by less than one top layer sub-block
        let span = 1 << (ceil_log2(len) / 2);
        let shift = policy.offset(span);
        let top_bits = ceil_log2(len + shift);

        let mut layers = Vec::new();
        let mut layer_of = vec![0; top_bits as usize];
        let mut outer_bits = top_bits;
        while outer_bits > 0 {
            let block_bits = outer_bits / 2;
            for h in block_bits..outer_bits {
                layer_of[h as usize] = layers.len() as u8;
            }
            layers.push(Layer::build(values, shift, outer_bits, block_bits, &op)?);
            outer_bits = block_bits;
        }

        tracing::debug!(len, shift, layers = layers.len(), "built sqrt table");
        Ok(Self {
            values: try_to_vec(values)?,
            shift,
            layers,
            layer_of,
            op,
        })
    }

    /// Offset all block boundaries are shifted by.
    pub fn offset(&self) -> usize {
        self.shift
    }
}

impl<T: Copy, F: Operation<T>> RangeQuery<T> for SqrtTable<T, F> {
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

        let (xl, xr) = (left + self.shift, right + self.shift);
        let layer = &self.layers[self.layer_of[(xl ^ xr).ilog2() as usize] as usize];
        let head = layer.suffix[left];
        let tail = layer.prefix[right];

        let (bl, br) = (xl >> layer.block_bits, xr >> layer.block_bits);
        if br == bl + 1 {
            return self.op.combine(head, tail);
        }

        // Sub-blocks bl + 1 and br - 1 are in the same outer block
        let fan_mask = (1 << layer.fan_bits) - 1;
        let index = ((bl + 1) << layer.fan_bits) | ((br - 1) & fan_mask);
        self.op
            .combine(self.op.combine(head, layer.between[index]), tail)
    }
}
