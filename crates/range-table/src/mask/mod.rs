//! Bit-signature block table
//!
//! The sequence is split into blocks of [`BLOCK`] elements. Each block only stores the dense id
//! of its [signature](shape::signature), and all ranges inside a block are answered by the
//! global [`ShapeTable`](shape::ShapeTable) shared by every table. Ranges spanning several
//! blocks combine the answers in the two boundary blocks with a [`SparseTable`] over the best
//! element of each block.
//!
//! Building takes linear time: the signatures are computed with a stack of at most
//! [`BLOCK`] elements, and the sparse table is built over `n / BLOCK` elements only.
//!
//! Signatures only describe the relative order of elements, so this table answers with the
//! best element under a [`StrictOrder`] (the leftmost one on ties) instead of a general
//! aggregate.

pub mod shape;

use shape::{BLOCK, ShapeTable, shapes, signature};

use crate::{
    RangeQuery, SparseTable,
    error::Result,
    op::{Operation, Pick, StrictOrder},
    util::{ensure_non_empty, try_to_vec, try_vec},
};

#[derive(Debug, Clone)]
pub struct MaskTable<T, C> {
    values: Vec<T>,
    /// Shape id of each block
    blocks: Vec<u16>,
    /// Best element of each block
    sparse: SparseTable<T, Pick<C>>,
    shapes: &'static ShapeTable,
}

impl<T: Copy, C: StrictOrder<T>> MaskTable<T, C> {
    pub fn new(values: &[T], order: C) -> Result<Self> {
        ensure_non_empty(values)?;
        let shapes = shapes();

        let n_blocks = values.len().div_ceil(BLOCK);
        let mut blocks = try_vec(n_blocks)?;
        let mut bests = try_vec(n_blocks)?;
        for block in values.chunks(BLOCK) {
            let id = shapes.id(signature(block, &order));
            blocks.push(id);
            bests.push(block[shapes.best(id, 0, block.len() - 1)]);
        }
        let sparse = SparseTable::new(&bests, Pick(order))?;

        tracing::debug!(len = values.len(), blocks = n_blocks, "built mask table");
        Ok(Self {
            values: try_to_vec(values)?,
            blocks,
            sparse,
            shapes,
        })
    }

    /// Best element in `[lo, hi]` of the given block.
    #[inline]
    fn in_block(&self, block: usize, lo: usize, hi: usize) -> T {
        let offset = self.shapes.best(self.blocks[block], lo, hi);
        self.values[block * BLOCK + offset]
    }
}

impl<T: Copy, C: StrictOrder<T>> RangeQuery<T> for MaskTable<T, C> {
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn query(&self, left: usize, right: usize) -> T {
        debug_assert!(left <= right, "Left `{left}` must not exceed right `{right}`");
        debug_assert!(right < self.values.len());

        let (left_block, right_block) = (left / BLOCK, right / BLOCK);
        if left_block == right_block {
            return self.in_block(left_block, left % BLOCK, right % BLOCK);
        }

        let pick = self.sparse.op();
        // Only the last block may be partial, so the left block is full
        let head = self.in_block(left_block, left % BLOCK, BLOCK - 1);
        let tail = self.in_block(right_block, 0, right % BLOCK);
        if right_block == left_block + 1 {
            pick.combine(head, tail)
        } else {
            let middle = self.sparse.query(left_block + 1, right_block - 1);
            pick.combine(pick.combine(head, middle), tail)
        }
    }
}
