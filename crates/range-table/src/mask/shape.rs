//! Shapes of small blocks and the global lookup table of their answers
//!
//! Scanning a block from left to right with a stack of candidates for the best element, every
//! element pops the candidates it is strictly better than and is pushed itself. The sequence
//! of pop counts, written as unary codes, is the block's *signature*. Two blocks with the same
//! signature have the same Cartesian tree, so the best element of any sub-range sits at the same
//! offset in both.
//!
//! For blocks of [`BLOCK`] elements there are only Catalan([`BLOCK`]) = [`SHAPES`] distinct
//! signatures, independent of the length of the sequence. The answers of all sub-ranges of all
//! shapes are computed once and shared by every table through [`shapes`].

use std::sync::LazyLock;

use crate::{op::StrictOrder, util::bitop};

/// Number of elements in a block
pub const BLOCK: usize = 8;

/// Number of distinct shapes of a block
pub const SHAPES: usize = 1430;

/// Signature of the elements of `block`, which has at most [`BLOCK`] elements.
///
/// Shorter blocks are padded with elements worse than all others, which never pop anything
/// and therefore don't change the answer of any sub-range inside the block.
pub fn signature<T, C: StrictOrder<T>>(block: &[T], order: &C) -> u16 {
    debug_assert!(!block.is_empty() && block.len() <= BLOCK);

    let mut stack = [0; BLOCK];
    let mut top = 0;
    let mut sig = 0;
    for (i, candidate) in block.iter().enumerate() {
        let mut pops = 0;
        while top > 0 && order.better(&block[stack[top - 1]], candidate) {
            top -= 1;
            pops += 1;
        }
        stack[top] = i;
        top += 1;
        sig = bitop::u16::push_unary(sig, pops);
    }
    for _ in block.len()..BLOCK {
        sig = bitop::u16::push_unary(sig, 0);
    }
    sig
}

/// Dense ids of all signatures and the answers for every shape.
#[derive(Debug)]
pub struct ShapeTable {
    /// Dense shape id for each signature, `u16::MAX` for impossible signatures
    ids: Vec<u16>,
    /// Offset of the best element, a nibble for each shape and in-block range
    answers: Vec<u8>,
}

static SHAPE_TABLE: LazyLock<ShapeTable> = LazyLock::new(ShapeTable::build);

/// The process-wide shape table, built on first use and never modified afterwards.
pub fn shapes() -> &'static ShapeTable {
    &SHAPE_TABLE
}

/// Nibbles for the answers of one shape
const ANSWERS_PER_SHAPE: usize = BLOCK * BLOCK;

impl ShapeTable {
    /// Every shape is the Cartesian tree of some permutation, so enumerating the permutations
    /// of `0..BLOCK` (larger is better) finds all of them.
    fn build() -> Self {
        let mut ids = vec![u16::MAX; 1 << u16::BITS];
        let mut answers = Vec::with_capacity(SHAPES * ANSWERS_PER_SHAPE / 2);

        let greater = |current: &u8, candidate: &u8| current < candidate;
        let mut perm: [u8; BLOCK] = std::array::from_fn(|i| i as u8);
        permutations(&mut perm, BLOCK, &mut |perm| {
            let sig = signature(perm, &greater) as usize;
            if ids[sig] != u16::MAX {
                return;
            }
            let id = answers.len() / (ANSWERS_PER_SHAPE / 2);
            ids[sig] = id as u16;

            answers.resize(answers.len() + ANSWERS_PER_SHAPE / 2, 0);
            for lo in 0..BLOCK {
                let mut best = lo;
                for hi in lo..BLOCK {
                    if perm[best] < perm[hi] {
                        best = hi;
                    }
                    bitop::u4::set(&mut answers, answer_index(id, lo, hi), best as u8);
                }
            }
        });

        debug_assert_eq!(answers.len(), SHAPES * ANSWERS_PER_SHAPE / 2);
        let table = Self { ids, answers };
        tracing::debug!(shapes = table.count(), "built shape table");
        table
    }

    /// Dense id of a signature produced by [`signature`].
    #[inline]
    pub fn id(&self, sig: u16) -> u16 {
        let id = self.ids[sig as usize];
        debug_assert_ne!(id, u16::MAX, "Signature {sig:#b} is not a valid shape");
        id
    }

    /// Offset of the best element in `[lo, hi]` of a block with the given shape.
    #[inline]
    pub fn best(&self, id: u16, lo: usize, hi: usize) -> usize {
        debug_assert!(lo <= hi && hi < BLOCK);
        bitop::u4::get(&self.answers, answer_index(id as usize, lo, hi)) as usize
    }

    /// Number of distinct shapes.
    pub fn count(&self) -> usize {
        self.answers.len() * 2 / ANSWERS_PER_SHAPE
    }
}

#[inline]
const fn answer_index(id: usize, lo: usize, hi: usize) -> usize {
    (id * BLOCK + lo) * BLOCK + hi
}

/// Heap's algorithm, calling `f` for every permutation of `arr[..k]`.
fn permutations<F: FnMut(&[u8; BLOCK])>(arr: &mut [u8; BLOCK], k: usize, f: &mut F) {
    if k <= 1 {
        f(arr);
        return;
    }
    permutations(arr, k - 1, f);
    for i in 0..k - 1 {
        if k % 2 == 0 {
            arr.swap(i, k - 1);
        } else {
            arr.swap(0, k - 1);
        }
        permutations(arr, k - 1, f);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::op::{Max, Min};

    #[test]
    fn test_permutations() {
        let mut arr: [u8; BLOCK] = std::array::from_fn(|i| i as u8);
        let mut seen = HashSet::new();
        permutations(&mut arr, BLOCK, &mut |perm| {
            seen.insert(*perm);
        });
        assert_eq!(seen.len(), 40320);
    }

    #[test]
    fn test_shape_count() {
        assert_eq!(shapes().count(), SHAPES);
    }

    #[test]
    fn test_signature() {
        // Increasing values pop the previous one each time for max
        assert_eq!(signature(&[1, 2, 3], &Max), 0b0_10_10_0_0_0_0_0);
        // Nothing is popped for decreasing values
        assert_eq!(signature(&[3, 2, 1], &Max), 0);
        // Ties are never popped
        assert_eq!(signature(&[2, 2, 2, 2], &Max), 0);
        assert_eq!(signature(&[1, 2, 3], &Min), 0);
    }

    #[test]
    fn test_same_shape() {
        let a = [10, 30, 20, 50, 40, 60, 5, 7];
        let b = [1, 3, 2, 5, 4, 6, 0, 1];
        assert_eq!(signature(&a, &Max), signature(&b, &Max));
        assert_ne!(signature(&a, &Max), signature(&a, &Min));
    }

    #[test]
    fn test_best() {
        let table = shapes();
        let block = [4, 1, 7, 7, 2, 9, 3, 0];
        let id = table.id(signature(&block, &Max));
        assert_eq!(table.best(id, 0, 7), 5);
        assert_eq!(table.best(id, 0, 1), 0);
        // Leftmost of two equal maxima
        assert_eq!(table.best(id, 1, 4), 2);
        assert_eq!(table.best(id, 3, 4), 3);
        assert_eq!(table.best(id, 6, 7), 6);

        let partial = [5, 8, 6];
        let id = table.id(signature(&partial, &Max));
        assert_eq!(table.best(id, 0, 2), 1);
        assert_eq!(table.best(id, 2, 2), 2);
    }
}
