//! Iterative bottom-up segment tree

use crate::{
    PointUpdate, RangeQuery,
    error::Result,
    op::{Operation, StrictOrder},
    util::{ensure_non_empty, try_vec},
};

/// Bottom-up segment tree with `2n` nodes
///
/// Leaves are stored at `n..2n` and node `i` combines nodes `2i` and `2i + 1`. Left and right
/// partial results are kept apart during a query, so the operation doesn't need to be
/// commutative, and `n` doesn't need to be a power of two.
#[derive(Debug, Clone)]
pub struct ZkwTree<T, F, C = ()> {
    len: usize,
    nodes: Vec<T>,
    op: F,
    order: C,
}

impl<T: Copy, F: Operation<T>> ZkwTree<T, F> {
    pub fn new(values: &[T], op: F) -> Result<Self> {
        Self::with_order(values, op, ())
    }
}

impl<T: Copy, F: Operation<T>, C> ZkwTree<T, F, C> {
    /// Build a tree whose [`improve`](Self::improve) replaces elements according to `order`.
    pub fn with_order(values: &[T], op: F, order: C) -> Result<Self> {
        ensure_non_empty(values)?;
        let len = values.len();

        // Node 0 is never used, the copy in the first half is overwritten below
        let mut nodes = try_vec(2 * len)?;
        nodes.extend_from_slice(values);
        nodes.extend_from_slice(values);
        for i in (1..len).rev() {
            nodes[i] = op.combine(nodes[2 * i], nodes[2 * i + 1]);
        }

        tracing::debug!(len, "built zkw tree");
        Ok(Self {
            len,
            nodes,
            op,
            order,
        })
    }

    /// Element at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> T {
        self.nodes[self.len + index]
    }

    fn set(&mut self, index: usize, value: T) {
        debug_assert!(index < self.len);
        let mut i = index + self.len;
        self.nodes[i] = value;
        while i > 1 {
            i >>= 1;
            self.nodes[i] = self.op.combine(self.nodes[2 * i], self.nodes[2 * i + 1]);
        }
    }
}

impl<T: Copy, F: Operation<T>, C: StrictOrder<T>> ZkwTree<T, F, C> {
    /// Replace the element at `index` only if `value` is strictly better.
    ///
    /// Returns whether the element was replaced.
    pub fn improve(&mut self, index: usize, value: T) -> bool {
        let replace = self.order.better(&self.get(index), &value);
        if replace {
            self.set(index, value);
        }
        replace
    }
}

impl<T: Copy, F: Operation<T>, C> RangeQuery<T> for ZkwTree<T, F, C> {
    fn len(&self) -> usize {
        self.len
    }

    fn query(&self, left: usize, right: usize) -> T {
        debug_assert!(left <= right, "Left `{left}` must not exceed right `{right}`");
        debug_assert!(right < self.len);

        let merge = |acc: Option<T>, node: T, node_first: bool| -> T {
            match acc {
                Some(acc) if node_first => self.op.combine(node, acc),
                Some(acc) => self.op.combine(acc, node),
                None => node,
            }
        };

        let mut head = None;
        let mut tail = None;
        let (mut l, mut r) = (left + self.len, right + self.len + 1);
        while l < r {
            if l & 1 == 1 {
                head = Some(merge(head, self.nodes[l], false));
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                tail = Some(merge(tail, self.nodes[r], true));
            }
            l >>= 1;
            r >>= 1;
        }

        // A non-empty range visits at least one node
        match (head, tail) {
            (Some(head), Some(tail)) => self.op.combine(head, tail),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => self.get(left),
        }
    }
}

impl<T: Copy, F: Operation<T>, C> PointUpdate<T> for ZkwTree<T, F, C> {
    fn update(&mut self, index: usize, value: T) {
        self.set(index, value);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{
        fold_range,
        op::{Max, Min, Sum},
    };

    #[test]
    fn test_scenario() {
        let tree = ZkwTree::new(&[3, 1, 4, 1, 5, 9, 2, 6], Max).unwrap();
        assert_eq!(tree.query(0, 7), 9);
        assert_eq!(tree.query(1, 3), 4);
        assert_eq!(tree.query(4, 4), 5);
        assert_eq!(tree.query(2, 2), 4);
        assert_eq!(tree.query(5, 5), 9);
    }

    #[test]
    fn test_non_power_of_two() {
        // Concatenation of decimal digits is associative but not commutative
        let concat = |a: (u64, u64), b: (u64, u64)| (a.0 * 10u64.pow(b.1 as u32) + b.0, a.1 + b.1);
        for n in 1..=9u64 {
            let values: Vec<_> = (1..=n).map(|d| (d, 1)).collect();
            let tree = ZkwTree::new(&values, concat).unwrap();
            for l in 0..values.len() {
                for r in l..values.len() {
                    assert_eq!(tree.query(l, r), fold_range(&values, &concat, l, r));
                }
            }
        }
    }

    #[test]
    fn test_update() {
        let mut values = vec![5u32, 3, 8, 1, 9, 2, 7];
        let mut tree = ZkwTree::new(&values, Sum).unwrap();
        tree.update(3, 10);
        values[3] = 10;
        tree.update(0, 0);
        values[0] = 0;
        for l in 0..values.len() {
            for r in l..values.len() {
                assert_eq!(tree.query(l, r), fold_range(&values, &Sum, l, r));
            }
        }
    }

    #[test]
    fn test_improve() {
        let mut tree = ZkwTree::with_order(&[5, 3, 8], Min, Min).unwrap();
        // Equal is not strictly better
        assert!(!tree.improve(1, 3));
        assert!(!tree.improve(1, 4));
        assert_eq!(tree.query(0, 2), 3);
        assert!(tree.improve(2, 1));
        assert_eq!(tree.get(2), 1);
        assert_eq!(tree.query(0, 2), 1);
        assert_eq!(tree.query(0, 1), 3);
    }
}
