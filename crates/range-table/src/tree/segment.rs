//! Recursive top-down segment tree

use crate::{
    PointUpdate, RangeQuery,
    error::Result,
    op::{Operation, StrictOrder},
    util::{ensure_non_empty, try_vec},
};

/// Top-down segment tree with node `1` as the root and children `2i` and `2i + 1`
#[derive(Debug, Clone)]
pub struct SegmentTree<T, F, C = ()> {
    len: usize,
    nodes: Vec<T>,
    op: F,
    order: C,
}

impl<T: Copy, F: Operation<T>> SegmentTree<T, F> {
    pub fn new(values: &[T], op: F) -> Result<Self> {
        Self::with_order(values, op, ())
    }
}

impl<T: Copy, F: Operation<T>, C> SegmentTree<T, F, C> {
    /// Build a tree whose [`improve`](Self::improve) replaces elements according to `order`.
    pub fn with_order(values: &[T], op: F, order: C) -> Result<Self> {
        ensure_non_empty(values)?;
        let len = values.len();

        let mut nodes = try_vec(4 * len)?;
        nodes.resize(4 * len, values[0]);
        let mut tree = Self {
            len,
            nodes,
            op,
            order,
        };
        tree.build(1, 0, len - 1, values);

        tracing::debug!(len, "built segment tree");
        Ok(tree)
    }

    fn build(&mut self, node: usize, lo: usize, hi: usize, values: &[T]) {
        if lo == hi {
            self.nodes[node] = values[lo];
            return;
        }
        let mid = (lo + hi) / 2;
        self.build(2 * node, lo, mid, values);
        self.build(2 * node + 1, mid + 1, hi, values);
        self.pull(node);
    }

    #[inline]
    fn pull(&mut self, node: usize) {
        self.nodes[node] = self.op.combine(self.nodes[2 * node], self.nodes[2 * node + 1]);
    }

    fn query_in(&self, node: usize, lo: usize, hi: usize, left: usize, right: usize) -> T {
        if left <= lo && hi <= right {
            return self.nodes[node];
        }
        let mid = (lo + hi) / 2;
        if right <= mid {
            self.query_in(2 * node, lo, mid, left, right)
        } else if left > mid {
            self.query_in(2 * node + 1, mid + 1, hi, left, right)
        } else {
            self.op.combine(
                self.query_in(2 * node, lo, mid, left, right),
                self.query_in(2 * node + 1, mid + 1, hi, left, right),
            )
        }
    }

    fn set_in(&mut self, node: usize, lo: usize, hi: usize, index: usize, value: T) {
        if lo == hi {
            self.nodes[node] = value;
            return;
        }
        let mid = (lo + hi) / 2;
        if index <= mid {
            self.set_in(2 * node, lo, mid, index, value);
        } else {
            self.set_in(2 * node + 1, mid + 1, hi, index, value);
        }
        self.pull(node);
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> T {
        self.query(index, index)
    }
}

impl<T: Copy, F: Operation<T>, C: StrictOrder<T>> SegmentTree<T, F, C> {
    /// Replace the element at `index` only if `value` is strictly better.
    ///
    /// Returns whether the element was replaced.
    pub fn improve(&mut self, index: usize, value: T) -> bool {
        let replace = self.order.better(&self.get(index), &value);
        if replace {
            self.update(index, value);
        }
        replace
    }
}

impl<T: Copy, F: Operation<T>, C> RangeQuery<T> for SegmentTree<T, F, C> {
    fn len(&self) -> usize {
        self.len
    }

    fn query(&self, left: usize, right: usize) -> T {
        debug_assert!(left <= right, "Left `{left}` must not exceed right `{right}`");
        debug_assert!(right < self.len);
        self.query_in(1, 0, self.len - 1, left, right)
    }
}

impl<T: Copy, F: Operation<T>, C> PointUpdate<T> for SegmentTree<T, F, C> {
    fn update(&mut self, index: usize, value: T) {
        debug_assert!(index < self.len);
        self.set_in(1, 0, self.len - 1, index, value);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{
        fold_range,
        op::{Max, Sum},
    };

    #[test]
    fn test_scenario() {
        let tree = SegmentTree::new(&[3, 1, 4, 1, 5, 9, 2, 6], Max).unwrap();
        assert_eq!(tree.query(0, 7), 9);
        assert_eq!(tree.query(1, 3), 4);
        assert_eq!(tree.query(4, 4), 5);
        assert_eq!(tree.query(2, 2), 4);
        assert_eq!(tree.query(5, 5), 9);
    }

    #[test]
    fn test_update_leaves_others() {
        let mut values: Vec<u64> = (0..37).map(|i| (i * 31 + 7) % 23).collect();
        let mut tree = SegmentTree::new(&values, Sum).unwrap();
        for (index, value) in [(0, 100), (36, 200), (18, 300)] {
            tree.update(index, value);
            values[index] = value;
            for l in 0..values.len() {
                for r in l..values.len() {
                    assert_eq!(tree.query(l, r), fold_range(&values, &Sum, l, r));
                }
            }
        }
    }

    #[test]
    fn test_improve() {
        let mut tree = SegmentTree::with_order(&[5, 3, 8], Max, Max).unwrap();
        assert!(!tree.improve(2, 8));
        assert!(!tree.improve(0, 4));
        assert!(tree.improve(1, 6));
        assert_eq!(tree.get(1), 6);
        assert_eq!(tree.query(0, 1), 6);
        assert_eq!(tree.query(0, 2), 8);
    }
}
