//! Operations and orders that tables are built with
//!
//! A table is built with a capability object that tells it how to merge two aggregates. The
//! requirements on that object differ between tables:
//!
//! - Every table needs an associative [`Operation`].
//! - Tables that combine overlapping windows (e.g. [`SparseTable`](crate::SparseTable)) also
//!   need the operation to be [`Idempotent`].
//! - Tables that encode the relative order of elements (e.g. [`MaskTable`](crate::MaskTable))
//!   need a [`StrictOrder`] and answer with the best element.
//!
//! None of these properties can be checked at runtime, they are obligations of the caller.

use std::ops::Add;

/// An associative binary operation over `T`.
pub trait Operation<T> {
    /// Merge the aggregate of a range with the aggregate of the range right after it.
    fn combine(&self, left: T, right: T) -> T;
}

impl<T, F: Fn(T, T) -> T> Operation<T> for F {
    #[inline]
    fn combine(&self, left: T, right: T) -> T {
        self(left, right)
    }
}

/// An operation with `op(x, x) = x`, so overlapping windows can be combined.
pub trait Idempotent<T>: Operation<T> {}

/// Marks a closure as idempotent.
///
/// ```
/// use range_table::prelude::*;
///
/// let gcd = IdempotentFn(|mut a: u32, mut b: u32| {
///     while b != 0 {
///         (a, b) = (b, a % b);
///     }
///     a
/// });
/// let table = SparseTable::new(&[12, 18, 8, 20], gcd).unwrap();
/// assert_eq!(table.query(0, 1), 6);
/// assert_eq!(table.query(0, 3), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdempotentFn<F>(pub F);

impl<T, F: Fn(T, T) -> T> Operation<T> for IdempotentFn<F> {
    #[inline]
    fn combine(&self, left: T, right: T) -> T {
        (self.0)(left, right)
    }
}

impl<T, F: Fn(T, T) -> T> Idempotent<T> for IdempotentFn<F> {}

/// A strict weak order used to select the best of two elements.
pub trait StrictOrder<T> {
    /// Returns `true` if `candidate` is strictly better than `current`.
    fn better(&self, current: &T, candidate: &T) -> bool;
}

impl<T, F: Fn(&T, &T) -> bool> StrictOrder<T> for F {
    #[inline]
    fn better(&self, current: &T, candidate: &T) -> bool {
        self(current, candidate)
    }
}

/// Selects the greatest element, the leftmost one on ties.
#[derive(Debug, Default, Clone, Copy)]
pub struct Max;

/// Selects the least element, the leftmost one on ties.
#[derive(Debug, Default, Clone, Copy)]
pub struct Min;

impl<T: Ord> StrictOrder<T> for Max {
    #[inline]
    fn better(&self, current: &T, candidate: &T) -> bool {
        current < candidate
    }
}

impl<T: Ord> StrictOrder<T> for Min {
    #[inline]
    fn better(&self, current: &T, candidate: &T) -> bool {
        candidate < current
    }
}

impl<T: Ord> Operation<T> for Max {
    #[inline]
    fn combine(&self, left: T, right: T) -> T {
        if left < right { right } else { left }
    }
}

impl<T: Ord> Operation<T> for Min {
    #[inline]
    fn combine(&self, left: T, right: T) -> T {
        if right < left { right } else { left }
    }
}

impl<T: Ord> Idempotent<T> for Max {}

impl<T: Ord> Idempotent<T> for Min {}

/// Addition, associative but not idempotent.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sum;

impl<T: Add<Output = T>> Operation<T> for Sum {
    #[inline]
    fn combine(&self, left: T, right: T) -> T {
        left + right
    }
}

/// Bitwise and.
#[derive(Debug, Default, Clone, Copy)]
pub struct BitAnd;

/// Bitwise or.
#[derive(Debug, Default, Clone, Copy)]
pub struct BitOr;

macro_rules! impl_bit_ops {
    ($($uint_type:ty),*) => {
        $(
            impl Operation<$uint_type> for BitAnd {
                #[inline]
                fn combine(&self, left: $uint_type, right: $uint_type) -> $uint_type {
                    left & right
                }
            }

            impl Idempotent<$uint_type> for BitAnd {}

            impl Operation<$uint_type> for BitOr {
                #[inline]
                fn combine(&self, left: $uint_type, right: $uint_type) -> $uint_type {
                    left | right
                }
            }

            impl Idempotent<$uint_type> for BitOr {}
        )*
    };
}

impl_bit_ops!(u8, u16, u32, u64, u128, usize);

/// The selection derived from a [`StrictOrder`].
///
/// The right operand is only returned if it is strictly better, so a left-to-right fold keeps
/// the leftmost of equally good elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pick<C>(pub C);

impl<T, C: StrictOrder<T>> Operation<T> for Pick<C> {
    #[inline]
    fn combine(&self, left: T, right: T) -> T {
        if self.0.better(&left, &right) {
            right
        } else {
            left
        }
    }
}

impl<T, C: StrictOrder<T>> Idempotent<T> for Pick<C> {}
