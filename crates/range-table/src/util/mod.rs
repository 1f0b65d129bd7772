pub mod bitop;

use crate::error::{Error, Result};

/// Reserve an empty vector for exactly `capacity` elements, reporting allocation failure.
pub(crate) fn try_vec<T>(capacity: usize) -> Result<Vec<T>> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(capacity)?;
    Ok(vec)
}

/// Copy `values` into a freshly reserved vector.
pub(crate) fn try_to_vec<T: Copy>(values: &[T]) -> Result<Vec<T>> {
    let mut vec = try_vec(values.len())?;
    vec.extend_from_slice(values);
    Ok(vec)
}

pub(crate) fn ensure_non_empty<T>(values: &[T]) -> Result<()> {
    if values.is_empty() {
        Err(Error::Empty)
    } else {
        Ok(())
    }
}

/// Smallest `k` such that `2^k >= n`.
#[inline]
pub(crate) const fn ceil_log2(n: usize) -> u32 {
    if n <= 1 { 0 } else { (n - 1).ilog2() + 1 }
}
