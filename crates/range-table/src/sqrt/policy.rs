//! Policies to place block boundaries of a [`SqrtTable`](super::SqrtTable)

use rand::Rng;

/// Choose how far all block boundaries of a table are shifted.
///
/// The shift only changes which elements share a block, and so the cost of a query, never its
/// result.
pub trait BoundaryPolicy {
    /// Returns an offset in `0..span`.
    fn offset(&mut self, span: usize) -> usize;
}

/// Blocks aligned to multiples of their size.
#[derive(Debug, Default, Clone, Copy)]
pub struct Aligned;

impl BoundaryPolicy for Aligned {
    fn offset(&mut self, _span: usize) -> usize {
        0
    }
}

/// Blocks shifted by a uniformly random offset for each build.
///
/// This avoids inputs whose queries correlate with a fixed alignment.
#[derive(Debug, Clone)]
pub struct Shuffled<R>(pub R);

impl<R: Rng> BoundaryPolicy for Shuffled<R> {
    fn offset(&mut self, span: usize) -> usize {
        if span <= 1 {
            0
        } else {
            self.0.random_range(0..span)
        }
    }
}
