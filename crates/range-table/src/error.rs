use std::collections::TryReserveError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Cannot build a table from an empty sequence")]
    Empty,

    #[error("Range start {left} is greater than its end {right}")]
    InvertedRange { left: usize, right: usize },

    #[error("Range end {right} is out of bounds for {len} elements")]
    OutOfBounds { right: usize, len: usize },

    #[error("Failed to reserve table storage")]
    Alloc(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;
