//! Logarithmic segment trees
//!
//! These trees answer queries in `O(log n)` but, unlike the other tables, also support
//! overwriting single elements after build. They serve as a baseline for the constant time
//! tables.
//!
//! A tree can also be built with a [`StrictOrder`](crate::op::StrictOrder), which enables
//! `improve`: an element is only replaced by a strictly better one.

pub mod segment;
pub mod zkw;
