//! Elementwise tensor operations over named axes.

mod elementwise;

pub use elementwise::{add, conj, scale, zip};
