//! Tensor contraction.
//!
//! Three layers:
//!
//! - `pair`: analysis and execution of a single pairwise contraction over
//!   shared axis names (reshape both operands to matrices, one gemm).
//! - `diagonal`: self-contraction of repeated axis names within one
//!   tensor (trace-like diagonal sum), used by rename collisions.
//! - `planner`: greedy ordering of an n-ary contraction, repeatedly
//!   feeding the cheapest pair to `pair`.

mod diagonal;
mod pair;
mod planner;

pub use diagonal::contract_repeats;
pub use pair::{contract_pair, PairContraction};
pub use planner::smart_contract;
