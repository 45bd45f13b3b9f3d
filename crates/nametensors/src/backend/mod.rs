//! Numeric backend for flat-buffer storage operations.
//!
//! The engine above this module is layout bookkeeping; everything that
//! actually touches element buffers in bulk lives here:
//!
//! - `permutation`: stride-based permutation of a flat buffer
//! - `faer_interop`: matrix views over flat buffers and the shared-block
//!   multiply used by pairwise contraction (via faer's matmul)

mod faer_interop;
mod permutation;

pub use faer_interop::{mat_from_row_major, multiply_shared_block, row_major_from_mat};
pub use permutation::permute_strided;
