//! nametensors - named-index tensor algebra
//!
//! Multidimensional arrays whose axes carry symbolic names (and typed kind
//! tags) instead of positional indices, with Einstein-summation-style
//! contraction between them.
//!
//! # Architecture
//!
//! ```text
//! smart_contract (greedy n-ary planner)
//!     → contract_pair (shared axes -> one gemm)
//!         → layout (reorder / move_to_front)
//!         → conform (axis union + broadcast)
//!             → backend (faer matmul, stride permutation)
//! ```
//!
//! # Example
//!
//! ```
//! use nametensors::{contract_pair, PlainAxis, Tensor};
//!
//! // C[j,i] = sum over k of A[i,k] * B[k,j]
//! let a = Tensor::new(
//!     vec![PlainAxis::plain(2, "i"), PlainAxis::plain(3, "k")],
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
//! )
//! .unwrap();
//! let b = Tensor::new(
//!     vec![PlainAxis::plain(3, "k"), PlainAxis::plain(2, "j")],
//!     vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
//! )
//! .unwrap();
//!
//! let (c, _estimate) = contract_pair(&a, &b).unwrap();
//! assert_eq!(c.axis_names(), vec!["j", "i"]);
//! assert_eq!(c.at(&[("i", 0), ("j", 0)]), Some(1.0 + 3.0));
//! ```

pub mod axis;
pub mod backend;
pub mod conform;
pub mod contract;
pub mod error;
pub mod layout;
pub mod operations;
pub mod random;
pub mod scalar;
pub mod strides;
pub mod tensor;

pub use axis::{Axis, AxisKind, PlainAxis, Variance};
pub use conform::conform;
pub use contract::{contract_pair, smart_contract, PairContraction};
pub use error::TensorError;
pub use layout::{move_to_front, reorder};
pub use operations::{add, conj, scale, zip};
pub use random::{RandomNormal, RandomUniform};
pub use scalar::{c64, Scalar};
pub use tensor::Tensor;
