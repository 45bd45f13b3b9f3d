//! Error types for nametensors.

use thiserror::Error;

/// Errors that can occur in named-tensor operations.
///
/// All errors are synchronous precondition violations: nothing is retried
/// or coerced, the triggering call aborts and surfaces the error.
#[derive(Debug, Error)]
pub enum TensorError {
    /// Buffer length does not equal the product of the supplied extents.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// An axis was declared with extent zero.
    #[error("axis `{name}` has extent 0; all extents must be at least 1")]
    ZeroExtent { name: String },

    /// A reorder/rename request names a different axis set than the tensor's.
    #[error("axis set mismatch: tensor has {expected:?}, request names {requested:?}")]
    AxisSetMismatch {
        expected: Vec<String>,
        requested: Vec<String>,
    },

    /// Two axes share a name but disagree on extent.
    #[error("axis name `{name}` collides with extents {left} and {right}")]
    NameCollision {
        name: String,
        left: usize,
        right: usize,
    },

    /// Two equally-named axes failed the kind compatibility check.
    /// Both descriptors are carried (Debug-rendered) for diagnosis.
    #[error("axes named `{name}` are incompatible for contraction: {left} vs {right}")]
    IncompatibleAxis {
        name: String,
        left: String,
        right: String,
    },

    /// Buffer extraction invoked on a tensor of the wrong order.
    #[error("expected tensor of order {expected}, got order {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// A planning run failed; aborts the whole `smart_contract` call.
    #[error("contraction planning failed")]
    Planner(#[source] Box<TensorError>),

    /// `smart_contract` was called with no tensors.
    #[error("smart_contract requires at least one tensor")]
    EmptyProduct,

    /// The planner could not name a next pair despite multiple pooled
    /// tensors; only reachable if the size index loses track of the pool.
    #[error("contraction planner ran out of candidate pairs")]
    PlannerExhausted,
}
