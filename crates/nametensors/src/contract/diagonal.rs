//! Self-contraction of repeated axis names (trace-like diagonal sums).

use crate::axis::{Axis, AxisKind};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::strides::{compute_strides, linear_to_cartesian};
use crate::tensor::Tensor;

/// Contract every repeated axis-name pair in `axes`, reducing the order
/// by two per pair.
///
/// Repeats are processed left-to-right by first occurrence; after each
/// contraction the remaining names are re-scanned, so higher
/// multiplicities collapse one pair at a time. Axes with no repeats pass
/// through unchanged.
///
/// # Errors
///
/// [`TensorError::NameCollision`] if a repeated name carries two
/// different extents (no diagonal exists).
pub fn contract_repeats<T: Scalar, K: AxisKind>(
    mut axes: Vec<Axis<K>>,
    mut data: Vec<T>,
) -> Result<Tensor<T, K>, TensorError> {
    loop {
        let Some((p1, p2)) = first_repeat(&axes) else {
            return Ok(Tensor::assemble(axes, data));
        };
        if axes[p1].extent != axes[p2].extent {
            return Err(TensorError::NameCollision {
                name: axes[p1].name.clone(),
                left: axes[p1].extent,
                right: axes[p2].extent,
            });
        }
        let (next_axes, next_data) = sum_diagonal(&axes, &data, p1, p2);
        axes = next_axes;
        data = next_data;
    }
}

/// First position pair `(p1, p2)` with `p1 < p2` and equal names,
/// scanning `p1` left-to-right.
fn first_repeat<K: AxisKind>(axes: &[Axis<K>]) -> Option<(usize, usize)> {
    for (p1, axis) in axes.iter().enumerate() {
        if let Some(off) = axes[p1 + 1..].iter().position(|b| b.name == axis.name) {
            return Some((p1, p1 + 1 + off));
        }
    }
    None
}

/// Sum the sub-tensors along the diagonal of the two equally-named axes
/// at positions `p1` and `p2`.
fn sum_diagonal<T: Scalar, K: AxisKind>(
    axes: &[Axis<K>],
    data: &[T],
    p1: usize,
    p2: usize,
) -> (Vec<Axis<K>>, Vec<T>) {
    let extents: Vec<usize> = axes.iter().map(|a| a.extent).collect();
    let strides = compute_strides(&extents);
    let diag = axes[p1].extent;
    let diag_stride = strides[p1] + strides[p2];

    let kept: Vec<usize> = (0..axes.len()).filter(|&p| p != p1 && p != p2).collect();
    let out_axes: Vec<Axis<K>> = kept.iter().map(|&p| axes[p].clone()).collect();
    let out_extents: Vec<usize> = out_axes.iter().map(|a| a.extent).collect();
    let out_len: usize = out_extents.iter().product::<usize>().max(1);

    let mut out = Vec::with_capacity(out_len);
    for linear in 0..out_len {
        let indices = linear_to_cartesian(linear, &out_extents);
        let base: usize = indices
            .iter()
            .zip(kept.iter())
            .map(|(&idx, &p)| idx * strides[p])
            .sum();
        let mut acc = T::zero();
        for d in 0..diag {
            acc = acc + data[base + d * diag_stride];
        }
        out.push(acc);
    }
    (out_axes, out)
}
