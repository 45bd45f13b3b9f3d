//! Layout engine: reorder a tensor's physical buffer to match a requested
//! logical axis order.
//!
//! The engine validates the request, then either takes the identity fast
//! path (when no extent>1 axis physically moves) or hands explicit stride
//! and extent vectors to the backend permutation primitive.

use crate::axis::AxisKind;
use crate::backend::permute_strided;
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::strides::compute_strides;
use crate::tensor::Tensor;

/// Reorder a tensor so its axes appear exactly in `names` order.
///
/// The abstract value (element at each named-index assignment) is
/// unchanged.
///
/// # Errors
///
/// [`TensorError::AxisSetMismatch`] if `names` is not a permutation of the
/// tensor's axis names.
///
/// # Examples
///
/// ```
/// use nametensors::{reorder, PlainAxis, Tensor};
///
/// let t: Tensor<f64> = Tensor::new(
///     vec![PlainAxis::plain(2, "i"), PlainAxis::plain(3, "j")],
///     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
/// )
/// .unwrap();
/// let r = reorder(&t, &["j", "i"]).unwrap();
/// assert_eq!(r.axis_names(), vec!["j", "i"]);
/// assert_eq!(r.at(&[("i", 1), ("j", 0)]), t.at(&[("i", 1), ("j", 0)]));
/// ```
pub fn reorder<T: Scalar, K: AxisKind>(
    tensor: &Tensor<T, K>,
    names: &[&str],
) -> Result<Tensor<T, K>, TensorError> {
    if names.len() != tensor.order() {
        return Err(axis_set_mismatch(tensor, names));
    }
    let mut perm = Vec::with_capacity(names.len());
    for &name in names {
        match tensor.position(name) {
            Some(pos) if !perm.contains(&pos) => perm.push(pos),
            _ => return Err(axis_set_mismatch(tensor, names)),
        }
    }
    Ok(apply_perm(tensor, &perm))
}

/// Move the named axes to the leading (slowest-varying) block, in the
/// given order, leaving the remaining axes in their original relative
/// order.
///
/// This is the building block pairwise contraction uses to make shared
/// axes contiguous without forcing a full reorder of the remainder.
///
/// # Errors
///
/// [`TensorError::AxisSetMismatch`] if a name is repeated or not an axis
/// of the tensor.
pub fn move_to_front<T: Scalar, K: AxisKind>(
    tensor: &Tensor<T, K>,
    names: &[&str],
) -> Result<Tensor<T, K>, TensorError> {
    let mut perm = Vec::with_capacity(tensor.order());
    for &name in names {
        match tensor.position(name) {
            Some(pos) if !perm.contains(&pos) => perm.push(pos),
            _ => return Err(axis_set_mismatch(tensor, names)),
        }
    }
    for pos in 0..tensor.order() {
        if !perm.contains(&pos) {
            perm.push(pos);
        }
    }
    Ok(apply_perm(tensor, &perm))
}

/// Apply a validated axis permutation (`perm[i]` = source position of
/// result axis `i`), skipping the physical pass when the relative order of
/// extent>1 axes is unchanged.
fn apply_perm<T: Scalar, K: AxisKind>(tensor: &Tensor<T, K>, perm: &[usize]) -> Tensor<T, K> {
    let axes = tensor.axes();
    let new_axes: Vec<_> = perm.iter().map(|&p| axes[p].clone()).collect();

    // Extent-1 axes occupy no physical room: if the remaining axes keep
    // their relative order, the buffer is already laid out correctly.
    let physically_unmoved = perm
        .iter()
        .filter(|&&p| axes[p].extent > 1)
        .fold((true, 0usize), |(ok, last), &p| (ok && p >= last, p.max(last)))
        .0;
    if physically_unmoved {
        return Tensor::assemble(new_axes, tensor.data().to_vec());
    }

    let old_extents: Vec<usize> = axes.iter().map(|a| a.extent).collect();
    let old_strides = compute_strides(&old_extents);
    let strides: Vec<usize> = perm.iter().map(|&p| old_strides[p]).collect();
    let extents: Vec<usize> = new_axes.iter().map(|a| a.extent).collect();

    let data = permute_strided(tensor.data(), &strides, &extents);
    Tensor::assemble(new_axes, data)
}

fn axis_set_mismatch<T: Scalar, K: AxisKind>(
    tensor: &Tensor<T, K>,
    names: &[&str],
) -> TensorError {
    TensorError::AxisSetMismatch {
        expected: tensor.axis_names().iter().map(|s| s.to_string()).collect(),
        requested: names.iter().map(|s| s.to_string()).collect(),
    }
}
