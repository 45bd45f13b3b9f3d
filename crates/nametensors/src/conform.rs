//! Conformance and broadcast: merge the axis sets of several tensors into
//! one superset and replicate each tensor across the axes it is missing.
//!
//! Broadcast axes are placed as a prefix block (slowest-varying), so the
//! physical replication is whole-buffer repetition. There is no lazy
//! broadcast view; the result owns a full buffer.

use crate::axis::{Axis, AxisKind};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Merge the axis descriptors of `tensors` into one superset, keyed by
/// name in first-seen order.
///
/// # Errors
///
/// [`TensorError::NameCollision`] if two tensors declare the same axis
/// name with different extents. Kind tags are not checked here; that is
/// pairwise contraction's job at use time.
pub fn axis_union<T: Scalar, K: AxisKind>(
    tensors: &[&Tensor<T, K>],
) -> Result<Vec<Axis<K>>, TensorError> {
    let mut union: Vec<Axis<K>> = Vec::new();
    for tensor in tensors {
        for axis in tensor.axes() {
            match union.iter().find(|u| u.name == axis.name) {
                Some(existing) if existing.extent != axis.extent => {
                    return Err(TensorError::NameCollision {
                        name: axis.name.clone(),
                        left: existing.extent,
                        right: axis.extent,
                    });
                }
                Some(_) => {}
                None => union.push(axis.clone()),
            }
        }
    }
    Ok(union)
}

/// Conform a list of tensors: each result carries the full axis union,
/// with formerly missing axes broadcast as a replicated prefix block.
///
/// # Examples
///
/// ```
/// use nametensors::{conform, PlainAxis, Tensor};
///
/// let s = Tensor::<f64>::from_scalar(2.0);
/// let v = Tensor::new(vec![PlainAxis::plain(5, "m")], vec![0.0; 5]).unwrap();
/// let out = conform(&[&s, &v]).unwrap();
/// assert_eq!(out[0].axis_names(), vec!["m"]);
/// assert_eq!(out[0].data(), &[2.0; 5]);
/// ```
pub fn conform<T: Scalar, K: AxisKind>(
    tensors: &[&Tensor<T, K>],
) -> Result<Vec<Tensor<T, K>>, TensorError> {
    let union = axis_union(tensors)?;
    Ok(tensors
        .iter()
        .map(|tensor| broadcast_missing(tensor, &union))
        .collect())
}

/// Replicate `tensor` across the union axes it is missing, as a prefix
/// block in union order. Tensors already carrying every union axis are
/// copied unchanged.
fn broadcast_missing<T: Scalar, K: AxisKind>(
    tensor: &Tensor<T, K>,
    union: &[Axis<K>],
) -> Tensor<T, K> {
    let missing: Vec<&Axis<K>> = union
        .iter()
        .filter(|u| tensor.position(&u.name).is_none())
        .collect();
    if missing.is_empty() {
        return tensor.clone();
    }

    let copies: usize = missing.iter().map(|a| a.extent).product();
    let mut axes: Vec<Axis<K>> = missing.into_iter().cloned().collect();
    axes.extend(tensor.axes().iter().cloned());

    let mut data = Vec::with_capacity(copies * tensor.len());
    for _ in 0..copies {
        data.extend_from_slice(tensor.data());
    }
    Tensor::assemble(axes, data)
}
