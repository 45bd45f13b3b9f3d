//! Stride computation utilities.
//!
//! Uses row-major (C) order: later-listed axes vary fastest.

/// Compute row-major strides from extents.
///
/// For extents `[d0, d1, d2]`, returns strides `[d1*d2, d2, 1]`.
///
/// # Examples
///
/// ```
/// use nametensors::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]), vec![20, 5, 1]);
/// assert_eq!(compute_strides(&[2, 3]), vec![3, 1]);
/// assert_eq!(compute_strides(&[5]), vec![1]);
/// assert_eq!(compute_strides(&[]), vec![]);
/// ```
pub fn compute_strides(extents: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; extents.len()];
    let mut stride = 1;

    for (s, &dim) in strides.iter_mut().zip(extents.iter()).rev() {
        *s = stride;
        stride *= dim;
    }

    strides
}

/// Convert cartesian indices to a linear index given strides.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Convert a linear index to cartesian indices using row-major order.
pub fn linear_to_cartesian(mut linear: usize, extents: &[usize]) -> Vec<usize> {
    let mut indices = vec![0; extents.len()];

    for (idx, &dim) in indices.iter_mut().zip(extents.iter()).rev() {
        *idx = linear % dim;
        linear /= dim;
    }

    indices
}
