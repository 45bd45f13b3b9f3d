//! Stride-based flat-buffer permutation.

use crate::scalar::Scalar;
use crate::strides::linear_to_cartesian;

/// Permute a flat buffer given explicit stride and extent vectors.
///
/// `new_extents[i]` is the extent of result axis `i`, and `old_strides[i]`
/// is the stride that axis had in the source layout. For every result
/// position, the cartesian index is decomposed row-major over
/// `new_extents` and dotted with `old_strides` to locate the source
/// element.
///
/// # Panics
///
/// Panics if `data.len()` differs from `product(new_extents)` or if the
/// stride/extent vectors disagree in length.
pub fn permute_strided<T: Scalar>(
    data: &[T],
    old_strides: &[usize],
    new_extents: &[usize],
) -> Vec<T> {
    assert_eq!(old_strides.len(), new_extents.len());
    let total: usize = new_extents.iter().product::<usize>().max(1);
    assert_eq!(data.len(), total);

    let mut out = Vec::with_capacity(total);
    for linear in 0..total {
        let indices = linear_to_cartesian(linear, new_extents);
        let old: usize = indices
            .iter()
            .zip(old_strides.iter())
            .map(|(&idx, &stride)| idx * stride)
            .sum();
        out.push(data[old]);
    }
    out
}
