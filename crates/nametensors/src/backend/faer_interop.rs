//! Conversion between row-major tensor buffers and faer matrices.
//!
//! Tensor buffers here are row-major while faer matrices are column-major,
//! so a buffer with leading (slow) block S and trailing (fast) block P is,
//! without copying, a column-major `P x S` matrix. The shared-block
//! multiply below exploits this to contract two such buffers with a single
//! gemm and no output transpose.

use faer::linalg::matmul::matmul;
use faer::{Accum, Mat, MatMut, MatRef, Par};

use crate::scalar::Scalar;

/// Contract the leading shared block of two row-major buffers.
///
/// `a` is laid out as `[shared, a_private]` and `b` as `[shared,
/// b_private]`, both row-major with the shared block in identical order.
/// Returns the row-major buffer of the `[b_private, a_private]` result:
///
/// ```text
/// out[q, p] = sum over s of a[s, p] * b[s, q]
/// ```
///
/// Viewed column-major the inputs are `a_v: (a_private x shared)` and
/// `b_v: (b_private x shared)`, and the product `a_v * b_v^T` lands in a
/// column-major `(a_private x b_private)` buffer, which is exactly the
/// row-major `[b_private, a_private]` layout. No transpose of the gemm
/// output is ever materialized.
///
/// # Panics
///
/// Panics if the buffer lengths do not factor as `shared * private`.
pub fn multiply_shared_block<T: Scalar>(
    a: &[T],
    b: &[T],
    shared: usize,
    a_private: usize,
    b_private: usize,
) -> Vec<T> {
    assert_eq!(a.len(), shared * a_private);
    assert_eq!(b.len(), shared * b_private);

    let a_mat = MatRef::from_column_major_slice(a, a_private, shared);
    let b_mat = MatRef::from_column_major_slice(b, b_private, shared);

    let mut out = vec![T::zero(); a_private * b_private];
    let out_mat = MatMut::from_column_major_slice_mut(&mut out, a_private, b_private);

    matmul(
        out_mat,
        Accum::Replace,
        a_mat,
        b_mat.transpose(),
        T::one(),
        Par::Seq,
    );

    out
}

/// Copy a row-major buffer into an owned faer `Mat`.
pub fn mat_from_row_major<T: Scalar>(data: &[T], rows: usize, cols: usize) -> Mat<T> {
    assert_eq!(data.len(), rows * cols);
    Mat::from_fn(rows, cols, |i, j| data[i * cols + j])
}

/// Copy a faer matrix into a row-major buffer.
pub fn row_major_from_mat<T: Scalar>(mat: MatRef<'_, T>) -> Vec<T> {
    let mut data = Vec::with_capacity(mat.nrows() * mat.ncols());
    for i in 0..mat.nrows() {
        for j in 0..mat.ncols() {
            data.push(mat[(i, j)]);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_multiply_via_shared_block() {
        // A[k, i]: shared k (extent 2), private i (extent 3), row-major.
        let a = vec![
            1.0, 2.0, 3.0, // k = 0
            4.0, 5.0, 6.0, // k = 1
        ];
        // B[k, j]: shared k (extent 2), private j (extent 4).
        let b = vec![
            1.0, 0.0, 2.0, 0.0, // k = 0
            0.0, 1.0, 0.0, 2.0, // k = 1
        ];

        let out = multiply_shared_block(&a, &b, 2, 3, 4);
        assert_eq!(out.len(), 12);

        // out[j, i] = sum_k a[k, i] * b[k, j]
        for j in 0..4 {
            for i in 0..3 {
                let expected: f64 = (0..2).map(|k| a[k * 3 + i] * b[k * 4 + j]).sum();
                assert_relative_eq!(out[j * 3 + i], expected);
            }
        }
    }

    #[test]
    fn test_dot_product() {
        // Both sides fully shared: out is a single element.
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        let out = multiply_shared_block(&a, &b, 3, 1, 1);
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0], 32.0);
    }

    #[test]
    fn test_outer_product() {
        // Nothing shared: out[q, p] = a[p] * b[q].
        let a = vec![1.0, 2.0];
        let b = vec![3.0, 4.0, 5.0];
        let out = multiply_shared_block(&a, &b, 1, 2, 3);
        assert_eq!(out, vec![3.0, 6.0, 4.0, 8.0, 5.0, 10.0]);
    }

    #[test]
    fn test_mat_round_trip() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mat = mat_from_row_major(&data, 2, 3);
        assert_eq!(mat[(0, 1)], 2.0);
        assert_eq!(mat[(1, 0)], 4.0);
        assert_eq!(row_major_from_mat(mat.as_ref()), data);
    }
}
