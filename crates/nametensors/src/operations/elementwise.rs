//! Element-wise operations with automatic conformance.

use faer_traits::ComplexField;

use crate::axis::AxisKind;
use crate::conform::conform;
use crate::error::TensorError;
use crate::layout::reorder;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Combine two tensors element-wise under `f`.
///
/// The operands are first conformed: each is broadcast across the axes it
/// is missing, then the right operand is brought to the left operand's
/// axis order. The result carries the conformed left operand's axes.
///
/// # Errors
///
/// [`TensorError::NameCollision`] if the axis sets cannot be merged.
///
/// # Examples
///
/// ```
/// use nametensors::{zip, PlainAxis, Tensor};
///
/// let v = Tensor::new(vec![PlainAxis::plain(3, "m")], vec![1.0, 2.0, 3.0]).unwrap();
/// let s = Tensor::<f64>::from_scalar(10.0);
/// let out = zip(&v, &s, |a, b| a * b).unwrap();
/// assert_eq!(out.data(), &[10.0, 20.0, 30.0]);
/// ```
pub fn zip<T: Scalar, K: AxisKind>(
    a: &Tensor<T, K>,
    b: &Tensor<T, K>,
    f: impl Fn(T, T) -> T,
) -> Result<Tensor<T, K>, TensorError> {
    let conformed = conform(&[a, b])?;
    let names = conformed[0].axis_names();
    let aligned = reorder(&conformed[1], &names)?;
    let data: Vec<T> = conformed[0]
        .data()
        .iter()
        .zip(aligned.data().iter())
        .map(|(&x, &y)| f(x, y))
        .collect();
    Ok(Tensor::assemble(conformed[0].axes().to_vec(), data))
}

/// Element-wise sum, broadcasting over missing axes.
pub fn add<T: Scalar, K: AxisKind>(
    a: &Tensor<T, K>,
    b: &Tensor<T, K>,
) -> Result<Tensor<T, K>, TensorError> {
    zip(a, b, |x, y| x + y)
}

/// Multiply every element by a scalar.
pub fn scale<T: Scalar, K: AxisKind>(tensor: &Tensor<T, K>, alpha: T) -> Tensor<T, K> {
    let data: Vec<T> = tensor.data().iter().map(|&x| x * alpha).collect();
    Tensor::assemble(tensor.axes().to_vec(), data)
}

/// Element-wise complex conjugation (identity for real tensors).
pub fn conj<T: Scalar, K: AxisKind>(tensor: &Tensor<T, K>) -> Tensor<T, K> {
    let data: Vec<T> = tensor.data().iter().map(ComplexField::conj_impl).collect();
    Tensor::assemble(tensor.axes().to_vec(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::PlainAxis;
    use crate::scalar::c64;

    #[test]
    fn test_add_same_axes_different_order() {
        let a = Tensor::new(
            vec![PlainAxis::plain(2, "i"), PlainAxis::plain(3, "j")],
            (0..6).map(|x| x as f64).collect(),
        )
        .unwrap();
        let b = crate::layout::reorder(&a, &["j", "i"]).unwrap();
        let sum = add(&a, &b).unwrap();
        assert_eq!(sum.axis_names(), vec!["i", "j"]);
        for i in 0..2 {
            for j in 0..3 {
                let key = [("i", i), ("j", j)];
                assert_eq!(sum.at(&key), a.at(&key).map(|x| x * 2.0));
            }
        }
    }

    #[test]
    fn test_add_broadcasts_missing_axes() {
        let v = Tensor::new(vec![PlainAxis::plain(2, "i")], vec![1.0, 2.0]).unwrap();
        let w = Tensor::new(vec![PlainAxis::plain(3, "j")], vec![10.0, 20.0, 30.0]).unwrap();
        let sum = add(&v, &w).unwrap();
        assert_eq!(sum.len(), 6);
        assert_eq!(sum.at(&[("i", 1), ("j", 2)]), Some(32.0));
    }

    #[test]
    fn test_add_extent_conflict() {
        let a = Tensor::<f64>::new(vec![PlainAxis::plain(2, "i")], vec![0.0; 2]).unwrap();
        let b = Tensor::<f64>::new(vec![PlainAxis::plain(3, "i")], vec![0.0; 3]).unwrap();
        assert!(matches!(add(&a, &b), Err(TensorError::NameCollision { .. })));
    }

    #[test]
    fn test_scale() {
        let v = Tensor::new(vec![PlainAxis::plain(3, "m")], vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(scale(&v, 2.0).data(), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_conj() {
        let v = Tensor::<c64>::new(
            vec![PlainAxis::plain(2, "m")],
            vec![c64::new(1.0, 2.0), c64::new(3.0, -4.0)],
        )
        .unwrap();
        let c = conj(&v);
        assert_eq!(c.data()[0], c64::new(1.0, -2.0));
        assert_eq!(c.data()[1], c64::new(3.0, 4.0));
    }
}
