//! Pairwise contraction over shared axis names.

use crate::axis::{Axis, AxisKind};
use crate::backend::multiply_shared_block;
use crate::error::TensorError;
use crate::layout::move_to_front;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Dry-run analysis of a pairwise contraction.
///
/// Computed once and consumed both by the planner (for its cost estimate,
/// without touching any buffer) and by [`contract_pair`] (to drive the
/// actual multiply).
#[derive(Debug, Clone)]
pub struct PairContraction<K: AxisKind> {
    /// Shared axis names, in the left operand's order.
    pub shared: Vec<String>,
    /// Left operand's non-shared axes, in their original order.
    pub a_private: Vec<Axis<K>>,
    /// Right operand's non-shared axes, in their original order.
    pub b_private: Vec<Axis<K>>,
    /// Product of the shared extents.
    pub shared_len: usize,
    /// Element count of the contraction result.
    pub output_len: usize,
}

impl<K: AxisKind> PairContraction<K> {
    /// Analyze a pair without touching element data.
    ///
    /// # Errors
    ///
    /// - [`TensorError::NameCollision`] if a shared name has different
    ///   extents on the two sides.
    /// - [`TensorError::IncompatibleAxis`] if any shared pair of
    ///   descriptors fails the kind compatibility check; both descriptors
    ///   are carried in the error.
    pub fn analyze<T: Scalar>(
        a: &Tensor<T, K>,
        b: &Tensor<T, K>,
    ) -> Result<Self, TensorError> {
        let mut shared = Vec::new();
        let mut shared_len = 1;
        for axis_a in a.axes() {
            let Some(axis_b) = b.axis(&axis_a.name) else {
                continue;
            };
            if axis_a.extent != axis_b.extent {
                return Err(TensorError::NameCollision {
                    name: axis_a.name.clone(),
                    left: axis_a.extent,
                    right: axis_b.extent,
                });
            }
            if !axis_a.kind.compat(&axis_b.kind) {
                return Err(TensorError::IncompatibleAxis {
                    name: axis_a.name.clone(),
                    left: format!("{axis_a:?}"),
                    right: format!("{axis_b:?}"),
                });
            }
            shared.push(axis_a.name.clone());
            shared_len *= axis_a.extent;
        }

        let a_private: Vec<Axis<K>> = a
            .axes()
            .iter()
            .filter(|axis| b.axis(&axis.name).is_none())
            .cloned()
            .collect();
        let b_private: Vec<Axis<K>> = b
            .axes()
            .iter()
            .filter(|axis| a.axis(&axis.name).is_none())
            .cloned()
            .collect();

        let output_len = a_private
            .iter()
            .chain(b_private.iter())
            .map(|axis| axis.extent)
            .product();

        Ok(Self {
            shared,
            a_private,
            b_private,
            shared_len,
            output_len,
        })
    }
}

/// Contract two tensors over their shared axis names.
///
/// Both operands are brought to a `[shared, private]` layout (shared block
/// in the left operand's order, remainders untouched) and multiplied with
/// a single gemm. The result's axes are the right operand's private axes
/// followed by the left operand's private axes; that is the layout the
/// multiply naturally produces, so no output transpose happens.
///
/// Returns the result together with the analysis' estimated element count
/// (always equal to the result's actual length).
///
/// # Examples
///
/// ```
/// use nametensors::{contract_pair, PlainAxis, Tensor};
///
/// let a = Tensor::new(
///     vec![PlainAxis::plain(3, "i"), PlainAxis::plain(2, "k")],
///     vec![1.0; 6],
/// )
/// .unwrap();
/// let b = Tensor::new(
///     vec![PlainAxis::plain(2, "k"), PlainAxis::plain(4, "j")],
///     vec![1.0; 8],
/// )
/// .unwrap();
/// let (c, estimate) = contract_pair(&a, &b).unwrap();
/// assert_eq!(c.axis_names(), vec!["j", "i"]);
/// assert_eq!(c.len(), estimate);
/// ```
pub fn contract_pair<T: Scalar, K: AxisKind>(
    a: &Tensor<T, K>,
    b: &Tensor<T, K>,
) -> Result<(Tensor<T, K>, usize), TensorError> {
    let analysis = PairContraction::analyze(a, b)?;
    let shared_refs: Vec<&str> = analysis.shared.iter().map(|s| s.as_str()).collect();

    let a_fronted = move_to_front(a, &shared_refs)?;
    let b_fronted = move_to_front(b, &shared_refs)?;

    let shared_len = analysis.shared_len;
    let a_private_len = a.len() / shared_len;
    let b_private_len = b.len() / shared_len;

    let data = multiply_shared_block(
        a_fronted.data(),
        b_fronted.data(),
        shared_len,
        a_private_len,
        b_private_len,
    );

    // Output layout is B-private (slow) then A-private (fast); take the
    // axes from the fronted operands so the free remainder order matches
    // the buffer exactly.
    let n_shared = analysis.shared.len();
    let mut axes: Vec<Axis<K>> = b_fronted.axes()[n_shared..].to_vec();
    axes.extend_from_slice(&a_fronted.axes()[n_shared..]);

    Ok((Tensor::assemble(axes, data), analysis.output_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, PlainAxis, Variance};
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_multiply_example() {
        // A{(i,3),(k,2)} x B{(k,2),(j,4)} over k -> {(j,4),(i,3)}.
        let a = Tensor::new(
            vec![PlainAxis::plain(3, "i"), PlainAxis::plain(2, "k")],
            (0..6).map(|x| x as f64).collect(),
        )
        .unwrap();
        let b = Tensor::new(
            vec![PlainAxis::plain(2, "k"), PlainAxis::plain(4, "j")],
            (0..8).map(|x| (x as f64) * 0.5).collect(),
        )
        .unwrap();

        let (c, estimate) = contract_pair(&a, &b).unwrap();
        assert_eq!(c.axis_names(), vec!["j", "i"]);
        assert_eq!(c.len(), 12);
        assert_eq!(estimate, 12);

        for i in 0..3 {
            for j in 0..4 {
                let expected: f64 = (0..2)
                    .map(|k| {
                        a.at(&[("i", i), ("k", k)]).unwrap() * b.at(&[("k", k), ("j", j)]).unwrap()
                    })
                    .sum();
                assert_relative_eq!(c.at(&[("j", j), ("i", i)]).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_shared_block_order_follows_left_operand() {
        // Two shared axes appearing in different orders on the two sides.
        let a = Tensor::new(
            vec![
                PlainAxis::plain(2, "p"),
                PlainAxis::plain(3, "q"),
                PlainAxis::plain(2, "i"),
            ],
            (0..12).map(|x| x as f64).collect(),
        )
        .unwrap();
        let b = Tensor::new(
            vec![
                PlainAxis::plain(3, "q"),
                PlainAxis::plain(2, "j"),
                PlainAxis::plain(2, "p"),
            ],
            (0..12).map(|x| (x as f64) - 3.0).collect(),
        )
        .unwrap();

        let (c, estimate) = contract_pair(&a, &b).unwrap();
        assert_eq!(c.axis_names(), vec!["j", "i"]);
        assert_eq!(estimate, 4);

        for i in 0..2 {
            for j in 0..2 {
                let mut expected = 0.0;
                for p in 0..2 {
                    for q in 0..3 {
                        expected += a.at(&[("p", p), ("q", q), ("i", i)]).unwrap()
                            * b.at(&[("q", q), ("j", j), ("p", p)]).unwrap();
                    }
                }
                assert_relative_eq!(c.at(&[("j", j), ("i", i)]).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_full_contraction_to_scalar() {
        let a = Tensor::new(vec![PlainAxis::plain(3, "k")], vec![1.0, 2.0, 3.0]).unwrap();
        let b = Tensor::new(vec![PlainAxis::plain(3, "k")], vec![4.0, 5.0, 6.0]).unwrap();
        let (c, estimate) = contract_pair(&a, &b).unwrap();
        assert_eq!(c.order(), 0);
        assert_eq!(estimate, 1);
        assert_relative_eq!(c.to_scalar().unwrap(), 32.0);
    }

    #[test]
    fn test_outer_product_when_nothing_shared() {
        let a = Tensor::new(vec![PlainAxis::plain(2, "i")], vec![1.0, 2.0]).unwrap();
        let b = Tensor::new(vec![PlainAxis::plain(3, "j")], vec![3.0, 4.0, 5.0]).unwrap();
        let (c, estimate) = contract_pair(&a, &b).unwrap();
        assert_eq!(c.axis_names(), vec!["j", "i"]);
        assert_eq!(estimate, 6);
        assert_relative_eq!(c.at(&[("i", 1), ("j", 2)]).unwrap(), 10.0);
    }

    #[test]
    fn test_incompatible_kinds_rejected() {
        let a: Tensor<f64, Variance> = Tensor::new(
            vec![Axis::new(Variance::Up, 2, "k")],
            vec![1.0, 2.0],
        )
        .unwrap();
        let b: Tensor<f64, Variance> = Tensor::new(
            vec![Axis::new(Variance::Up, 2, "k")],
            vec![3.0, 4.0],
        )
        .unwrap();
        assert!(matches!(
            contract_pair(&a, &b),
            Err(TensorError::IncompatibleAxis { name, .. }) if name == "k"
        ));

        let b_down: Tensor<f64, Variance> = Tensor::new(
            vec![Axis::new(Variance::Down, 2, "k")],
            vec![3.0, 4.0],
        )
        .unwrap();
        let (c, _) = contract_pair(&a, &b_down).unwrap();
        assert_relative_eq!(c.to_scalar().unwrap(), 11.0);
    }

    #[test]
    fn test_dual_makes_same_kind_operands_contractible() {
        let v: Tensor<f64, Variance> = Tensor::new(
            vec![Axis::new(Variance::Up, 2, "k")],
            vec![1.0, 2.0],
        )
        .unwrap();
        assert!(matches!(
            contract_pair(&v, &v),
            Err(TensorError::IncompatibleAxis { .. })
        ));
        let (c, _) = contract_pair(&v.dual(), &v).unwrap();
        assert_relative_eq!(c.to_scalar().unwrap(), 5.0);
    }

    #[test]
    fn test_shared_extent_mismatch_rejected() {
        let a = Tensor::<f64>::new(vec![PlainAxis::plain(2, "k")], vec![0.0; 2]).unwrap();
        let b = Tensor::<f64>::new(vec![PlainAxis::plain(3, "k")], vec![0.0; 3]).unwrap();
        assert!(matches!(
            contract_pair(&a, &b),
            Err(TensorError::NameCollision { .. })
        ));
    }

    #[test]
    fn test_scalar_times_tensor() {
        let s = Tensor::<f64>::from_scalar(2.0);
        let v = Tensor::new(vec![PlainAxis::plain(3, "m")], vec![1.0, 2.0, 3.0]).unwrap();
        let (c, estimate) = contract_pair(&s, &v).unwrap();
        assert_eq!(c.axis_names(), vec!["m"]);
        assert_eq!(estimate, 3);
        assert_eq!(c.data(), &[2.0, 4.0, 6.0]);
    }
}
