//! Tests for the greedy multi-tensor contraction planner.

use approx::assert_relative_eq;
use nametensors::{contract_pair, smart_contract, PlainAxis, Tensor, TensorError};

fn chain_tensor(extents: &[(usize, &str)]) -> Tensor<f64> {
    Tensor::random_uniform(
        extents
            .iter()
            .map(|&(e, n)| PlainAxis::plain(e, n))
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_empty_product_is_an_error() {
    let inputs: Vec<Tensor<f64>> = vec![];
    assert!(matches!(
        smart_contract(inputs),
        Err(TensorError::EmptyProduct)
    ));
}

#[test]
fn test_single_input_returned_unchanged() {
    let t = chain_tensor(&[(2, "i"), (3, "j")]);
    let expected = t.data().to_vec();
    let out = smart_contract(vec![t]).unwrap();
    assert_eq!(out.axis_names(), vec!["i", "j"]);
    assert_eq!(out.data(), &expected[..]);
}

/// A chain i-k1-k2-j contracts to the same values as explicit
/// left-to-right pairwise contraction, whatever order the planner picks.
#[test]
fn test_chain_matches_pairwise_reference() {
    let a = chain_tensor(&[(3, "i"), (4, "k1")]);
    let b = chain_tensor(&[(4, "k1"), (5, "k2")]);
    let c = chain_tensor(&[(5, "k2"), (2, "j")]);

    let (ab, _) = contract_pair(&a, &b).unwrap();
    let (reference, _) = contract_pair(&ab, &c).unwrap();

    let planned = smart_contract(vec![a, b, c]).unwrap();
    for i in 0..3 {
        for j in 0..2 {
            assert_relative_eq!(
                planned.at(&[("i", i), ("j", j)]).unwrap(),
                reference.at(&[("i", i), ("j", j)]).unwrap(),
                max_relative = 1e-12
            );
        }
    }
}

/// Input order must not affect the result values.
#[test]
fn test_order_independence() {
    let a = chain_tensor(&[(2, "i"), (3, "k1")]);
    let b = chain_tensor(&[(3, "k1"), (4, "k2")]);
    let c = chain_tensor(&[(4, "k2"), (2, "j")]);

    let fwd = smart_contract(vec![a.clone(), b.clone(), c.clone()]).unwrap();
    let rev = smart_contract(vec![c, b, a]).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_relative_eq!(
                fwd.at(&[("i", i), ("j", j)]).unwrap(),
                rev.at(&[("i", i), ("j", j)]).unwrap(),
                max_relative = 1e-12
            );
        }
    }
}

/// Disconnected networks still terminate: with no shared axes every pair
/// is an outer product and the planner falls back to joining the two
/// smallest tensors first.
#[test]
fn test_disconnected_network_terminates() {
    let inputs: Vec<Tensor<f64>> = [(100, "a"), (2, "b"), (2, "c"), (100, "d")]
        .iter()
        .map(|&(e, n)| {
            Tensor::new(vec![PlainAxis::plain(e, n)], vec![1.0; e]).unwrap()
        })
        .collect();

    let out = smart_contract(inputs).unwrap();
    assert_eq!(out.order(), 4);
    assert_eq!(out.len(), 100 * 2 * 2 * 100);
    for &x in out.data() {
        assert_relative_eq!(x, 1.0);
    }
}

/// A network that fully contracts to a scalar.
#[test]
fn test_full_contraction_to_scalar() {
    let u = Tensor::new(vec![PlainAxis::plain(3, "i")], vec![1.0, 2.0, 3.0]).unwrap();
    let v = Tensor::new(vec![PlainAxis::plain(3, "i")], vec![4.0, 5.0, 6.0]).unwrap();
    let out = smart_contract(vec![u, v]).unwrap();
    assert_eq!(out.order(), 0);
    assert_relative_eq!(out.to_scalar().unwrap(), 32.0);
}

/// Extent-1 axes do not connect tensors for pairing purposes, yet the
/// shared singleton still contracts away in the final result.
#[test]
fn test_singleton_shared_axis() {
    let a = Tensor::new(
        vec![PlainAxis::plain(1, "s"), PlainAxis::plain(2, "i")],
        vec![3.0, 4.0],
    )
    .unwrap();
    let b = Tensor::new(vec![PlainAxis::plain(1, "s")], vec![2.0]).unwrap();
    let out = smart_contract(vec![a, b]).unwrap();
    assert_eq!(out.axis_names(), vec!["i"]);
    assert_relative_eq!(out.at(&[("i", 0)]).unwrap(), 6.0);
    assert_relative_eq!(out.at(&[("i", 1)]).unwrap(), 8.0);
}

/// Failures inside the plan are reported through the planner wrapper.
#[test]
fn test_extent_mismatch_surfaces_as_planner_error() {
    let a = Tensor::new(vec![PlainAxis::plain(2, "k")], vec![1.0, 2.0]).unwrap();
    let b = Tensor::new(vec![PlainAxis::plain(3, "k")], vec![1.0, 2.0, 3.0]).unwrap();
    assert!(matches!(
        smart_contract(vec![a, b]),
        Err(TensorError::Planner(_))
    ));
}
