//! Greedy contraction planner for n-ary tensor products.
//!
//! Optimal contraction ordering is NP-hard; this is a deterministic greedy
//! approximation. Tensors live in an integer-ID arena and all bookkeeping
//! references them by ID, so the cross-indexed containers never hold
//! tensors twice and never form reference cycles. Candidate pairs are
//! ranked by [`Cost`] and tolerated going stale: entries whose IDs have
//! left the pool are discarded lazily when popped.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::axis::AxisKind;
use crate::contract::pair::{contract_pair, PairContraction};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Contract a list of tensors down to a single tensor, greedily picking
/// the cheapest pairwise contraction at each step.
///
/// A single input is returned unchanged. The final value does not depend
/// on the chosen order, only the amount of intermediate work does.
///
/// # Errors
///
/// - [`TensorError::EmptyProduct`] for an empty input list.
/// - [`TensorError::Planner`] wrapping any pairwise failure (notably
///   incompatible axis kinds); the whole plan aborts, no partial result.
///
/// # Examples
///
/// ```
/// use nametensors::{smart_contract, PlainAxis, Tensor};
///
/// let a = Tensor::new(
///     vec![PlainAxis::plain(2, "i"), PlainAxis::plain(3, "j")],
///     vec![1.0; 6],
/// )
/// .unwrap();
/// let b = Tensor::new(
///     vec![PlainAxis::plain(3, "j"), PlainAxis::plain(2, "k")],
///     vec![1.0; 6],
/// )
/// .unwrap();
/// let c = Tensor::new(
///     vec![PlainAxis::plain(2, "k"), PlainAxis::plain(2, "i")],
///     vec![1.0; 4],
/// )
/// .unwrap();
/// let out = smart_contract(vec![a, b, c]).unwrap();
/// assert_eq!(out.order(), 0);
/// ```
pub fn smart_contract<T: Scalar, K: AxisKind>(
    tensors: Vec<Tensor<T, K>>,
) -> Result<Tensor<T, K>, TensorError> {
    let mut inputs = tensors.into_iter();
    let Some(first) = inputs.next() else {
        return Err(TensorError::EmptyProduct);
    };
    let mut state = PlannerState::new();
    state.insert(first).map_err(wrap)?;
    for tensor in inputs {
        state.insert(tensor).map_err(wrap)?;
    }
    state.run().map_err(wrap)
}

fn wrap(err: TensorError) -> TensorError {
    match err {
        err @ TensorError::Planner(_) => err,
        other => TensorError::Planner(Box::new(other)),
    }
}

/// Candidate ranking. Shrinking contractions (result no larger than the
/// bigger input) always precede growing ones; within a tier, smaller
/// results / smaller growth first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Cost {
    /// Keyed by the result's element count.
    Shrinking(u64),
    /// Keyed by result minus both input element counts (may be negative).
    Growing(i128),
}

fn cost_of<T: Scalar, K: AxisKind>(
    a: &Tensor<T, K>,
    b: &Tensor<T, K>,
) -> Result<Cost, TensorError> {
    let estimate = PairContraction::analyze(a, b)?.output_len;
    let (sa, sb) = (a.len(), b.len());
    if estimate <= sa.max(sb) {
        Ok(Cost::Shrinking(estimate as u64))
    } else {
        Ok(Cost::Growing(estimate as i128 - sa as i128 - sb as i128))
    }
}

/// The planner working set: an ID-keyed tensor arena plus three indexes
/// that must stay consistent. `insert` and `remove` are the only
/// mutators; `candidates` alone may hold stale IDs.
struct PlannerState<T: Scalar, K: AxisKind> {
    pool: BTreeMap<usize, Tensor<T, K>>,
    /// Axis name -> IDs of pooled tensors carrying it with extent > 1.
    by_axis: HashMap<String, BTreeSet<usize>>,
    /// `(element count, ID)`, ordered.
    by_size: BTreeSet<(usize, usize)>,
    /// `(cost, ID, ID)`, ordered; filtered lazily against the pool.
    candidates: BTreeSet<(Cost, usize, usize)>,
    next_id: usize,
}

impl<T: Scalar, K: AxisKind> PlannerState<T, K> {
    fn new() -> Self {
        Self {
            pool: BTreeMap::new(),
            by_axis: HashMap::new(),
            by_size: BTreeSet::new(),
            candidates: BTreeSet::new(),
            next_id: 0,
        }
    }

    fn two_smallest(&self) -> Option<(usize, usize)> {
        let mut it = self.by_size.iter();
        match (it.next(), it.next()) {
            (Some(&(_, a)), Some(&(_, b))) => Some((a, b)),
            _ => None,
        }
    }

    /// Add a tensor to the pool, seeding candidate pairs against every
    /// pooled tensor it shares an extent>1 axis with. If this insert
    /// changed which two tensors are globally smallest, that pair is also
    /// seeded regardless of shared axes, so disconnected sub-networks
    /// (and pure scalars) always have a next move.
    fn insert(&mut self, tensor: Tensor<T, K>) -> Result<(), TensorError> {
        let id = self.next_id;
        self.next_id += 1;
        let smallest_before = self.two_smallest();

        let mut partners: BTreeSet<usize> = BTreeSet::new();
        for axis in tensor.axes() {
            if axis.extent > 1 {
                if let Some(ids) = self.by_axis.get(&axis.name) {
                    partners.extend(ids.iter().copied());
                }
            }
        }
        for &partner in &partners {
            if let Some(other) = self.pool.get(&partner) {
                let cost = cost_of(other, &tensor)?;
                self.candidates.insert((cost, partner, id));
            }
        }

        for axis in tensor.axes() {
            if axis.extent > 1 {
                self.by_axis
                    .entry(axis.name.clone())
                    .or_default()
                    .insert(id);
            }
        }
        self.by_size.insert((tensor.len(), id));
        self.pool.insert(id, tensor);

        let smallest_after = self.two_smallest();
        if smallest_after != smallest_before {
            if let Some((small_a, small_b)) = smallest_after {
                if let (Some(a), Some(b)) = (self.pool.get(&small_a), self.pool.get(&small_b)) {
                    let cost = cost_of(a, b)?;
                    self.candidates.insert((cost, small_a, small_b));
                }
            }
        }
        Ok(())
    }

    /// Remove a tensor from the pool and all indexes except `candidates`,
    /// whose entries go stale instead.
    fn remove(&mut self, id: usize) -> Option<Tensor<T, K>> {
        let tensor = self.pool.remove(&id)?;
        self.by_size.remove(&(tensor.len(), id));
        for axis in tensor.axes() {
            if axis.extent > 1 {
                if let Some(ids) = self.by_axis.get_mut(&axis.name) {
                    ids.remove(&id);
                    if ids.is_empty() {
                        self.by_axis.remove(&axis.name);
                    }
                }
            }
        }
        Some(tensor)
    }

    /// Pop minimum-cost candidates (discarding stale ones), contract, and
    /// reinsert until a single tensor remains.
    ///
    /// A contraction can consume the pool's two smallest tensors and leave
    /// the reinserted result size-tied with the survivors, in which case
    /// the insert-time seeding sees the two-smallest pair as unchanged and
    /// the candidate set drains. Whenever that happens with more than one
    /// tensor pooled, the current two smallest are seeded directly.
    fn run(mut self) -> Result<Tensor<T, K>, TensorError> {
        while self.pool.len() > 1 {
            let Some((_, id_a, id_b)) = self.candidates.pop_first() else {
                let Some((small_a, small_b)) = self.two_smallest() else {
                    return Err(TensorError::PlannerExhausted);
                };
                let (Some(a), Some(b)) = (self.pool.get(&small_a), self.pool.get(&small_b))
                else {
                    return Err(TensorError::PlannerExhausted);
                };
                let cost = cost_of(a, b)?;
                self.candidates.insert((cost, small_a, small_b));
                continue;
            };
            if !self.pool.contains_key(&id_a) || !self.pool.contains_key(&id_b) {
                continue;
            }
            let (Some(a), Some(b)) = (self.remove(id_a), self.remove(id_b)) else {
                return Err(TensorError::PlannerExhausted);
            };
            let (result, _) = contract_pair(&a, &b)?;
            self.insert(result)?;
        }
        self.pool
            .into_values()
            .next()
            .ok_or(TensorError::EmptyProduct)
    }
}
