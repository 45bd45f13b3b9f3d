//! Named tensor value type.
//!
//! A [`Tensor`] is an ordered list of [`Axis`] descriptors plus a flat
//! row-major element buffer (later-listed axes vary fastest). Tensors are
//! immutable values: every operation returns a new tensor owning its own
//! buffer, and two tensors never alias storage.

use faer::{Mat, MatRef};

use crate::axis::{Axis, AxisKind};
use crate::backend::{mat_from_row_major, row_major_from_mat};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::strides::compute_strides;

/// A multidimensional array whose axes carry symbolic names.
#[derive(Debug, Clone)]
pub struct Tensor<T: Scalar, K: AxisKind = ()> {
    axes: Vec<Axis<K>>,
    data: Vec<T>,
}

impl<T: Scalar, K: AxisKind> Tensor<T, K> {
    /// Create a tensor from explicit axis descriptors and a flat buffer.
    ///
    /// # Errors
    ///
    /// - [`TensorError::ZeroExtent`] if any axis has extent 0.
    /// - [`TensorError::ShapeMismatch`] if the buffer length is not the
    ///   product of the extents (empty product = 1 for a scalar).
    /// - [`TensorError::NameCollision`] if two axes share a name.
    ///
    /// # Examples
    ///
    /// ```
    /// use nametensors::{PlainAxis, Tensor};
    ///
    /// let t: Tensor<f64> = Tensor::new(
    ///     vec![PlainAxis::plain(2, "i"), PlainAxis::plain(3, "j")],
    ///     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    /// )
    /// .unwrap();
    /// assert_eq!(t.order(), 2);
    /// assert_eq!(t.extent("j"), Some(3));
    /// ```
    pub fn new(axes: Vec<Axis<K>>, data: Vec<T>) -> Result<Self, TensorError> {
        for axis in &axes {
            if axis.extent == 0 {
                return Err(TensorError::ZeroExtent {
                    name: axis.name.clone(),
                });
            }
        }
        let expected: usize = axes.iter().map(|a| a.extent).product();
        if data.len() != expected {
            return Err(TensorError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        for (i, axis) in axes.iter().enumerate() {
            if let Some(other) = axes[i + 1..].iter().find(|b| b.name == axis.name) {
                return Err(TensorError::NameCollision {
                    name: axis.name.clone(),
                    left: axis.extent,
                    right: other.extent,
                });
            }
        }
        Ok(Self { axes, data })
    }

    /// Internal constructor for buffers whose axes are already validated.
    pub(crate) fn assemble(axes: Vec<Axis<K>>, data: Vec<T>) -> Self {
        debug_assert_eq!(axes.iter().map(|a| a.extent).product::<usize>(), data.len());
        Self { axes, data }
    }

    /// Order-0 tensor holding a single element.
    pub fn from_scalar(value: T) -> Self {
        Self {
            axes: Vec::new(),
            data: vec![value],
        }
    }

    /// The axis descriptors, in layout order.
    #[inline]
    pub fn axes(&self) -> &[Axis<K>] {
        &self.axes
    }

    /// Number of axes.
    #[inline]
    pub fn order(&self) -> usize {
        self.axes.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// A scalar tensor still holds one element, so this is never true.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat row-major element buffer.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Ordered list of axis names.
    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Extent of the named axis, if present.
    pub fn extent(&self, name: &str) -> Option<usize> {
        self.axis(name).map(|a| a.extent)
    }

    /// Kind tag of the named axis, if present.
    pub fn kind(&self, name: &str) -> Option<&K> {
        self.axis(name).map(|a| &a.kind)
    }

    /// Descriptor of the named axis, if present.
    pub fn axis(&self, name: &str) -> Option<&Axis<K>> {
        self.axes.iter().find(|a| a.name == name)
    }

    /// Position of the named axis in layout order, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.name == name)
    }

    /// Element at a named-index assignment, independent of layout order.
    ///
    /// Returns `None` unless the assignment names every axis exactly once
    /// with in-range indices.
    pub fn at(&self, assignment: &[(&str, usize)]) -> Option<T> {
        if assignment.len() != self.order() {
            return None;
        }
        let extents: Vec<usize> = self.axes.iter().map(|a| a.extent).collect();
        let strides = compute_strides(&extents);
        let mut seen = vec![false; self.order()];
        let mut linear = 0;
        for &(name, idx) in assignment {
            let pos = self.position(name)?;
            if seen[pos] || idx >= self.axes[pos].extent {
                return None;
            }
            seen[pos] = true;
            linear += idx * strides[pos];
        }
        Some(self.data[linear])
    }

    /// Rename every axis by position.
    ///
    /// # Errors
    ///
    /// [`TensorError::RankMismatch`] if the name count differs from the
    /// order, [`TensorError::NameCollision`] if the new names repeat.
    pub fn with_names(&self, names: &[&str]) -> Result<Self, TensorError> {
        if names.len() != self.order() {
            return Err(TensorError::RankMismatch {
                expected: self.order(),
                actual: names.len(),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if names[i + 1..].contains(name) {
                return Err(TensorError::NameCollision {
                    name: name.to_string(),
                    left: self.axes[i].extent,
                    right: self.axes[i].extent,
                });
            }
        }
        let axes = self
            .axes
            .iter()
            .zip(names.iter())
            .map(|(axis, &name)| axis.renamed(name))
            .collect();
        Ok(Self::assemble(axes, self.data.clone()))
    }

    /// Rename axes by association list `(old, new)`.
    ///
    /// If a rename makes two axes share a name, the repeated pair is
    /// self-contracted (summed along its diagonal), reducing the order by
    /// two per pair; see [`crate::contract::contract_repeats`].
    ///
    /// # Errors
    ///
    /// [`TensorError::AxisSetMismatch`] if an `old` name is not an axis of
    /// this tensor; self-contraction errors propagate.
    pub fn rename(&self, pairs: &[(&str, &str)]) -> Result<Self, TensorError> {
        let mut axes = self.axes.clone();
        for &(old, new) in pairs {
            let pos = self.position(old).ok_or_else(|| TensorError::AxisSetMismatch {
                expected: self.axis_names().iter().map(|s| s.to_string()).collect(),
                requested: pairs.iter().map(|(o, _)| o.to_string()).collect(),
            })?;
            axes[pos] = axes[pos].renamed(new);
        }
        crate::contract::contract_repeats(axes, self.data.clone())
    }

    /// Tensor with every axis kind replaced by its dual
    /// ([`Axis::dual`]); names, extents and elements are unchanged.
    ///
    /// For [`crate::axis::Variance`] kinds this makes a tensor
    /// contractible against a same-kinded copy of itself.
    pub fn dual(&self) -> Self {
        let axes = self.axes.iter().map(Axis::dual).collect();
        Self::assemble(axes, self.data.clone())
    }

    /// Decompose the tensor into sub-tensors along one named axis.
    ///
    /// Part `i` is the sub-tensor at index `i` of `name`, carrying the
    /// remaining axes in their original relative order.
    ///
    /// # Errors
    ///
    /// [`TensorError::AxisSetMismatch`] if `name` is not an axis.
    pub fn parts(&self, name: &str) -> Result<Vec<Self>, TensorError> {
        let fronted = crate::layout::move_to_front(self, &[name])?;
        let extent = fronted.axes[0].extent;
        let rest: Vec<Axis<K>> = fronted.axes[1..].to_vec();
        let chunk = fronted.data.len() / extent;
        Ok(fronted
            .data
            .chunks(chunk)
            .map(|slice| Self::assemble(rest.clone(), slice.to_vec()))
            .collect())
    }

    /// Inverse of [`Tensor::parts`]: stack sub-tensors along a new outer
    /// axis described by `axis` (its extent must equal the part count).
    ///
    /// The parts are first conformed (broadcast to a common axis set) and
    /// brought to a common layout, so parts with differing but mergeable
    /// axis sets are accepted.
    ///
    /// # Errors
    ///
    /// [`TensorError::ShapeMismatch`] if `axis.extent != parts.len()`;
    /// conformance errors propagate.
    pub fn from_parts(axis: Axis<K>, parts: &[Self]) -> Result<Self, TensorError> {
        if axis.extent != parts.len() || parts.is_empty() {
            return Err(TensorError::ShapeMismatch {
                expected: axis.extent,
                actual: parts.len(),
            });
        }
        let refs: Vec<&Self> = parts.iter().collect();
        let conformed = crate::conform::conform(&refs)?;
        let names = conformed[0].axis_names();
        let mut axes = Vec::with_capacity(names.len() + 1);
        axes.push(axis);
        axes.extend(conformed[0].axes.iter().cloned());

        let mut data = Vec::with_capacity(conformed[0].len() * conformed.len());
        for part in &conformed {
            let aligned = crate::layout::reorder(part, &names)?;
            data.extend_from_slice(aligned.data());
        }
        Tensor::new(axes, data)
    }

    /// Extract the single element of an order-0 tensor.
    pub fn to_scalar(&self) -> Result<T, TensorError> {
        if self.order() != 0 {
            return Err(TensorError::RankMismatch {
                expected: 0,
                actual: self.order(),
            });
        }
        Ok(self.data[0])
    }

    /// Extract the buffer of an order-1 tensor.
    pub fn to_vec1(&self) -> Result<Vec<T>, TensorError> {
        if self.order() != 1 {
            return Err(TensorError::RankMismatch {
                expected: 1,
                actual: self.order(),
            });
        }
        Ok(self.data.clone())
    }

    /// Extract an order-2 tensor as a faer matrix (first axis = rows).
    pub fn to_mat(&self) -> Result<Mat<T>, TensorError> {
        if self.order() != 2 {
            return Err(TensorError::RankMismatch {
                expected: 2,
                actual: self.order(),
            });
        }
        Ok(mat_from_row_major(
            &self.data,
            self.axes[0].extent,
            self.axes[1].extent,
        ))
    }
}

impl<T: Scalar, K: AxisKind + Default> Tensor<T, K> {
    /// Order-1 tensor with the synthesized axis name `d0`.
    pub fn from_vec1(data: Vec<T>) -> Result<Self, TensorError> {
        let axis = Axis::new(K::default(), data.len(), "d0");
        Self::new(vec![axis], data)
    }

    /// Order-2 row-major tensor with synthesized axis names `d0`, `d1`.
    pub fn from_vec2(data: Vec<T>, rows: usize, cols: usize) -> Result<Self, TensorError> {
        let axes = vec![
            Axis::new(K::default(), rows, "d0"),
            Axis::new(K::default(), cols, "d1"),
        ];
        Self::new(axes, data)
    }

    /// Order-2 tensor from a faer matrix (first axis = rows), with
    /// synthesized axis names `d0`, `d1`. Inverse of [`Tensor::to_mat`].
    pub fn from_mat(mat: MatRef<'_, T>) -> Result<Self, TensorError> {
        Self::from_vec2(row_major_from_mat(mat), mat.nrows(), mat.ncols())
    }
}
