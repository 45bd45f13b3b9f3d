//! Named axis descriptors and the axis-kind capability.
//!
//! An [`Axis`] carries a symbolic name, an extent and a caller-defined kind
//! tag. Two axes are *the same axis* iff their names match; kind tags are
//! validated separately at contraction time through [`AxisKind::compat`].

use std::fmt;

/// Capability required of an axis kind tag.
///
/// Supplied by the caller's axis-type domain (e.g. distinguishing covariant
/// and contravariant index flavors). The engine only ever asks two
/// questions of a kind: may two equally-named axes be contracted
/// (`compat`), and what is the dual kind (`opposite`).
pub trait AxisKind: Clone + PartialEq + fmt::Debug {
    /// Whether two equally-named axes with these kinds may be contracted.
    fn compat(&self, other: &Self) -> bool;

    /// The dual kind, used when renaming or merging axes across duals.
    fn opposite(&self) -> Self;
}

/// Trivial kind: every axis is compatible with every other and self-dual.
impl AxisKind for () {
    fn compat(&self, _other: &Self) -> bool {
        true
    }

    fn opposite(&self) -> Self {}
}

/// Up/down index flavor, the classic covariant/contravariant distinction.
///
/// An `Up` axis contracts only against a `Down` axis of the same name, and
/// vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variance {
    Up,
    Down,
}

impl AxisKind for Variance {
    fn compat(&self, other: &Self) -> bool {
        self != other
    }

    fn opposite(&self) -> Self {
        match self {
            Variance::Up => Variance::Down,
            Variance::Down => Variance::Up,
        }
    }
}

/// A named axis descriptor: `(kind, extent, name)`.
///
/// Equality and ordering are by `name` only; planning treats two
/// descriptors as the same axis whenever the names match.
#[derive(Debug, Clone)]
pub struct Axis<K: AxisKind> {
    pub kind: K,
    pub extent: usize,
    pub name: String,
}

impl<K: AxisKind> Axis<K> {
    /// Create a new axis descriptor.
    pub fn new(kind: K, extent: usize, name: impl Into<String>) -> Self {
        Self {
            kind,
            extent,
            name: name.into(),
        }
    }

    /// Whether this axis may be contracted against `other`.
    ///
    /// Requires equal names; the kinds decide via [`AxisKind::compat`].
    pub fn compat(&self, other: &Self) -> bool {
        self.name == other.name && self.kind.compat(&other.kind)
    }

    /// The dual axis: same name and extent, opposite kind.
    pub fn dual(&self) -> Self {
        Self {
            kind: self.kind.opposite(),
            extent: self.extent,
            name: self.name.clone(),
        }
    }

    /// Same descriptor under a new name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            kind: self.kind.clone(),
            extent: self.extent,
            name: name.into(),
        }
    }
}

impl<K: AxisKind> PartialEq for Axis<K> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<K: AxisKind> Eq for Axis<K> {}

/// Axis with the trivial kind, for callers without an axis-type domain.
pub type PlainAxis = Axis<()>;

impl PlainAxis {
    /// Shorthand for a trivial-kind axis.
    pub fn plain(extent: usize, name: impl Into<String>) -> Self {
        Self::new((), extent, name)
    }
}
