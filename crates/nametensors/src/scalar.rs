//! Scalar trait for tensor element types.

use faer_traits::ComplexField;
use std::fmt::Debug;
use std::ops::{Add, Mul};

pub use faer::c64;

/// Trait for scalar types supported by nametensors.
///
/// Wraps faer's `ComplexField` (which supplies norms and conjugation) with
/// the extra bounds tensor algebra needs: elements are additive,
/// multiplicative, copyable and printable.
pub trait Scalar:
    ComplexField + Copy + Debug + Default + Add<Output = Self> + Mul<Output = Self> + 'static
{
    /// The real type associated with this scalar.
    type Real: Scalar;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;
}

impl Scalar for f64 {
    type Real = f64;

    fn one() -> Self {
        1.0
    }
}

impl Scalar for c64 {
    type Real = f64;

    fn one() -> Self {
        c64::new(1.0, 0.0)
    }
}
