//! Random named-tensor construction.

use rand::distr::StandardUniform;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::axis::{Axis, AxisKind};
use crate::error::TensorError;
use crate::scalar::{c64, Scalar};
use crate::tensor::Tensor;

/// Trait for types that can be sampled from a uniform distribution.
pub trait RandomUniform: Scalar {
    /// Sample a random value from the uniform distribution [0, 1).
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

impl RandomUniform for f64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardUniform)
    }
}

impl RandomUniform for c64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        c64::new(rng.sample(StandardUniform), rng.sample(StandardUniform))
    }
}

/// Trait for types that can be sampled from a normal distribution.
pub trait RandomNormal: Scalar {
    /// Sample a random value from the standard normal distribution.
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

impl RandomNormal for f64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl RandomNormal for c64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        // Real and imaginary parts independent N(0, 1/2) so |z|^2 has mean 1.
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        c64::new(
            rng.sample::<f64, _>(StandardNormal) * scale,
            rng.sample::<f64, _>(StandardNormal) * scale,
        )
    }
}

impl<T: Scalar + RandomUniform, K: AxisKind> Tensor<T, K> {
    /// Tensor over `axes` with uniform random elements in [0, 1).
    pub fn random_uniform(axes: Vec<Axis<K>>) -> Result<Self, TensorError> {
        let len: usize = axes.iter().map(|a| a.extent).product();
        let mut rng = rand::rng();
        let data = (0..len).map(|_| T::sample_uniform(&mut rng)).collect();
        Self::new(axes, data)
    }
}

impl<T: Scalar + RandomNormal, K: AxisKind> Tensor<T, K> {
    /// Tensor over `axes` with standard-normal random elements.
    pub fn random_normal(axes: Vec<Axis<K>>) -> Result<Self, TensorError> {
        let len: usize = axes.iter().map(|a| a.extent).product();
        let mut rng = rand::rng();
        let data = (0..len).map(|_| T::sample_normal(&mut rng)).collect();
        Self::new(axes, data)
    }
}
