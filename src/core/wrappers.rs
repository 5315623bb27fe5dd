//! Operator and vector implementations for faer dense matrices, `Vec<T>`, and closures.
//!
//! This module makes the three caller-facing shapes of an operator usable with the
//! generic estimators and solvers:
//! - `faer::Mat` / `faer::MatRef`: an explicit dense matrix, mostly for tests and
//!   small reference problems.
//! - [`FnOperator`]: a closure computing `A·v`, the usual shape of a Fisher- or
//!   Hessian-vector product coming out of an autodiff system.
//! - `Vec<T>`: the working vector type, with dot/norm reductions (optionally
//!   rayon-parallel behind the `rayon` feature).
//!
//! The recurrences themselves never parallelize; only the reductions here may.

use crate::core::traits::{Indexing, InnerProduct, Operator};
use faer::{Mat, MatRef};
use num_traits::Float;

/// Dense matrix as an operator: y = A * x.
impl<T: Float> Operator<Vec<T>> for Mat<T> {
    fn mvp(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            y[i] = T::zero();
            for j in 0..self.ncols() {
                y[i] = y[i] + self[(i, j)] * x[j];
            }
        }
    }
}

/// Dense matrix view as an operator.
impl<'a, T: Float> Operator<Vec<T>> for MatRef<'a, T> {
    fn mvp(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            y[i] = T::zero();
            for j in 0..self.ncols() {
                y[i] = y[i] + self[(i, j)] * x[j];
            }
        }
    }
}

/// Adapts a plain function or closure to the [`Operator`] contract.
///
/// This is the migration path for operators written as closures over external state
/// (a model, a minibatch): wrap the closure together with the flat parameter
/// dimension. The caller keeps the captured state stable for the duration of one
/// estimation or solve call; see [`Operator`] for the full contract.
pub struct FnOperator<F> {
    dim: usize,
    f: F,
}

impl<F> FnOperator<F> {
    /// Wrap `f`, a function computing `A·v` for an implicit symmetric `dim`×`dim` matrix.
    pub fn new(dim: usize, f: F) -> Self {
        Self { dim, f }
    }
}

impl<T: Float, F: Fn(&[T]) -> Vec<T>> Operator<Vec<T>> for FnOperator<F> {
    fn mvp(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.dim, x.len(), "Input vector x has incorrect length");
        let out = (self.f)(x.as_slice());
        assert_eq!(self.dim, out.len(), "Operator returned a vector of incorrect length");
        y.clear();
        y.extend_from_slice(&out);
    }
}

impl<F> Indexing for FnOperator<F> {
    fn nrows(&self) -> usize {
        self.dim
    }
}

/// Inner product and norm for vectors, with optional rayon parallelism.
impl<T: Float + From<f64> + Send + Sync> InnerProduct<Vec<T>> for () {
    type Scalar = T;
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .zip(y.as_slice().par_iter())
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .zip(y.iter())
                .map(|(xi, yi)| *xi * *yi)
                .fold(T::zero(), |acc, v| acc + v)
        }
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self, x: &Vec<T>) -> T {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .map(|xi| *xi * *xi)
                .reduce(|| T::zero(), |acc, v| acc + v)
                .sqrt()
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .map(|xi| *xi * *xi)
                .fold(T::zero(), |acc, v| acc + v)
                .sqrt()
        }
    }
}

/// A vector is a column: its row count is its length.
impl<T> Indexing for Vec<T> {
    fn nrows(&self) -> usize {
        self.len()
    }
}

impl<T> Indexing for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
}

impl<'a, T> Indexing for MatRef<'a, T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
}
