//! Operator spectrum estimation.
//!
//! Both estimators approximate eigenvalues of a symmetric operator from
//! matrix-vector products alone, and are interchangeable behind
//! [`SpectrumEstimator`]:
//!
//! - [`LanczosEstimator`]: a single classical Lanczos sweep; cheap, returns up to
//!   `k` Ritz values from one tridiagonalization.
//! - [`RestartedLanczos`]: restarted sweeps with full reorthogonalization,
//!   targeting the `k` largest-magnitude eigenvalues; tolerates non-convergence
//!   by returning the partial result it has.
//!
//! The eigenvalue sample feeds the shrinkage estimator
//! ([`crate::shrinkage::ShrinkageEstimator`]) once per outer optimization step.

use crate::error::KurvError;

/// Operator-based eigenvalue estimators.
pub trait SpectrumEstimator<M, V> {
    /// Associated scalar type.
    type Scalar;
    /// Estimate eigenvalues of `a`, an implicit symmetric operator of dimension `dim`.
    ///
    /// Returns at most `k` values (fewer on early termination), in no guaranteed order.
    fn eigenvalues(&mut self, a: &M, dim: usize) -> Result<Vec<Self::Scalar>, KurvError>;
}

pub mod lanczos;
pub use lanczos::LanczosEstimator;

pub mod restarted;
pub use restarted::RestartedLanczos;

pub mod tridiag;
