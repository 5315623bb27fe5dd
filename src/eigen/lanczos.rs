//! Classical Lanczos spectrum estimation.
//!
//! A single Lanczos sweep reduces the operator to a k×k symmetric tridiagonal
//! matrix whose eigenvalues (Ritz values) approximate the extreme eigenvalues of
//! the operator. Orthogonality is maintained only against the two most recent
//! basis vectors (the three-term recurrence), not re-enforced against the full
//! basis: loss of orthogonality under rounding mainly degrades interior and
//! duplicate eigenvalues, which the shrinkage consumer does not rely on.
//!
//! NaN or Inf produced by the operator propagates into the result unsanitized.

use crate::core::traits::{Indexing, InnerProduct, Operator};
use crate::eigen::{SpectrumEstimator, tridiag};
use crate::error::KurvError;
use num_traits::{Float, FromPrimitive};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Single-sweep Lanczos estimator.
///
/// Draws a uniform random unit start vector, runs up to `k` recurrence steps, and
/// returns the eigenvalues of the resulting tridiagonal matrix. The sweep stops
/// before `k` steps if the residual norm becomes exactly zero: the Krylov
/// subspace is invariant and the partial tridiagonal matrix already carries the
/// full reachable spectrum. That early exit is a normal termination, not a failure.
pub struct LanczosEstimator {
    /// Requested Krylov depth. `k ≥ n` is allowed but wasteful.
    pub k: usize,
    /// Seed for the start-vector draw; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl LanczosEstimator {
    pub fn new(k: usize) -> Self {
        Self { k, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        }
    }
}

impl<M, V, T> SpectrumEstimator<M, V> for LanczosEstimator
where
    M: Operator<V> + Indexing,
    (): InnerProduct<V, Scalar = T>,
    V: AsMut<[T]> + AsRef<[T]> + From<Vec<T>> + Clone,
    T: Float + FromPrimitive + From<f64>,
{
    type Scalar = T;

    fn eigenvalues(&mut self, a: &M, dim: usize) -> Result<Vec<T>, KurvError> {
        if a.nrows() != dim {
            return Err(KurvError::InvalidDimension {
                operator: a.nrows(),
                vector: dim,
            });
        }

        let ip = ();
        let mut rng = self.rng();

        // Uniform random start vector, normalized to unit length.
        let mut v = V::from(
            (0..dim)
                .map(|_| T::from_f64(rng.r#gen::<f64>()).unwrap_or(T::zero()))
                .collect::<Vec<_>>(),
        );
        let nrm = ip.norm(&v);
        for vi in v.as_mut().iter_mut() {
            *vi = *vi / nrm;
        }

        let mut alphas = Vec::with_capacity(self.k.max(1));
        let mut betas = Vec::with_capacity(self.k.saturating_sub(1));

        // First step: w = A v, alpha = w·v, deflate once.
        let mut w = V::from(vec![T::zero(); dim]);
        a.mvp(&v, &mut w);
        let mut alpha = ip.dot(&w, &v);
        for (wi, &vi) in w.as_mut().iter_mut().zip(v.as_ref()) {
            *wi = *wi - alpha * vi;
        }
        alphas.push(alpha);

        for _ in 1..self.k {
            let beta = ip.norm(&w);
            if beta == T::zero() {
                // Invariant subspace reached before depth k.
                break;
            }
            let v_prev = v.clone();
            for (vi, &wi) in v.as_mut().iter_mut().zip(w.as_ref()) {
                *vi = wi / beta;
            }
            a.mvp(&v, &mut w);
            alpha = ip.dot(&w, &v);
            alphas.push(alpha);
            betas.push(beta);
            // Three-term recurrence: deflate against both recent basis vectors.
            for ((wi, &vi), &vpi) in w
                .as_mut()
                .iter_mut()
                .zip(v.as_ref())
                .zip(v_prev.as_ref())
            {
                *wi = *wi - alpha * vi - beta * vpi;
            }
        }

        Ok(tridiag::eigenvalues(&alphas, &betas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;

    #[test]
    fn one_dimensional_operator_terminates_exactly() {
        // dim 1: after the first deflation w is exactly zero, so beta == 0 stops
        // the sweep no matter how deep k is.
        let a = Mat::from_fn(1, 1, |_, _| 7.5_f64);
        let mut est = LanczosEstimator::new(10).with_seed(3);
        let eigs = SpectrumEstimator::<_, Vec<f64>>::eigenvalues(&mut est, &a, 1).unwrap();
        assert_eq!(eigs.len(), 1);
        assert!((eigs[0] - 7.5).abs() < 1e-12);
    }

    #[test]
    fn dimension_check_fires_before_iterating() {
        let a = Mat::from_fn(4, 4, |i, j| if i == j { 1.0_f64 } else { 0.0 });
        let mut est = LanczosEstimator::new(3);
        let err = SpectrumEstimator::<_, Vec<f64>>::eigenvalues(&mut est, &a, 5).unwrap_err();
        assert!(matches!(err, KurvError::InvalidDimension { operator: 4, vector: 5 }));
    }
}
