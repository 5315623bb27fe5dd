//! Factory for the full spectrum → shrinkage → solve pipeline.
//!
//! A natural-gradient outer step runs this pipeline once per update: estimate an
//! eigenvalue sample of the curvature operator, convert it into shrinkage
//! parameters, then solve the regularized system. `ShrunkCgContext` holds the
//! knobs for all three stages and dispatches on the estimator strategy, so the
//! caller touches a single type.

use crate::core::traits::{Indexing, InnerProduct, Operator};
use crate::eigen::{LanczosEstimator, RestartedLanczos, SpectrumEstimator};
use crate::error::KurvError;
use crate::shrinkage::{ShrinkageEstimator, ShrinkageFormula};
use crate::solver::{LinearSolver, ShrunkCgSolver};
use crate::utils::convergence::SolveStats;
use num_traits::{Float, FromPrimitive};

/// Which spectrum estimator feeds the shrinkage stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumStrategy {
    /// Single classical Lanczos sweep ([`LanczosEstimator`]).
    Tridiagonal,
    /// Restarted sweeps targeting largest-magnitude eigenvalues ([`RestartedLanczos`]).
    Restarted,
}

/// Configuration and dispatch for one estimate → shrink → solve pass.
pub struct ShrunkCgContext<T> {
    /// Estimator selection.
    pub strategy: SpectrumStrategy,
    /// Lanczos depth / number of eigenvalues requested.
    pub k: usize,
    /// Sample count behind the curvature estimate, for the shrinkage formula.
    pub batch_size: usize,
    /// Shrinkage formula variant.
    pub formula: ShrinkageFormula,
    /// Absolute squared-residual cutoff for the CG stage.
    pub residual_tol: T,
    /// CG iteration budget.
    pub cg_iters: usize,
    /// Agreement threshold for the restarted estimator.
    pub restart_tol: T,
    /// Sweep budget for the restarted estimator.
    pub max_restarts: usize,
    /// Seed for start-vector draws; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl<T: Float + From<f64>> ShrunkCgContext<T> {
    pub fn new(k: usize, batch_size: usize, residual_tol: T, cg_iters: usize) -> Self {
        Self {
            strategy: SpectrumStrategy::Tridiagonal,
            k,
            batch_size,
            formula: ShrinkageFormula::default(),
            residual_tol,
            cg_iters,
            restart_tol: <T as From<f64>>::from(1e-8),
            max_restarts: 10,
            seed: None,
        }
    }

    pub fn with_strategy(mut self, strategy: SpectrumStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_formula(mut self, formula: ShrinkageFormula) -> Self {
        self.formula = formula;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl<T> ShrunkCgContext<T>
where
    T: Float + FromPrimitive + From<f64>,
{
    /// Run the full pipeline against `a`, leaving the solution in `x`.
    ///
    /// The operator is evaluated `k`-ish times for the spectrum sample and once
    /// per CG iteration; the caller keeps any state captured by `a` stable across
    /// the whole call.
    pub fn solve_context<M, V>(&mut self, a: &M, b: &V, x: &mut V) -> Result<SolveStats<T>, KurvError>
    where
        M: Operator<V> + Indexing,
        (): InnerProduct<V, Scalar = T>,
        V: AsMut<[T]> + AsRef<[T]> + From<Vec<T>> + Clone,
    {
        let dim = a.nrows();
        let eigvals = match self.strategy {
            SpectrumStrategy::Tridiagonal => {
                let mut est = LanczosEstimator { k: self.k, seed: self.seed };
                SpectrumEstimator::<M, V>::eigenvalues(&mut est, a, dim)?
            }
            SpectrumStrategy::Restarted => {
                let mut est = RestartedLanczos {
                    k: self.k,
                    tol: self.restart_tol,
                    max_restarts: self.max_restarts,
                    seed: self.seed,
                };
                SpectrumEstimator::<M, V>::eigenvalues(&mut est, a, dim)?
            }
        };

        let params = ShrinkageEstimator::new(self.formula).estimate(&eigvals, dim, self.batch_size);
        let mut solver =
            ShrunkCgSolver::new(self.residual_tol, self.cg_iters).with_shrinkage(params);
        solver.solve(a, b, x)
    }
}
