//! Shrinkage-regularized Conjugate Gradient.
//!
//! Solves `A_eff · x = b` where `A_eff = (1-ρ)·A + ρ·D·I` when shrinkage
//! parameters are supplied, and `A_eff = A` otherwise. `A` is accessed only
//! through one matrix-vector product per iteration; the identity term folds into
//! the same product, so shrinkage costs nothing extra per iteration.
//!
//! The stopping test is the absolute squared-residual cutoff `r·r < tol`, checked
//! after each update. When the iteration budget runs out first, the current
//! iterate is returned with `converged == false` in the stats; there is no
//! convergence exception, and the caller judges quality from context.
//!
//! Degeneracy behavior: a zero `p·A_eff·p` inner product produces inf/nan in the
//! iterate (this includes the all-zero right-hand side, which callers are expected
//! to special-case upstream). The opt-in strict mode turns those conditions into
//! [`KurvError::DegenerateOperator`] instead.

use crate::core::traits::{Indexing, InnerProduct, Operator};
use crate::error::KurvError;
use crate::shrinkage::ShrinkageParams;
use crate::solver::LinearSolver;
use crate::utils::convergence::{Convergence, SolveStats};

#[derive(Debug)]
pub struct ShrunkCgSolver<T> {
    pub conv: Convergence<T>,
    pub shrinkage: Option<ShrinkageParams<T>>,
    pub strict: bool,
}

impl<T: Copy + num_traits::Float> ShrunkCgSolver<T> {
    pub fn new(residual_tol: T, cg_iters: usize) -> Self {
        Self {
            conv: Convergence { tol: residual_tol, max_iters: cg_iters },
            shrinkage: None,
            strict: false,
        }
    }

    /// Blend the operator with `rho · diag_shrunk · I` during the solve.
    pub fn with_shrinkage(mut self, params: ShrinkageParams<T>) -> Self {
        self.shrinkage = Some(params);
        self
    }

    /// Fail fast on numerical degeneracy instead of letting inf/nan propagate.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl<T: Copy + num_traits::Float + From<f64>> ShrunkCgSolver<T> {
    /// Build a solver from [`crate::config::CgOptions`], validating the
    /// both-or-neither shrinkage pairing contract.
    pub fn from_options(opts: &crate::config::CgOptions) -> Result<Self, KurvError> {
        let shrinkage = opts.shrinkage()?;
        Ok(Self {
            conv: Convergence {
                tol: <T as From<f64>>::from(opts.residual_tol),
                max_iters: opts.cg_iters,
            },
            shrinkage: shrinkage.map(|s| ShrinkageParams {
                rho: <T as From<f64>>::from(s.rho),
                diag_shrunk: <T as From<f64>>::from(s.diag_shrunk),
            }),
            strict: opts.strict,
        })
    }
}

impl<M, V, T> LinearSolver<M, V> for ShrunkCgSolver<T>
where
    M: Operator<V> + Indexing,
    (): InnerProduct<V, Scalar = T>,
    V: AsMut<[T]> + AsRef<[T]> + From<Vec<T>> + Clone,
    T: num_traits::Float + Clone + From<f64>,
{
    type Error = KurvError;
    type Scalar = T;

    /// Solve `A_eff · x = b` from a zero initial iterate.
    ///
    /// `x` is a pure output: its initial contents are ignored and the iteration
    /// starts from zero. With `cg_iters == 0` the zero vector comes back unchanged.
    fn solve(&mut self, a: &M, b: &V, x: &mut V) -> Result<SolveStats<T>, KurvError> {
        let n = b.as_ref().len();
        if a.nrows() != n {
            return Err(KurvError::InvalidDimension { operator: a.nrows(), vector: n });
        }
        if x.as_ref().len() != n {
            return Err(KurvError::InvalidDimension { operator: a.nrows(), vector: x.as_ref().len() });
        }

        let ip = ();
        let mut x_vec = vec![T::zero(); n];
        let mut r = V::from(b.as_ref().to_vec());
        let mut p = r.clone();
        let mut rdotr = ip.dot(&r, &r);

        if self.strict && rdotr == T::zero() {
            return Err(KurvError::DegenerateOperator("zero right-hand side"));
        }

        let mut stats = SolveStats { iterations: 0, final_residual: rdotr, converged: false };

        for i in 1..=self.conv.max_iters {
            let mut z = V::from(vec![T::zero(); n]);
            a.mvp(&p, &mut z);
            if let Some(sh) = self.shrinkage {
                let blend = T::one() - sh.rho;
                for (zj, &pj) in z.as_mut().iter_mut().zip(p.as_ref()) {
                    *zj = blend * *zj + sh.rho * pj * sh.diag_shrunk;
                }
            }

            let pz = ip.dot(&p, &z);
            if self.strict && pz == T::zero() {
                return Err(KurvError::DegenerateOperator("search direction annihilated (p·Ap = 0)"));
            }
            let step = rdotr / pz;
            for (xj, &pj) in x_vec.iter_mut().zip(p.as_ref()) {
                *xj = *xj + step * pj;
            }
            for (rj, &zj) in r.as_mut().iter_mut().zip(z.as_ref()) {
                *rj = *rj - step * zj;
            }

            let rdotr_new = ip.dot(&r, &r);
            let mu = rdotr_new / rdotr;
            let p_old = p.clone();
            for ((pj, &rj), &old_pj) in p.as_mut().iter_mut().zip(r.as_ref()).zip(p_old.as_ref()) {
                *pj = rj + mu * old_pj;
            }
            rdotr = rdotr_new;

            let (stop, s) = self.conv.check(rdotr, i);
            stats = s;
            if stop {
                break;
            }
        }

        *x = V::from(x_vec);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Simple dense matrix type for testing
    #[derive(Clone)]
    struct DenseMat {
        data: Vec<Vec<f64>>,
    }
    impl Operator<Vec<f64>> for DenseMat {
        fn mvp(&self, x: &Vec<f64>, y: &mut Vec<f64>) {
            for (i, row) in self.data.iter().enumerate() {
                y[i] = row.iter().zip(x.iter()).map(|(a, b)| a * b).sum();
            }
        }
    }
    impl Indexing for DenseMat {
        fn nrows(&self) -> usize {
            self.data.len()
        }
    }

    #[test]
    fn cg_solves_simple_spd() {
        // SPD system: [[4,1],[1,3]] x = [1,2]
        let a = DenseMat { data: vec![vec![4.0, 1.0], vec![1.0, 3.0]] };
        let b = vec![1.0, 2.0];
        let mut x = vec![0.0, 0.0];
        let mut solver = ShrunkCgSolver::new(1e-10, 20);
        let stats = solver.solve(&a, &b, &mut x).unwrap();
        let expected = vec![0.09090909090909091, 0.6363636363636364];
        for (xi, ei) in x.iter().zip(expected.iter()) {
            assert!((xi - ei).abs() < 1e-8, "xi = {}, expected = {}", xi, ei);
        }
        assert!(stats.converged, "CG did not converge");
    }

    #[test]
    fn cg_solves_spd() {
        // A = [[4,1,0],[1,3,1],[0,1,2]], b = A * [1,2,3]
        let a = DenseMat {
            data: vec![
                vec![4.0, 1.0, 0.0],
                vec![1.0, 3.0, 1.0],
                vec![0.0, 1.0, 2.0],
            ],
        };
        let x_true = vec![1.0, 2.0, 3.0];
        let b = {
            let mut b = vec![0.0; 3];
            a.mvp(&x_true, &mut b);
            b
        };
        let mut x = vec![0.0; 3];
        let mut solver = ShrunkCgSolver::new(1e-20, 100);
        let stats = solver.solve(&a, &b, &mut x).unwrap();
        let mut r_final = vec![0.0; 3];
        a.mvp(&x, &mut r_final);
        for i in 0..3 {
            r_final[i] = b[i] - r_final[i];
        }
        let res_norm = r_final.iter().map(|&ri| ri * ri).sum::<f64>().sqrt();
        assert!(res_norm <= 1e-8, "final residual = {:.6}", res_norm);
        assert!(stats.converged, "CG did not converge");
    }

    #[test]
    fn zero_iteration_budget_returns_zero_vector() {
        let a = DenseMat { data: vec![vec![2.0, 0.0], vec![0.0, 2.0]] };
        let b = vec![1.0, -1.0];
        let mut x = vec![9.0, 9.0];
        let mut solver = ShrunkCgSolver::new(1e-10, 0);
        let stats = solver.solve(&a, &b, &mut x).unwrap();
        assert_eq!(x, vec![0.0, 0.0]);
        assert_eq!(stats.iterations, 0);
        assert!(!stats.converged);
    }

    #[test]
    fn initial_x_contents_are_ignored() {
        let a = DenseMat { data: vec![vec![4.0, 1.0], vec![1.0, 3.0]] };
        let b = vec![1.0, 2.0];
        let mut x_from_zero = vec![0.0, 0.0];
        let mut x_from_junk = vec![1e6, -4.2];
        let mut solver = ShrunkCgSolver::new(1e-10, 20);
        solver.solve(&a, &b, &mut x_from_zero).unwrap();
        solver.solve(&a, &b, &mut x_from_junk).unwrap();
        assert_eq!(x_from_zero, x_from_junk);
    }

    #[test]
    fn dimension_mismatch_fails_fast() {
        let a = DenseMat { data: vec![vec![1.0, 0.0], vec![0.0, 1.0]] };
        let b = vec![1.0, 2.0, 3.0];
        let mut x = vec![0.0; 3];
        let mut solver = ShrunkCgSolver::new(1e-10, 10);
        let err = solver.solve(&a, &b, &mut x).unwrap_err();
        assert!(matches!(err, KurvError::InvalidDimension { operator: 2, vector: 3 }));
    }

    #[test]
    fn strict_mode_rejects_zero_rhs() {
        let a = DenseMat { data: vec![vec![1.0, 0.0], vec![0.0, 1.0]] };
        let b = vec![0.0, 0.0];
        let mut x = vec![0.0, 0.0];
        let mut solver = ShrunkCgSolver::new(1e-10, 10).with_strict(true);
        let err = solver.solve(&a, &b, &mut x).unwrap_err();
        assert!(matches!(err, KurvError::DegenerateOperator(_)));
    }

    #[test]
    fn default_mode_propagates_nan_on_zero_rhs() {
        // Documented contract: rdotr = 0 at entry still runs an iteration and the
        // 0/0 step poisons the iterate. The caller special-cases zero b upstream.
        let a = DenseMat { data: vec![vec![1.0, 0.0], vec![0.0, 1.0]] };
        let b = vec![0.0, 0.0];
        let mut x = vec![0.0, 0.0];
        let mut solver = ShrunkCgSolver::new(1e-10, 10);
        solver.solve(&a, &b, &mut x).unwrap();
        assert!(x.iter().all(|xi| xi.is_nan()));
    }
}
