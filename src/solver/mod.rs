//! Linear solver interface over matrix-free operators.

use crate::utils::convergence::SolveStats;

/// Common interface for solvers of `A·x = b` with operator-only access to `A`.
pub trait LinearSolver<M, V> {
    type Error;
    /// Solve A·x = b, writing the result into `x`.
    /// Returns iteration stats (including convergence info).
    fn solve(
        &mut self,
        a: &M,
        b: &V,
        x: &mut V,
    ) -> Result<SolveStats<<Self as LinearSolver<M, V>>::Scalar>, Self::Error>;
    type Scalar: Copy + PartialOrd + From<f64>;
}

pub mod cg;
pub use cg::ShrunkCgSolver;
