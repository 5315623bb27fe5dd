//! Convergence tracking & tolerance checks for iterative solvers.

/// Stopping criteria & stats.
///
/// The tolerance is an ABSOLUTE bound on the squared residual norm `r·r`, not a
/// relative bound on `‖r‖/‖r₀‖`. Second-order optimizers run the solve with a fixed
/// small budget and an absolute squared-norm cutoff, and the stats below report in
/// the same units.
#[derive(Debug)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    /// Squared residual norm `r·r` at exit.
    pub final_residual: T,
    pub converged: bool,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    /// Returns (should_stop, stats) given the current squared residual `rdotr` and iteration `i`.
    pub fn check(&self, rdotr: T, i: usize) -> (bool, SolveStats<T>) {
        let converged = rdotr < self.tol;
        (
            converged || i >= self.max_iters,
            SolveStats {
                iterations: i,
                final_residual: rdotr,
                converged,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_squared_norm_test() {
        let conv = Convergence { tol: 1e-10, max_iters: 5 };
        let (stop, stats) = conv.check(1e-11, 1);
        assert!(stop && stats.converged);
        let (stop, stats) = conv.check(1e-3, 1);
        assert!(!stop && !stats.converged);
        // Iteration cap stops the loop without claiming convergence.
        let (stop, stats) = conv.check(1e-3, 5);
        assert!(stop && !stats.converged);
    }
}
