//! API options for the shrinkage-regularized CG solver.
//!
//! This module provides the `CgOptions` struct, the loose-parameter entry point
//! for callers that carry rho and diag_shrunk as independently optional values.
//! The pairing contract (both supplied or neither) is validated here, before any
//! iteration begins.

use crate::error::KurvError;
use crate::shrinkage::ShrinkageParams;

/// Solve parameters for one shrinkage-regularized CG call.
#[derive(Debug, Clone)]
pub struct CgOptions {
    /// Iteration budget.
    pub cg_iters: usize,

    /// Absolute cutoff on the squared residual norm.
    pub residual_tol: f64,

    /// Shrinkage intensity; requires `diag_shrunk`.
    pub rho: Option<f64>,

    /// Identity-target scale; requires `rho`.
    pub diag_shrunk: Option<f64>,

    /// Fail fast on numerical degeneracy instead of propagating inf/nan.
    pub strict: bool,
}

impl Default for CgOptions {
    fn default() -> Self {
        Self {
            cg_iters: 10,
            residual_tol: 1e-10,
            rho: None,
            diag_shrunk: None,
            strict: false,
        }
    }
}

impl CgOptions {
    /// Resolve the optional pair into shrinkage parameters.
    ///
    /// Supplying one of `rho` / `diag_shrunk` without the other is a configuration
    /// error rather than a silent unshrunk solve: a partial pair always means the
    /// caller dropped a value somewhere upstream.
    pub fn shrinkage(&self) -> Result<Option<ShrinkageParams<f64>>, KurvError> {
        match (self.rho, self.diag_shrunk) {
            (Some(rho), Some(diag_shrunk)) => Ok(Some(ShrinkageParams { rho, diag_shrunk })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(KurvError::Configuration("rho supplied without diag_shrunk")),
            (None, Some(_)) => Err(KurvError::Configuration("diag_shrunk supplied without rho")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairing_contract() {
        assert!(CgOptions::default().shrinkage().unwrap().is_none());

        let both = CgOptions { rho: Some(0.3), diag_shrunk: Some(1.5), ..Default::default() };
        let params = both.shrinkage().unwrap().unwrap();
        assert_eq!(params.rho, 0.3);
        assert_eq!(params.diag_shrunk, 1.5);

        let half = CgOptions { rho: Some(0.3), ..Default::default() };
        assert!(matches!(half.shrinkage(), Err(KurvError::Configuration(_))));

        let other_half = CgOptions { diag_shrunk: Some(1.5), ..Default::default() };
        assert!(matches!(other_half.shrinkage(), Err(KurvError::Configuration(_))));
    }
}
