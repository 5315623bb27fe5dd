use thiserror::Error;

// Unified error type for kurv.
//
// Numerical degeneracy (zero residual, zero curvature along a search direction) is
// not an error by default: it surfaces as inf/nan in the output vector. The variants
// below cover the fail-fast paths only.

#[derive(Error, Debug)]
pub enum KurvError {
    #[error("dimension mismatch: operator dimension {operator}, vector length {vector}")]
    InvalidDimension { operator: usize, vector: usize },
    #[error("invalid shrinkage configuration: {0}")]
    Configuration(&'static str),
    #[error("degenerate operator detected: {0}")]
    DegenerateOperator(&'static str),
}
