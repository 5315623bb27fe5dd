//! kurv: spectrum-aware solvers for matrix-free curvature operators
//!
//! This crate provides the numerical core used by shrinkage-stabilized natural-gradient
//! optimizers: Lanczos eigenvalue estimation for implicitly-defined symmetric operators,
//! closed-form covariance shrinkage, and a shrinkage-regularized conjugate gradient solver.
//! Operators are accessed exclusively through matrix-vector products; nothing here ever
//! materializes a matrix.

pub mod config;
pub mod context;
pub mod core;
pub mod eigen;
pub mod error;
pub mod shrinkage;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use crate::config::*;
pub use crate::context::*;
pub use crate::core::*;
pub use crate::eigen::*;
pub use crate::error::*;
pub use crate::shrinkage::*;
pub use crate::solver::*;
pub use crate::utils::*;

// Re-export SolveStats at the crate root for convenience
pub use crate::utils::convergence::SolveStats;
