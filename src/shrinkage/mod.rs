//! Spectral shrinkage estimation.

pub mod estimator;

pub use estimator::{ShrinkageEstimator, ShrinkageFormula, ShrinkageParams};
