//! Closed-form shrinkage intensity from an eigenvalue sample.
//!
//! Treats the curvature operator as a sample covariance matrix of dimension `p`
//! estimated from `batch_size` samples and computes the optimal intensity `rho`
//! for blending it toward a scaled identity target, using a subset of its
//! eigenvalues as a proxy for the trace moments `tr(S) = Σλ` and `tr(S²) = Σλ²`.
//!
//! # References
//! - Chen, Wiesel, Eldar, Hero (2010). Shrinkage Algorithms for MMSE Covariance
//!   Estimation. https://arxiv.org/pdf/0907.4698.pdf
//! - Eldar et al., shrinkage estimation notes (the [`ShrinkageFormula::PerDimension`]
//!   variant), http://webee.technion.ac.il/Sites/People/YoninaEldar/Info/Shrink.pdf

use num_traits::{Float, FromPrimitive};

/// Which closed-form intensity expression to use.
///
/// An explicit per-call parameter, never a process-wide toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShrinkageFormula {
    /// The Chen–Wiesel–Eldar–Hero expression. Default.
    #[default]
    Oas,
    /// Variant dividing by `p` inside both numerator and denominator terms.
    /// Empirically weaker; kept as a documented fallback only.
    PerDimension,
}

/// Output of a shrinkage estimate, consumed by exactly one solve.
///
/// `rho` is the convex-combination weight toward the identity target and
/// `diag_shrunk` (the mean eigenvalue) is the identity's scale. `rho` never
/// exceeds 1.0 but is NOT clipped below zero: a small or negative denominator can
/// produce a negative intensity, and it is passed through unchanged. Clamp before
/// constructing a `ShrinkageParams` if nonnegative shrinkage is required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkageParams<T> {
    pub rho: T,
    pub diag_shrunk: T,
}

/// Shrinkage intensity estimator over an eigenvalue sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShrinkageEstimator {
    pub formula: ShrinkageFormula,
}

impl ShrinkageEstimator {
    pub fn new(formula: ShrinkageFormula) -> Self {
        Self { formula }
    }

    /// Estimate `(rho, diag_shrunk)` from `m ≤ p` eigenvalues of a `p`-dimensional
    /// operator built from `batch_size` samples.
    ///
    /// Degenerate inputs (zero denominator, empty sample, `p = 0`) surface as
    /// inf/nan in `rho`, never as an error.
    pub fn estimate<T>(&self, eigvals: &[T], p: usize, batch_size: usize) -> ShrinkageParams<T>
    where
        T: Float + FromPrimitive,
    {
        let one = T::one();
        let two = one + one;
        let p_t = T::from_usize(p).unwrap_or(T::zero());
        let n_t = T::from_usize(batch_size).unwrap_or(T::zero());

        let tr_s = eigvals.iter().fold(T::zero(), |acc, &l| acc + l);
        let tr2_s = tr_s * tr_s;
        let tr_s2 = eigvals.iter().fold(T::zero(), |acc, &l| acc + l * l);

        let (numer, denom) = match self.formula {
            ShrinkageFormula::Oas => (
                (one - two / p_t) * tr_s2 + tr2_s,
                (n_t + one - two / p_t) * (tr_s2 - tr2_s / p_t),
            ),
            ShrinkageFormula::PerDimension => (
                ((one - two) / p_t) * tr_s2 + tr2_s,
                ((n_t + one - two) / p_t) * (tr_s2 - tr2_s / p_t),
            ),
        };

        // Clip above at full shrinkage. Written as a comparison rather than
        // Float::min so that a nan ratio passes through instead of clipping.
        let ratio = numer / denom;
        let rho = if ratio > one { one } else { ratio };
        let diag_shrunk = tr_s / p_t;

        ShrinkageParams { rho, diag_shrunk }
    }
}
