//! Core linear-algebra traits for kurv.

/// A symmetric linear operator accessed through its matrix-vector product: y ← A x.
///
/// This is the whole contract between the solvers in this crate and the caller's
/// curvature model (Fisher, Gauss-Newton, Hessian, ...). The operator is never
/// materialized; one `mvp` call per iteration is the only access pattern.
///
/// Callers guarantee, and implementations may assume without checking:
/// - `mvp` is deterministic and linear in `x`;
/// - the represented matrix is symmetric and approximately positive semidefinite;
/// - any state captured by the implementation (model parameters, minibatch) stays
///   stable for the duration of one spectrum estimation or one solve.
pub trait Operator<V> {
    /// Compute y = A · x.
    fn mvp(&self, x: &V, y: &mut V);
}

/// Inner products & norms.
pub trait InnerProduct<V> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd + From<f64>;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}

/// Uniform indexing into vectors and operators.
pub trait Indexing {
    /// Number of rows (or length for a vector).
    fn nrows(&self) -> usize;
}
