//! Entry types the floating-point hafnian drivers are generic over.
//!
//! [`Scalar`] is the seam between the generic subset-summation code and the
//! dense eigensolver backend. The power-trace engine needs all eigenvalues
//! of a reduced matrix, which are complex even when the matrix itself is
//! real, and each entry type narrows the resulting complex traces back to
//! itself in its own way.

use std::iter::Sum;
use nalgebra as na;
use num_complex::Complex64 as C64;

// Schur iteration budget per matrix row, following the LAPACK convention.
const MAX_SWEEPS_PER_ROW: usize = 30;

/// A matrix entry type accepted by [`hafnian`][crate::hafnian] and
/// [`loop_hafnian`][crate::loop_hafnian].
///
/// Implemented for `f64` and [`Complex64`][num_complex::Complex64]. Both
/// implementations wrap a Schur decomposition with a bounded iteration
/// count, so that a non-converging decomposition surfaces as `None` rather
/// than a hang.
pub trait Scalar:
    na::ComplexField<RealField = f64>
    + Copy
    + Send
    + Sync
    + Sum<Self>
{
    /// Compute all eigenvalues of a square matrix.
    ///
    /// The ordering of the returned eigenvalues is unspecified. Returns
    /// `None` if the decomposition fails to converge.
    fn eigenvalues(mat: na::DMatrix<Self>) -> Option<na::DVector<C64>>;

    /// Narrow a complex power trace back to `Self`.
    fn from_trace(z: C64) -> Self;
}

impl Scalar for f64 {
    fn eigenvalues(mat: na::DMatrix<f64>) -> Option<na::DVector<C64>> {
        let budget = MAX_SWEEPS_PER_ROW * mat.nrows();
        na::linalg::Schur::try_new(mat, f64::EPSILON, budget)
            .map(|schur| schur.complex_eigenvalues())
    }

    // conjugate eigenvalue pairs cancel the imaginary part, up to round-off
    fn from_trace(z: C64) -> f64 { z.re }
}

impl Scalar for C64 {
    fn eigenvalues(mat: na::DMatrix<C64>) -> Option<na::DVector<C64>> {
        let budget = MAX_SWEEPS_PER_ROW * mat.nrows();
        na::linalg::Schur::try_new(mat, f64::EPSILON, budget)
            .and_then(|schur| schur.eigenvalues())
    }

    fn from_trace(z: C64) -> C64 { z }
}
