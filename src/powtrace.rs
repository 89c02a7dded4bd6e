//! Power traces tr(B^k) of a dense matrix, computed from its eigenvalues.
//!
//! After a single eigendecomposition of an n × n matrix, the first ℓ power
//! traces cost only O(ℓn): tr(B^k) = Σ<sub>j</sub> λ<sub>j</sub><sup>k</sup>
//! for eigenvalues λ, accumulated by keeping a running vector of k-th
//! powers. The subset workers in [`haf`][crate::haf] call this once per
//! reduced matrix.

use nalgebra as na;
use num_complex::Complex64 as C64;
use crate::{ scalar::Scalar, HafnianError };

/// Compute `[tr(B), tr(B²), ..., tr(B^l)]`.
///
/// The traces of the empty matrix are all zero and the eigensolver backend
/// is not invoked in that case. Fails with
/// [`EigensolverFailure`][HafnianError::EigensolverFailure] if the
/// decomposition does not converge.
pub fn power_traces<T>(b: &na::DMatrix<T>, l: usize) -> Result<Vec<T>, HafnianError>
where T: Scalar
{
    let n = b.nrows();
    let mut traces = vec![T::zero(); l];
    if n == 0 { return Ok(traces); }
    let vals = T::eigenvalues(b.clone())
        .ok_or(HafnianError::EigensolverFailure(n))?;
    let mut pvals: na::DVector<C64> = vals.clone();
    for tr in traces.iter_mut() {
        *tr = T::from_trace(pvals.iter().copied().sum());
        pvals.zip_apply(&vals, |p, v| *p *= v);
    }
    Ok(traces)
}
