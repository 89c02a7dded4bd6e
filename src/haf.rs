//! Hafnians of real- and complex-valued matrices via the power-sum
//! expansion of Cygan and Pilipczuk.
//!
//! Summing the (2m − 1)!! perfect matchings of K<sub>2m</sub> directly is
//! hopeless beyond small m. The expansion used here[^1] instead runs over
//! the 2<sup>m</sup> subsets x of the m sibling index pairs {2i, 2i + 1}.
//! Each subset selects a reduced matrix B(x) that pairs every chosen row
//! with its sibling column; the first m power traces of B(x) generate,
//! through the truncated series
//!
//! > Π<sub>i</sub> exp(tr(B(x)<sup>i</sup>) z<sup>i</sup> / (2i)),
//!
//! the inclusion-exclusion contribution of that subset as the z<sup>m</sup>
//! coefficient. Signs alternate with the parity of the subset size, and the
//! total over all subsets is haf(A), at an overall cost of O(m³ 2<sup>m</sup>)
//! plus one small eigendecomposition per subset.
//!
//! The loop variant admits self-loops as matching edges, weighted by the
//! diagonal of A. Per trace step i, the series factor gains a quadratic
//! correction ⟨c B<sup>i−1</sup>, d⟩ / 2 built from the restricted
//! (sibling-swapped) diagonal; the row vector c advances by one
//! multiplication with B per step, so the factors cannot be precomputed up
//! front the way the plain traces can.
//!
//! Subsets are independent and are dispatched to the ambient rayon pool,
//! with per-thread partial sums reduced at join. Floating-point results are
//! therefore reproducible across thread counts only up to round-off in the
//! order of summation.
//!
//! [^1]: <https://arxiv.org/abs/1301.1576>

use std::mem;
use nalgebra as na;
use ndarray as nd;
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use crate::{
    half_dimension,
    powtrace::power_traces,
    scalar::Scalar,
    HafnianError,
};

/// The sibling of a row index within its pair: 2k ↔ 2k + 1.
pub(crate) fn sibling(i: usize) -> usize { i ^ 1 }

// Rows selected by the bits of `x`: bit i contributes 2i and 2i + 1.
fn selected_rows(x: u64, m: usize) -> Vec<usize> {
    let mut pos: Vec<usize> = Vec::with_capacity(2 * x.count_ones() as usize);
    for i in (0..m).filter(|i| x >> i & 1 == 1) {
        pos.push(2 * i);
        pos.push(2 * i + 1);
    }
    pos
}

// B[i, j] = A[pos[i], sibling(pos[j])]: the submatrix on the selected rows,
// with every column replaced by its sibling so that entries read off the
// weights of pair-respecting matchings
fn reduced_matrix<T>(mat: &nd::ArrayView2<T>, pos: &[usize]) -> na::DMatrix<T>
where T: Scalar
{
    na::DMatrix::from_fn(
        pos.len(),
        pos.len(),
        |i, j| mat[[pos[i], sibling(pos[j])]],
    )
}

// Extract the z^m coefficient of Π_i exp(factor_i z^i) by repeated
// convolution into a pair of coefficient rows, then apply the
// inclusion-exclusion sign for a subset of `npairs` index pairs.
//
// `factor_at(i)` is called exactly once per trace step, in order; the
// loop-mode worker relies on this to advance its diagonal correction.
fn fold_summand<T, F>(m: usize, npairs: usize, mut factor_at: F) -> T
where
    T: Scalar,
    F: FnMut(usize) -> T,
{
    let mut prev = vec![T::zero(); m + 1];
    let mut cur = vec![T::zero(); m + 1];
    cur[0] = T::one();
    for i in 1..=m {
        let factor = factor_at(i);
        mem::swap(&mut prev, &mut cur);
        cur.copy_from_slice(&prev);
        let mut powfactor = T::one();
        for j in 1..=m / i {
            // powfactor = factor^j / j! without an explicit factorial
            powfactor = powfactor * factor / T::from_real(j as f64);
            for deg in i * j..=m {
                cur[deg] += prev[deg - i * j] * powfactor;
            }
        }
    }
    if npairs % 2 == m % 2 { cur[m] } else { -cur[m] }
}

// The contribution of one subset to the hafnian.
fn summand<T>(mat: &nd::ArrayView2<T>, x: u64, m: usize) -> Result<T, HafnianError>
where T: Scalar
{
    let pos = selected_rows(x, m);
    let b = reduced_matrix(mat, &pos);
    let traces = power_traces(&b, m)?;
    Ok(fold_summand(m, pos.len() / 2, |i| {
        traces[i - 1] / T::from_real(2.0 * i as f64)
    }))
}

// The contribution of one subset to the loop hafnian. `c` and `d` are the
// sibling-swapped and plain diagonals of the full matrix; their restrictions
// to the selected rows feed the per-step quadratic correction.
fn loop_summand<T>(
    mat: &nd::ArrayView2<T>,
    c: &[T],
    d: &[T],
    x: u64,
    m: usize,
) -> Result<T, HafnianError>
where T: Scalar
{
    let pos = selected_rows(x, m);
    let b = reduced_matrix(mat, &pos);
    let traces = power_traces(&b, m)?;
    let mut c1: na::RowDVector<T> =
        na::RowDVector::from_iterator(pos.len(), pos.iter().map(|&p| c[p]));
    let d1: na::RowDVector<T> =
        na::RowDVector::from_iterator(pos.len(), pos.iter().map(|&p| d[p]));
    Ok(fold_summand(m, pos.len() / 2, |i| {
        // the correction uses c1 = c·B^(i-1), before this step's advance
        let quad = c1.dot(&d1);
        c1 = &c1 * &b;
        traces[i - 1] / T::from_real(2.0 * i as f64)
            + T::from_real(0.5) * quad
    }))
}

/// Compute the hafnian of a dense symmetric matrix of even dimension.
///
/// The caller guarantees symmetry; it is not checked. The hafnian of the
/// empty (0 × 0) matrix is 1.
///
/// Subsets of index pairs are evaluated on the ambient rayon pool. If the
/// eigensolver fails to converge on some reduced matrix, the reduction
/// stops early and the first observed failure is returned.
///
/// # Example
/// ```
/// use hafnian::hafnian;
/// use ndarray as nd;
///
/// // haf([[a, b], [b, c]]) = b
/// let a = nd::array![
///     [7.0, 3.0],
///     [3.0, 9.0],
/// ];
/// assert!((hafnian(a.view()).unwrap() - 3.0).abs() < 1e-12);
/// ```
pub fn hafnian<T>(mat: nd::ArrayView2<T>) -> Result<T, HafnianError>
where T: Scalar
{
    let m = half_dimension(&mat)?;
    (0..1_u64 << m).into_par_iter()
        .map(|x| summand(&mat, x, m))
        .try_reduce(T::zero, |acc, s| Ok(acc + s))
}

/// Compute the loop hafnian of a dense symmetric matrix of even dimension:
/// matchings may include self-loops, weighted by the diagonal entries.
///
/// Coincides with [`hafnian`] whenever the diagonal is zero. The caller
/// guarantees symmetry; it is not checked.
///
/// # Example
/// ```
/// use hafnian::loop_hafnian;
/// use ndarray as nd;
///
/// // loop_haf([[a, b], [b, c]]) = b + ac: either the pair is matched by
/// // its edge, or both vertices carry a loop
/// let a = nd::array![
///     [7.0, 3.0],
///     [3.0, 9.0],
/// ];
/// assert!((loop_hafnian(a.view()).unwrap() - 66.0).abs() < 1e-12);
/// ```
pub fn loop_hafnian<T>(mat: nd::ArrayView2<T>) -> Result<T, HafnianError>
where T: Scalar
{
    let m = half_dimension(&mat)?;
    let d: Vec<T> = mat.diag().to_vec();
    let c: Vec<T> = (0..2 * m).map(|i| d[sibling(i)]).collect();
    (0..1_u64 << m).into_par_iter()
        .map(|x| loop_summand(&mat, &c, &d, x, m))
        .try_reduce(T::zero, |acc, s| Ok(acc + s))
}
