//! Exact hafnians of integer matrices.
//!
//! The floating-point drivers in [`haf`][crate::haf] inherit round-off from
//! the eigensolver backend, which is unacceptable when the hafnian is a
//! count. The procedure here evaluates haf(A) for integer A with no
//! floating-point arithmetic at all: every edge (j, k) of the underlying
//! complete graph carries a polynomial in a formal matching variable, seeded
//! with the matrix entry as its constant coefficient, and vertices are
//! eliminated two at a time. At each level the two ways of disposing of the
//! eliminated vertices split the sum: either they are matched to each other
//! (their edge polynomial folds into a shared accumulator, shifted up one
//! degree) or each is matched among the remaining vertices (every surviving
//! edge absorbs the two cross products). Signs alternate per level, and the
//! degree-m coefficient of the accumulator survives at the bottom of the
//! recursion. The cost is O(m³ 2<sup>m</sup>) integer operations with
//! exponential memory in the polynomial arrays.
//!
//! Arithmetic is done in `i64` and overflow is not detected; the caller is
//! responsible for keeping every intermediate matching sum inside the signed
//! 64-bit range. The result is exact and independent of the thread count.

use ndarray as nd;
use rayon::iter::{
    IndexedParallelIterator,
    IntoParallelRefIterator,
    IntoParallelRefMutIterator,
    ParallelIterator,
};
use crate::{ half_dimension, HafnianError };

// A polynomial of degree <= m in the matching variable, stored as
// coefficients [z^0, ..., z^m].
type Poly = Vec<i64>;

// Index of the unordered pair (j, k), j > k, in a packed lower triangle.
fn pair_index(j: usize, k: usize) -> usize { j * (j - 1) / 2 + k }

// Pairs among the vertices 2..s, in packed-triangle order.
fn remaining_pairs(s: usize) -> Vec<(usize, usize)> {
    (2..s).flat_map(|j| (2..j).map(move |k| (j, k))).collect()
}

// One level of the vertex-elimination recursion on `s` vertices. `b` holds
// the edge polynomials, `g` the shared accumulator, `w` the running sign,
// and `m` the degree bound.
fn matchings(b: &[Poly], s: usize, w: i64, g: &[i64], m: usize) -> i64 {
    if s == 0 {
        return w * g[m];
    }

    // edges among the surviving vertices, reindexed down by two
    let pairs = remaining_pairs(s);
    let mut c: Vec<Poly> =
        pairs.iter().map(|&(j, k)| b[pair_index(j, k)].clone()).collect();

    // recurse once on the untouched surviving edges with the sign flipped;
    // this term cancels the overcount of the augmented recursion below
    let skipped = matchings(&c, s - 2, -w, g, m);

    // fold the edge between the two eliminated vertices into the
    // accumulator, one degree higher
    let b01 = &b[0];
    let mut e = g.to_vec();
    for u in 0..m {
        for v in 0..m - u {
            e[u + v + 1] += g[u] * b01[v];
        }
    }

    // each surviving edge (j, k) absorbs the two ways of matching the
    // eliminated vertices into the pair: 0-j with 1-k, or 0-k with 1-j.
    // Every row of `c` belongs to exactly one pair, so the rows are
    // independent units of work.
    c.par_iter_mut()
        .zip(pairs.par_iter())
        .for_each(|(cp, &(j, k))| {
            let bj0 = &b[pair_index(j, 0)];
            let bj1 = &b[pair_index(j, 1)];
            let bk0 = &b[pair_index(k, 0)];
            let bk1 = &b[pair_index(k, 1)];
            for u in 0..m {
                for v in 0..m - u {
                    cp[u + v + 1] += bj0[u] * bk1[v] + bk0[u] * bj1[v];
                }
            }
        });

    skipped + matchings(&c, s - 2, w, &e, m)
}

/// Compute the hafnian of a dense integer matrix of even dimension exactly.
///
/// Only the strictly lower triangle of the matrix is read. Overflow of
/// `i64` is **not** detected; the caller must bound the entries so that no
/// partial matching sum exceeds `i64::MAX`. The hafnian of the empty
/// (0 × 0) matrix is 1.
///
/// # Example
/// ```
/// use hafnian::hafnian_int;
/// use ndarray as nd;
///
/// let a: nd::Array2<i64> = nd::Array2::ones((6, 6));
/// // the perfect matchings of K_6
/// assert_eq!(hafnian_int(a.view()), Ok(15));
/// ```
pub fn hafnian_int(mat: nd::ArrayView2<i64>) -> Result<i64, HafnianError> {
    let m = half_dimension(&mat)?;
    let n = 2 * m;
    let npairs = n * n.saturating_sub(1) / 2;
    let mut b: Vec<Poly> = vec![vec![0; m + 1]; npairs];
    for j in 1..n {
        for k in 0..j {
            b[pair_index(j, k)][0] = mat[[j, k]];
        }
    }
    let mut g: Poly = vec![0; m + 1];
    g[0] = 1;
    Ok(matchings(&b, n, 1, &g, m))
}
