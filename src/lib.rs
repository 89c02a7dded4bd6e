//! Evaluation of hafnians of dense matrices.
//!
//! The hafnian of a symmetric matrix A of even dimension 2m is the weighted
//! sum over all perfect matchings of the complete graph on 2m vertices,
//!
//! > haf(A) = Σ<sub>M ∈ PMP(2m)</sub> Π<sub>(i,j) ∈ M</sub> A<sub>ij</sub>,
//!
//! where PMP(2m) is the set of partitions of {1, ..., 2m} into unordered
//! pairs. It is the matching-polynomial analogue of the permanent and shows
//! up as the central quantity in Gaussian boson sampling and other photonic
//! simulation problems, where the number of samples one can certify is
//! limited by how large a hafnian one can evaluate classically.
//!
//! Three entry points are provided:
//! - [`hafnian`] evaluates haf(A) for real or complex A by the
//!   power-sum expansion of Cygan and Pilipczuk, which replaces the
//!   (2m − 1)!!-term matching sum by a sum over 2<sup>m</sup> subsets of
//!   index pairs, each costing one small eigendecomposition;
//! - [`loop_hafnian`] additionally admits self-loops as matching edges,
//!   weighted by the diagonal of A;
//! - [`hafnian_int`] evaluates haf(A) for integer A exactly, by a recursive
//!   doubling procedure on polynomial-weighted edges that involves no
//!   floating-point arithmetic at all.
//!
//! All subset contributions are evaluated in parallel on the ambient
//! [`rayon`] thread pool; set `RAYON_NUM_THREADS` to control the worker
//! count.
//!
//! # Example
//! ```
//! use hafnian::{ hafnian, loop_hafnian };
//! use ndarray as nd;
//!
//! // the all-ones matrix of dimension 4: every pairing has weight 1, so the
//! // hafnian counts the three perfect matchings of K_4
//! let a: nd::Array2<f64> = nd::Array2::ones((4, 4));
//! assert!((hafnian(a.view()).unwrap() - 3.0).abs() < 1e-10);
//!
//! // with self-loops allowed there are ten ways to pair up four vertices
//! assert!((loop_hafnian(a.view()).unwrap() - 10.0).abs() < 1e-10);
//! ```

use ndarray as nd;
use thiserror::Error;

pub mod scalar;
pub mod powtrace;
pub mod haf;
pub mod exact;

pub use scalar::Scalar;
pub use haf::{ hafnian, loop_hafnian };
pub use exact::hafnian_int;

/// Errors produced by the hafnian drivers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum HafnianError {
    /// Input matrix is not square.
    #[error("expected a square matrix, got {0} × {1}")]
    NonSquare(usize, usize),
    /// Input matrix has odd dimension.
    #[error("expected a matrix of even dimension, got {0}")]
    EvenDimensionRequired(usize),
    /// Input matrix dimension exceeds the word-size bound 2m ≤ 63.
    #[error("matrix dimension {0} exceeds the supported maximum of 63")]
    TooLarge(usize),
    /// The eigensolver backend failed to converge on a reduced matrix of the
    /// given side.
    #[error("eigensolver failed to converge on a reduced matrix of side {0}")]
    EigensolverFailure(usize),
}

// Validate that `mat` is square with even dimension 2m <= 63, and return
// m. All drivers check their input through this exactly once, at entry.
pub(crate) fn half_dimension<T>(mat: &nd::ArrayView2<T>) -> Result<usize, HafnianError> {
    let (nrows, ncols) = mat.dim();
    if nrows != ncols {
        return Err(HafnianError::NonSquare(nrows, ncols));
    }
    if nrows % 2 != 0 {
        return Err(HafnianError::EvenDimensionRequired(nrows));
    }
    if nrows > 63 {
        return Err(HafnianError::TooLarge(nrows));
    }
    Ok(nrows / 2)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dimension_checks() {
        let odd: nd::Array2<f64> = nd::Array2::zeros((3, 3));
        assert_eq!(
            half_dimension(&odd.view()),
            Err(HafnianError::EvenDimensionRequired(3)),
        );

        let rect: nd::Array2<f64> = nd::Array2::zeros((2, 4));
        assert_eq!(
            half_dimension(&rect.view()),
            Err(HafnianError::NonSquare(2, 4)),
        );

        let ok: nd::Array2<f64> = nd::Array2::zeros((6, 6));
        assert_eq!(half_dimension(&ok.view()), Ok(3));

        let big: nd::Array2<f64> = nd::Array2::zeros((64, 64));
        assert_eq!(half_dimension(&big.view()), Err(HafnianError::TooLarge(64)));

        let empty: nd::Array2<f64> = nd::Array2::zeros((0, 0));
        assert_eq!(half_dimension(&empty.view()), Ok(0));
    }
}
