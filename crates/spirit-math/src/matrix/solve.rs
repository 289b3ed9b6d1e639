//! QR-based linear solvers.
//!
//! The decompositions run on dynamically sized copies: nalgebra's fixed-size
//! QR needs typenum-backed dimensions, which a const generic size cannot
//! provide.

use nalgebra::{ComplexField, DMatrix, SMatrix};

use super::Matrix;
use crate::scalar::{Real, Scalar};

impl<T: Real, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Solves `self * x = b` with a Householder QR decomposition.
    ///
    /// Returns the exact solution for a well-posed square system and the
    /// least-squares solution for a full-rank overdetermined one. For
    /// rank-deficient or inconsistent systems the result may be meaningless;
    /// when several exact solutions exist an arbitrary one is returned. Check
    /// with [`Matrix::is_good_solution`] if certainty is needed.
    pub fn solve<const K: usize>(&self, b: &Matrix<T, R, K>) -> Matrix<T, C, K> {
        let qr = to_dynamic(&self.inner).qr();
        let rhs = qr.q().transpose() * to_dynamic(&b.inner);
        let x = back_substitute(&qr.r(), &rhs, R.min(C));
        Matrix::from_inner(SMatrix::from_column_slice(x.as_slice()))
    }

    /// Solves `self * x = b` with a column-pivoted Householder QR.
    ///
    /// Slower than [`Matrix::solve`], but handles rank-deficient systems by
    /// dropping the columns whose pivots vanish numerically. Same contract
    /// otherwise.
    pub fn solve_accurate<const K: usize>(&self, b: &Matrix<T, R, K>) -> Matrix<T, C, K> {
        let qr = to_dynamic(&self.inner).col_piv_qr();
        let r = qr.r();
        let rank = numerical_rank(&r);
        let rhs = qr.q().transpose() * to_dynamic(&b.inner);
        let mut x = back_substitute(&r, &rhs, rank);
        qr.p().inv_permute_rows(&mut x);
        Matrix::from_inner(SMatrix::from_column_slice(x.as_slice()))
    }
}

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Whether `x` solves `self * x = b` within the default tolerance.
    pub fn is_good_solution<const K: usize>(&self, x: &Matrix<T, C, K>, b: &Matrix<T, R, K>) -> bool {
        self.is_good_solution_with(x, b, T::default_tolerance())
    }

    /// Whether `x` solves `self * x = b` within `tolerance`.
    ///
    /// Only reports; a bad solution is never an error.
    pub fn is_good_solution_with<const K: usize>(
        &self,
        x: &Matrix<T, C, K>,
        b: &Matrix<T, R, K>,
        tolerance: T,
    ) -> bool {
        let good = (*self * *x).is_approx_with(b, tolerance);
        if !good {
            log::trace!("rejected solution of a {R}x{C} system");
        }
        good
    }
}

fn to_dynamic<T: Scalar, const R: usize, const C: usize>(
    m: &SMatrix<T, R, C>,
) -> DMatrix<T> {
    DMatrix::from_column_slice(R, C, m.as_slice())
}

/// Back substitution on the leading `rank x rank` block of the upper
/// trapezoidal `r`. Unknowns past `rank` are set to zero.
fn back_substitute<T: Real>(r: &DMatrix<T>, rhs: &DMatrix<T>, rank: usize) -> DMatrix<T> {
    let mut x = DMatrix::zeros(r.ncols(), rhs.ncols());
    for k in 0..rhs.ncols() {
        for i in (0..rank).rev() {
            let mut acc = rhs[(i, k)];
            for j in (i + 1)..rank {
                acc -= r[(i, j)] * x[(j, k)];
            }
            x[(i, k)] = acc / r[(i, i)];
        }
    }
    x
}

/// Number of pivots of a column-pivoted `r` that are not negligible next to
/// the largest one.
fn numerical_rank<T: Real>(r: &DMatrix<T>) -> usize {
    let n = r.nrows().min(r.ncols());
    let pivot = |i: usize| ComplexField::abs(r[(i, i)]);
    let largest = (0..n).map(pivot).fold(T::zero(), |acc, d| acc.max(d));
    let size: T = nalgebra::convert(r.nrows().max(r.ncols()) as f64);
    let threshold = largest * T::default_epsilon() * size;
    (0..n).take_while(|&i| pivot(i) > threshold).count()
}
