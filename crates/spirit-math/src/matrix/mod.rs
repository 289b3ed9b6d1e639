//! The fixed-size [`Matrix`] value type.
//!
//! Shapes are const generics. Operations that only make sense for some shapes
//! (vector-only helpers, square-only inversion) are either placed on a
//! concrete impl block or guarded by an inline `const` assertion, so misuse is
//! rejected when the code is compiled rather than when it runs.
//!
//! Every operation produces a fully materialized value. In-place operations
//! compute their result into a fresh matrix before overwriting `self`.

mod linalg;
mod ops;
mod solve;

use std::fmt;
use std::ops::{Index, IndexMut};

use nalgebra::SMatrix;

use crate::error::{MathError, Result};
use crate::scalar::Scalar;

/// A `R x C` matrix of `T`.
///
/// Column vectors are `Matrix<T, N, 1>`, row vectors `Matrix<T, 1, N>`.
/// Elements are stored column-major.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        transparent,
        bound(
            serialize = "T: Scalar + serde::Serialize",
            deserialize = "T: Scalar + serde::Deserialize<'de>"
        )
    )
)]
pub struct Matrix<T, const R: usize, const C: usize> {
    inner: SMatrix<T, R, C>,
}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// `true` when this shape is a column vector (one column).
    pub const IS_COL_VECTOR: bool = C == 1;
    /// `true` when this shape is a row vector (one row, more than one column).
    pub const IS_ROW_VECTOR: bool = R == 1 && C != 1;
    /// `true` for the `1 x 1` shape.
    pub const IS_VALUE: bool = R == 1 && C == 1;
    /// `true` for row and column vectors.
    pub const IS_VECTOR: bool = Self::IS_ROW_VECTOR || Self::IS_COL_VECTOR;

    /// Number of rows.
    #[inline]
    pub const fn rows(&self) -> usize {
        R
    }

    /// Number of columns.
    #[inline]
    pub const fn cols(&self) -> usize {
        C
    }

    /// Total number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        R * C
    }

    /// Always `false`: zero-sized shapes cannot be constructed.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    #[inline]
    pub(crate) fn from_inner(inner: SMatrix<T, R, C>) -> Self {
        const { assert!(R > 0 && C > 0, "matrix dimensions must be non-zero") };
        Self { inner }
    }

    /// Builds a vector from its coefficients, in order.
    ///
    /// Only available for vectors; matrices are built with [`Matrix::from_rows`].
    pub fn from_coefficients<const N: usize>(values: [T; N]) -> Self {
        const {
            assert!(R == 1 || C == 1, "use from_rows if this is not a vector");
            assert!(N == R * C, "coefficient count must match the vector length");
        };
        // a vector's column-major order is its natural order
        Self::from_inner(SMatrix::from_column_slice(&values))
    }

    /// Builds a matrix from an array of rows.
    ///
    /// Only available for non-vector shapes; vectors are built with
    /// [`Matrix::from_coefficients`].
    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        const { assert!(R != 1 && C != 1, "use from_coefficients if this is a vector") };
        Self::from_inner(SMatrix::from_fn(|r, c| rows[r][c]))
    }

    /// Builds a matrix by evaluating `f(row, col)` for every element.
    pub fn from_fn(f: impl FnMut(usize, usize) -> T) -> Self {
        Self::from_inner(SMatrix::from_fn(f))
    }

    /// Matrix filled with zeros.
    pub fn zeros() -> Self {
        Self::from_inner(SMatrix::zeros())
    }

    /// Ones on the principal diagonal, zeros elsewhere.
    ///
    /// The matrix does not need to be square.
    pub fn identity() -> Self {
        Self::from_inner(SMatrix::identity())
    }

    /// Random matrix drawn from the thread-local generator.
    ///
    /// See [`Scalar::random_with`] for the value ranges.
    pub fn random() -> Self {
        let mut rng = fastrand::Rng::new();
        Self::random_with(&mut rng)
    }

    /// Random matrix drawn from `rng`.
    pub fn random_with(rng: &mut fastrand::Rng) -> Self {
        Self::from_inner(SMatrix::from_fn(|_, _| T::random_with(rng)))
    }

    /// Unit basis vector along `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis` is not smaller than the vector length.
    pub fn unit(axis: usize) -> Self {
        const { assert!(R == 1 || C == 1, "must be a vector type") };
        assert!(
            axis < R * C,
            "axis {axis} out of range for a vector of length {}",
            R * C
        );
        let mut v = Self::zeros();
        v.inner[axis] = T::one();
        v
    }

    /// Unit vector along the first axis.
    pub fn unit_x() -> Self {
        const { assert!((R == 1 || C == 1) && R * C >= 1, "must be a vector of length >= 1") };
        Self::unit(0)
    }

    /// Unit vector along the second axis.
    pub fn unit_y() -> Self {
        const { assert!((R == 1 || C == 1) && R * C >= 2, "must be a vector of length >= 2") };
        Self::unit(1)
    }

    /// Unit vector along the third axis.
    pub fn unit_z() -> Self {
        const { assert!((R == 1 || C == 1) && R * C >= 3, "must be a vector of length >= 3") };
        Self::unit(2)
    }

    /// Unit vector along the fourth axis.
    pub fn unit_w() -> Self {
        const { assert!((R == 1 || C == 1) && R * C >= 4, "must be a vector of length >= 4") };
        Self::unit(3)
    }
}

impl<T: Scalar> Matrix<T, 2, 1> {
    /// Column vector `(x, y)`.
    pub fn new(x: T, y: T) -> Self {
        Self::from_coefficients([x, y])
    }
}

impl<T: Scalar> Matrix<T, 3, 1> {
    /// Column vector `(x, y, z)`.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self::from_coefficients([x, y, z])
    }
}

impl<T: Scalar> Matrix<T, 4, 1> {
    /// Column vector `(x, y, z, w)`.
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self::from_coefficients([x, y, z, w])
    }
}

impl<T: Scalar, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<SMatrix<T, R, C>> for Matrix<T, R, C> {
    fn from(inner: SMatrix<T, R, C>) -> Self {
        Self::from_inner(inner)
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<Matrix<T, R, C>> for SMatrix<T, R, C> {
    fn from(m: Matrix<T, R, C>) -> Self {
        m.inner
    }
}

/// Row-major slice whose length is only known at runtime.
impl<T: Scalar, const R: usize, const C: usize> TryFrom<&[T]> for Matrix<T, R, C> {
    type Error = MathError;

    fn try_from(values: &[T]) -> Result<Self> {
        if values.len() != R * C {
            return Err(MathError::LengthMismatch {
                expected: R * C,
                found: values.len(),
            });
        }
        Ok(Self::from_inner(SMatrix::from_row_slice(values)))
    }
}

// =============================================================================
// Shape algebra and element access
// =============================================================================

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The underlying nalgebra matrix.
    #[inline]
    pub fn as_nalgebra(&self) -> &SMatrix<T, R, C> {
        &self.inner
    }

    /// Elements in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    /// Iterates over elements in column-major order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// A transposed copy.
    ///
    /// For square matrices, [`Matrix::transpose`] does the same in place.
    #[must_use]
    pub fn transposed(&self) -> Matrix<T, C, R> {
        Matrix::from_inner(self.inner.transpose())
    }

    /// Copy of row `index`.
    pub fn row(&self, index: usize) -> Matrix<T, 1, C> {
        Matrix::from_inner(self.inner.row(index).into_owned())
    }

    /// Copy of column `index`.
    pub fn col(&self, index: usize) -> Matrix<T, R, 1> {
        Matrix::from_inner(self.inner.column(index).into_owned())
    }

    /// Copy of the `R2 x C2` block whose top-left corner is `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the block does not fit inside the matrix.
    pub fn block<const R2: usize, const C2: usize>(&self, row: usize, col: usize) -> Matrix<T, R2, C2> {
        Matrix::from_inner(self.inner.fixed_view::<R2, C2>(row, col).into_owned())
    }

    /// Overwrites the block whose top-left corner is `(row, col)` with `block`.
    ///
    /// # Panics
    ///
    /// Panics if the block does not fit inside the matrix.
    pub fn set_block<const R2: usize, const C2: usize>(
        &mut self,
        row: usize,
        col: usize,
        block: &Matrix<T, R2, C2>,
    ) {
        self.inner
            .fixed_view_mut::<R2, C2>(row, col)
            .copy_from(&block.inner);
    }

    /// First coordinate of a vector.
    pub fn x(&self) -> T {
        const { assert!(R == 1 || C == 1, "must be a vector type") };
        self.inner[0]
    }

    /// Second coordinate of a vector.
    pub fn y(&self) -> T {
        const { assert!((R == 1 || C == 1) && R * C >= 2, "must be a vector of length >= 2") };
        self.inner[1]
    }

    /// Third coordinate of a vector.
    pub fn z(&self) -> T {
        const { assert!((R == 1 || C == 1) && R * C >= 3, "must be a vector of length >= 3") };
        self.inner[2]
    }

    /// Fourth coordinate of a vector.
    pub fn w(&self) -> T {
        const { assert!((R == 1 || C == 1) && R * C >= 4, "must be a vector of length >= 4") };
        self.inner[3]
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Transposes a square matrix in place.
    pub fn transpose(&mut self) {
        self.inner = self.inner.transpose();
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, 1> {
    /// Lifts a column vector into homogeneous space by appending a 1.
    ///
    /// `M` must be `N + 1`.
    pub fn homogeneous<const M: usize>(&self) -> Matrix<T, M, 1> {
        const { assert!(M == N + 1, "homogeneous vector must have one more coordinate") };
        let mut out = Matrix::<T, M, 1>::zeros();
        out.inner.fixed_view_mut::<N, 1>(0, 0).copy_from(&self.inner);
        out.inner[N] = T::one();
        out
    }
}

impl<T: Scalar, const N: usize> Matrix<T, 1, N> {
    /// Lifts a row vector into homogeneous space by appending a 1.
    ///
    /// `M` must be `N + 1`.
    pub fn homogeneous_row<const M: usize>(&self) -> Matrix<T, 1, M> {
        const { assert!(M == N + 1, "homogeneous vector must have one more coordinate") };
        let mut out = Matrix::<T, 1, M>::zeros();
        out.inner.fixed_view_mut::<1, N>(0, 0).copy_from(&self.inner);
        out.inner[N] = T::one();
        out
    }
}

/// Single-index access, vectors only. Use `m[(row, col)]` for matrices.
impl<T: Scalar, const R: usize, const C: usize> Index<usize> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        const { assert!(R == 1 || C == 1, "disabled for matrices, use matrix[(row, col)]") };
        &self.inner[index]
    }
}

impl<T: Scalar, const R: usize, const C: usize> IndexMut<usize> for Matrix<T, R, C> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        const { assert!(R == 1 || C == 1, "disabled for matrices, use matrix[(row, col)]") };
        &mut self.inner[index]
    }
}

impl<T: Scalar, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.inner[(row, col)]
    }
}

impl<T: Scalar, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.inner[(row, col)]
    }
}

// =============================================================================
// Comparison and formatting
// =============================================================================

/// Exact elementwise equality.
impl<T: Scalar, const R: usize, const C: usize> PartialEq for Matrix<T, R, C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Scalar + Eq, const R: usize, const C: usize> Eq for Matrix<T, R, C> {}

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Elementwise comparison with the element type's default tolerance.
    ///
    /// Closeness never implies `==`.
    pub fn is_approx(&self, other: &Self) -> bool {
        self.is_approx_with(other, T::default_tolerance())
    }

    /// Elementwise comparison with an explicit tolerance.
    pub fn is_approx_with(&self, other: &Self, tolerance: T) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(&a, &b)| a.approx_eq(b, tolerance))
    }
}

impl<T, const R: usize, const C: usize> approx::AbsDiffEq for Matrix<T, R, C>
where
    T: Scalar + approx::AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T, const R: usize, const C: usize> approx::RelativeEq for Matrix<T, R, C>
where
    T: Scalar + approx::RelativeEq,
    T::Epsilon: Copy,
{
    #[inline]
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    #[inline]
    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T, const R: usize, const C: usize> approx::UlpsEq for Matrix<T, R, C>
where
    T: Scalar + approx::UlpsEq,
    T::Epsilon: Copy,
{
    #[inline]
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    #[inline]
    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

/// One bracketed row per line: `[1, 2]\n[3, 4]`.
impl<T: Scalar, const R: usize, const C: usize> fmt::Display for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..R {
            if r > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for c in 0..C {
                if c > 0 {
                    write!(f, ", ")?;
                }
                fmt::Display::fmt(&self.inner[(r, c)], f)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
