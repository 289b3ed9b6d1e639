//! Affine transformations stored as homogeneous matrices.
//!
//! `Transformation<T, D, H>` maps `D`-dimensional points through a
//! `H x H` homogeneous matrix, `H = D + 1`. The bottom row is always
//! `(0, ..., 0, 1)`.
//!
//! # Composition order
//!
//! The chainable operations (`scale`, `translate`, `rotate`, `shear`)
//! pre-compose: `t.op(args)` sets `t = local(args) * t`. Applied to a point,
//! the operation called last in program order acts last:
//!
//! ```
//! use spirit_transform::{radians, Transform2D};
//! use spirit_math::Vec2;
//!
//! let mut t = Transform2D::identity();
//! t.translate(&Vec2::new(1.0, 0.0)).rotate(radians(90.0));
//! // (0, 0) is translated to (1, 0), then rotated to (0, 1)
//! assert!((t * Vec2::zeros()).is_approx(&Vec2::new(0.0, 1.0)));
//! ```

use std::fmt;
use std::ops::{Mul, MulAssign};

use spirit_math::{Matrix, Real, Scalar, Vector};

use crate::error::{Result, TransformError};

/// An affine map in `D`-dimensional space.
///
/// `H` must be `D + 1`; constructing any other combination fails to compile.
/// Use the [`Transform2`] and [`Transform3`] aliases.
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
pub struct Transformation<T, const D: usize, const H: usize> {
    matrix: Matrix<T, H, H>,
}

/// 2D transformation.
pub type Transform2<T> = Transformation<T, 2, 3>;

/// 3D transformation.
pub type Transform3<T> = Transformation<T, 3, 4>;

/// 2D `f32` transformation.
pub type Transform2D = Transform2<f32>;

/// 3D `f32` transformation.
pub type Transform3D = Transform3<f32>;

// =============================================================================
// Construction
// =============================================================================

impl<T: Scalar, const D: usize, const H: usize> Transformation<T, D, H> {
    #[inline]
    fn wrap(matrix: Matrix<T, H, H>) -> Self {
        const { assert!(D > 0 && H == D + 1, "homogeneous size must be the dimension plus one") };
        Self { matrix }
    }

    /// The identity transformation.
    pub fn identity() -> Self {
        Self::wrap(Matrix::identity())
    }

    /// Transformation with the given linear part and no translation.
    pub fn from_linear(linear: &Matrix<T, D, D>) -> Self {
        let mut matrix = Matrix::identity();
        matrix.set_block(0, 0, linear);
        Self::wrap(matrix)
    }

    /// Uses `matrix` as the homogeneous matrix verbatim.
    ///
    /// The bottom row is not checked: the caller is responsible for passing
    /// an affine matrix. See [`Transformation::try_from_homogeneous`].
    pub fn from_homogeneous(matrix: Matrix<T, H, H>) -> Self {
        Self::wrap(matrix)
    }

    /// Like [`Transformation::from_homogeneous`], but rejects matrices whose
    /// bottom row is not exactly `(0, ..., 0, 1)`.
    pub fn try_from_homogeneous(matrix: Matrix<T, H, H>) -> Result<Self> {
        for col in 0..H {
            let expected = if col == D { T::one() } else { T::zero() };
            let found = matrix[(D, col)];
            if found != expected {
                log::debug!("rejected homogeneous matrix with bottom row element {col} = {found}");
                return Err(TransformError::NotAffine {
                    col,
                    found: found.to_string(),
                });
            }
        }
        Ok(Self::wrap(matrix))
    }

    /// Replaces this transformation with one holding only `linear`.
    ///
    /// Any translation is discarded.
    pub fn set_linear(&mut self, linear: &Matrix<T, D, D>) -> &mut Self {
        *self = Self::from_linear(linear);
        self
    }
}

impl<T: Scalar, const D: usize, const H: usize> Default for Transformation<T, D, H> {
    fn default() -> Self {
        Self::identity()
    }
}

// =============================================================================
// Chainable operations
// =============================================================================

impl<T: Scalar, const D: usize, const H: usize> Transformation<T, D, H> {
    /// `self = local * self`.
    fn pre_compose(&mut self, local: Matrix<T, H, H>) -> &mut Self {
        self.matrix = local * self.matrix;
        self
    }

    /// Scales uniformly by `factor`.
    pub fn scale(&mut self, factor: T) -> &mut Self {
        let mut local = Matrix::identity();
        for i in 0..D {
            local[(i, i)] = factor;
        }
        self.pre_compose(local)
    }

    /// Scales each axis by the matching element of `factors`.
    pub fn scale_by(&mut self, factors: &Vector<T, D>) -> &mut Self {
        let mut local = Matrix::identity();
        for i in 0..D {
            local[(i, i)] = factors[i];
        }
        self.pre_compose(local)
    }

    /// Translates by `offset`.
    pub fn translate(&mut self, offset: &Vector<T, D>) -> &mut Self {
        let mut local = Matrix::identity();
        local.set_block(0, D, offset);
        self.pre_compose(local)
    }

    /// Applies `other` after everything already held: `self = other * self`.
    pub fn transform(&mut self, other: &Self) -> &mut Self {
        self.pre_compose(other.matrix)
    }
}

impl<T: Real> Transformation<T, 2, 3> {
    /// Rotates counter-clockwise by `radians`.
    pub fn rotate(&mut self, radians: T) -> &mut Self {
        let (s, c) = radians.sin_cos();
        let mut local = Matrix::identity();
        local[(0, 0)] = c;
        local[(0, 1)] = -s;
        local[(1, 0)] = s;
        local[(1, 1)] = c;
        self.pre_compose(local)
    }
}

impl<T: Scalar> Transformation<T, 2, 3> {
    /// Shears with `x' = x + sx * y` and `y' = sy * x + y`.
    pub fn shear(&mut self, sx: T, sy: T) -> &mut Self {
        let mut local = Matrix::identity();
        local[(0, 1)] = sx;
        local[(1, 0)] = sy;
        self.pre_compose(local)
    }
}

impl<T: Real> Transformation<T, 3, 4> {
    /// Rotates by `radians` about `axis` through the origin.
    ///
    /// `axis` must already be normalized. It is used as given, so a non-unit
    /// axis produces a skewed, scaled map rather than a rotation.
    pub fn rotate(&mut self, radians: T, axis: &Vector<T, 3>) -> &mut Self {
        // Rodrigues' rotation formula
        let (s, c) = radians.sin_cos();
        let t = T::one() - c;
        let (x, y, z) = (axis.x(), axis.y(), axis.z());
        let mut local = Matrix::identity();
        local[(0, 0)] = t * x * x + c;
        local[(0, 1)] = t * x * y - s * z;
        local[(0, 2)] = t * x * z + s * y;
        local[(1, 0)] = t * x * y + s * z;
        local[(1, 1)] = t * y * y + c;
        local[(1, 2)] = t * y * z - s * x;
        local[(2, 0)] = t * x * z - s * y;
        local[(2, 1)] = t * y * z + s * x;
        local[(2, 2)] = t * z * z + c;
        self.pre_compose(local)
    }
}

// =============================================================================
// Inversion, decomposition and application
// =============================================================================

impl<T: Real, const D: usize, const H: usize> Transformation<T, D, H> {
    /// The inverse transformation, or `None` if the linear part is singular.
    pub fn try_inversed(&self) -> Option<Self> {
        let linear = self.linear().try_inversed()?;
        let translation = -(linear * self.translation());
        let mut matrix = Matrix::identity();
        matrix.set_block(0, 0, &linear);
        matrix.set_block(0, D, &translation);
        Some(Self::wrap(matrix))
    }

    /// The inverse transformation.
    ///
    /// A singular transformation has no inverse; the result is then an
    /// unchanged copy of `self`. Use [`Transformation::try_inversed`] to
    /// detect that case.
    #[must_use]
    pub fn inversed(&self) -> Self {
        self.try_inversed().unwrap_or_else(|| {
            log::debug!("{D}D transformation is singular, leaving it unchanged");
            *self
        })
    }

    /// Inverts in place. See [`Transformation::inversed`].
    pub fn inverse(&mut self) -> &mut Self {
        *self = self.inversed();
        self
    }
}

impl<T: Scalar, const D: usize, const H: usize> Transformation<T, D, H> {
    /// The translation part.
    pub fn translation(&self) -> Vector<T, D> {
        self.matrix.block::<D, 1>(0, D)
    }

    /// The `D x D` linear part.
    pub fn linear(&self) -> Matrix<T, D, D> {
        self.matrix.block::<D, D>(0, 0)
    }

    /// Linear part and translation as one `D x H` matrix.
    pub fn affine(&self) -> Matrix<T, D, H> {
        self.matrix.block::<D, H>(0, 0)
    }

    /// The full homogeneous matrix.
    pub fn to_matrix(&self) -> Matrix<T, H, H> {
        self.matrix
    }

    /// Maps each column of `points` as a point.
    pub fn apply_to<const K: usize>(&self, points: &Matrix<T, D, K>) -> Matrix<T, D, K> {
        let mut out = self.linear() * *points;
        let translation = self.translation();
        for k in 0..K {
            for i in 0..D {
                out[(i, k)] += translation[i];
            }
        }
        out
    }

    /// Maps each column of `points`, given in homogeneous coordinates, and
    /// returns the first `D` coordinates of the results.
    pub fn apply_to_homogeneous<const K: usize>(&self, points: &Matrix<T, H, K>) -> Matrix<T, D, K> {
        (self.matrix * *points).block::<D, K>(0, 0)
    }

    /// Elementwise comparison of the homogeneous matrices with the default
    /// tolerance.
    pub fn is_approx(&self, other: &Self) -> bool {
        self.matrix.is_approx(&other.matrix)
    }

    /// Elementwise comparison of the homogeneous matrices with `tolerance`.
    pub fn is_approx_with(&self, other: &Self, tolerance: T) -> bool {
        self.matrix.is_approx_with(&other.matrix, tolerance)
    }
}

/// `self * rhs`: applying the product maps through `rhs` first.
impl<T: Scalar, const D: usize, const H: usize> Mul for Transformation<T, D, H> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::wrap(self.matrix * rhs.matrix)
    }
}

/// `self = self * rhs`.
impl<T: Scalar, const D: usize, const H: usize> MulAssign for Transformation<T, D, H> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar, const D: usize, const H: usize, const K: usize> Mul<Matrix<T, D, K>>
    for Transformation<T, D, H>
{
    type Output = Matrix<T, D, K>;

    fn mul(self, points: Matrix<T, D, K>) -> Matrix<T, D, K> {
        self.apply_to(&points)
    }
}

impl<T: Scalar, const D: usize, const H: usize> PartialEq for Transformation<T, D, H> {
    fn eq(&self, other: &Self) -> bool {
        self.matrix == other.matrix
    }
}

impl<T, const D: usize, const H: usize> approx::AbsDiffEq for Transformation<T, D, H>
where
    T: Scalar + approx::AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.matrix.abs_diff_eq(&other.matrix, epsilon)
    }
}

impl<T, const D: usize, const H: usize> approx::RelativeEq for Transformation<T, D, H>
where
    T: Scalar + approx::RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.matrix.relative_eq(&other.matrix, epsilon, max_relative)
    }
}

impl<T: Scalar, const D: usize, const H: usize> fmt::Display for Transformation<T, D, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matrix, f)
    }
}
