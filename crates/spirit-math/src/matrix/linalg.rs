//! Determinant, inversion, products and norms.

use super::Matrix;
use crate::scalar::{Real, Scalar};

// =============================================================================
// Vector products
// =============================================================================

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Dot product with another vector of the same length.
    ///
    /// Row and column vectors can be mixed.
    pub fn dot<const R2: usize, const C2: usize>(&self, other: &Matrix<T, R2, C2>) -> T {
        const {
            assert!(R == 1 || C == 1, "must be a vector type");
            assert!(R2 == 1 || C2 == 1, "must be a vector type");
            assert!(R * C == R2 * C2, "vectors must have the same length");
        };
        self.iter()
            .zip(other.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// 2D cross product `x1 * y2 - y1 * x2`.
    pub fn cross2<const R2: usize, const C2: usize>(&self, other: &Matrix<T, R2, C2>) -> T {
        const {
            assert!((R == 1 || C == 1) && R * C == 2, "must be a 2D vector");
            assert!((R2 == 1 || C2 == 1) && R2 * C2 == 2, "must be a 2D vector");
        };
        let (a, b) = (self.as_slice(), other.as_slice());
        a[0] * b[1] - a[1] * b[0]
    }

    /// 3D cross product.
    pub fn cross3<const R2: usize, const C2: usize>(&self, other: &Matrix<T, R2, C2>) -> Self {
        const {
            assert!((R == 1 || C == 1) && R * C == 3, "must be a 3D vector");
            assert!((R2 == 1 || C2 == 1) && R2 * C2 == 3, "must be a 3D vector");
        };
        let mut out = *self;
        cross_into(self.as_slice(), other.as_slice(), out.inner.as_mut_slice());
        out
    }

    /// Cross product of two 4-vectors taken as if they were 3D.
    ///
    /// The fourth coordinate of both inputs is ignored and is zero in the
    /// result.
    pub fn cross3_homogeneous<const R2: usize, const C2: usize>(
        &self,
        other: &Matrix<T, R2, C2>,
    ) -> Self {
        const {
            assert!((R == 1 || C == 1) && R * C == 4, "must be a 4D vector");
            assert!((R2 == 1 || C2 == 1) && R2 * C2 == 4, "must be a 4D vector");
        };
        let mut out = Self::zeros();
        cross_into(self.as_slice(), other.as_slice(), out.inner.as_mut_slice());
        out
    }

    /// Sum of the squared coordinates of a vector.
    pub fn squared_norm(&self) -> T {
        const { assert!(R == 1 || C == 1, "must be a vector type") };
        self.dot(self)
    }
}

fn cross_into<T: Scalar>(a: &[T], b: &[T], out: &mut [T]) {
    out[0] = a[1] * b[2] - a[2] * b[1];
    out[1] = a[2] * b[0] - a[0] * b[2];
    out[2] = a[0] * b[1] - a[1] * b[0];
}

// =============================================================================
// Norms
// =============================================================================

impl<T: Real, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Euclidean norm of a vector.
    pub fn norm(&self) -> T {
        const { assert!(R == 1 || C == 1, "must be a vector type") };
        self.inner.norm()
    }

    /// Scales the vector to unit length. A zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm != T::zero() {
            *self = *self / norm;
        }
    }

    /// Unit-length copy of the vector, or an unchanged copy if its norm is zero.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut out = *self;
        out.normalize();
        out
    }
}

// =============================================================================
// Determinant and inversion
// =============================================================================

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Determinant of a square matrix.
    ///
    /// Exact for integer elements, see [`Scalar::square_determinant`].
    pub fn determinant(&self) -> T {
        T::square_determinant(N, self.as_slice())
    }
}

impl<T: Real, const N: usize> Matrix<T, N, N> {
    /// Inverts the matrix in place and reports whether it succeeded.
    ///
    /// The contents after a failed inversion are unspecified: do not rely on
    /// the original values surviving.
    pub fn inverse(&mut self) -> bool {
        match self.try_inversed() {
            Some(inv) => {
                *self = inv;
                true
            }
            None => false,
        }
    }

    /// The inverse together with a success flag. `self` is not modified.
    ///
    /// When the flag is `false` the returned matrix holds no meaningful value
    /// (it is currently all zeros).
    #[must_use]
    pub fn inversed(&self) -> (Self, bool) {
        match self.try_inversed() {
            Some(inv) => (inv, true),
            None => (Self::zeros(), false),
        }
    }

    /// The inverse, or `None` if the matrix is singular.
    pub fn try_inversed(&self) -> Option<Self> {
        let inv = self.inner.try_inverse().map(Self::from_inner);
        if inv.is_none() {
            log::trace!("{N}x{N} matrix is not invertible");
        }
        inv
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{Mat2, Mat3, Mat4, Matrix, RowVector, Vec2, Vec2i, Vec3, Vec4};

    #[test]
    fn test_dot_symmetry() {
        let mut rng = fastrand::Rng::with_seed(21);
        for _ in 0..20 {
            let a = Vec4::random_with(&mut rng);
            let b = Vec4::random_with(&mut rng);
            assert_eq!(a.dot(&b), b.dot(&a));
        }
        let r = RowVector::<i32, 3>::from_coefficients([1, 2, 3]);
        let c = Matrix::<i32, 3, 1>::new(4, 5, 6);
        assert_eq!(r.dot(&c), 32);
        assert_eq!(c.dot(&r), 32);
    }

    #[test]
    fn test_cross2() {
        assert_eq!(Vec2::new(1.0, 0.0).cross2(&Vec2::new(0.0, 1.0)), 1.0);
        assert_eq!(Vec2::new(0.0, 1.0).cross2(&Vec2::new(1.0, 0.0)), -1.0);
        assert_eq!(Vec2i::new(2, 3).cross2(&Vec2i::new(4, 5)), -2);
    }

    #[test]
    fn test_cross3() {
        let z = Vec3::new(1.0, 0.0, 0.0).cross3(&Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(z, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(Vec3::unit_y().cross3(&Vec3::unit_z()), Vec3::unit_x());
        assert_eq!(Vec3::unit_z().cross3(&Vec3::unit_x()), Vec3::unit_y());

        let row = RowVector::<f32, 3>::from_coefficients([0.0, 1.0, 0.0]);
        let out = row.cross3(&Vec3::unit_x());
        assert_eq!(out, RowVector::<f32, 3>::from_coefficients([0.0, 0.0, -1.0]));
    }

    #[test]
    fn test_cross3_homogeneous_ignores_w() {
        let a = Vec4::new(1.0, 0.0, 0.0, 5.0);
        let b = Vec4::new(0.0, 1.0, 0.0, -3.0);
        assert_eq!(a.cross3_homogeneous(&b), Vec4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_norms() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(v.squared_norm(), 25.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(Vec2i::new(3, 4).squared_norm(), 25);
    }

    #[test]
    fn test_normalized_has_unit_norm() {
        let mut rng = fastrand::Rng::with_seed(13);
        for _ in 0..20 {
            let v = Matrix::<f64, 5, 1>::random_with(&mut rng);
            assert_relative_eq!(v.normalized().norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalize_zero_vector_is_noop() {
        let zero = Vec3::zeros();
        assert_eq!(zero.normalized(), zero);
        let mut v = zero;
        v.normalize();
        assert_eq!(v, zero);
    }

    #[test]
    fn test_determinant() {
        let m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_relative_eq!(m.determinant(), -2.0, epsilon = 1e-6);
        assert_eq!(Mat4::identity().determinant(), 1.0);
        assert_eq!(Mat3::zeros().determinant(), 0.0);
    }

    #[test]
    fn test_integer_determinant() {
        assert_eq!(Matrix::<i32, 1, 1>::from_fn(|_, _| -7).determinant(), -7);
        assert_eq!(Matrix::<i32, 2, 2>::from_rows([[1, 2], [3, 4]]).determinant(), -2);
        let m = Matrix::<i64, 3, 3>::from_rows([[2, 0, 1], [1, 3, 2], [1, 1, 2]]);
        assert_eq!(m.determinant(), 6);
        let singular = Matrix::<i32, 3, 3>::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(singular.determinant(), 0);
        assert_eq!(Matrix::<u32, 2, 2>::from_rows([[5, 1], [2, 3]]).determinant(), 13);
        assert_eq!(Matrix::<i32, 4, 4>::identity().determinant(), 1);
    }

    #[test]
    fn test_inversed_round_trip() {
        let mut rng = fastrand::Rng::with_seed(17);
        for _ in 0..10 {
            let a = Matrix::<f64, 4, 4>::random_with(&mut rng) + Matrix::identity() * 4.0;
            let (b, ok) = a.inversed();
            assert!(ok);
            assert!((a * b).is_approx_with(&Matrix::identity(), 1e-10));
        }
    }

    #[test]
    fn test_inverse_in_place() {
        let mut m = Mat2::from_rows([[4.0, 7.0], [2.0, 6.0]]);
        let original = m;
        assert!(m.inverse());
        assert!((original * m).is_approx(&Mat2::identity()));
        assert!(m.inverse());
        assert!(m.is_approx(&original));
    }

    #[test]
    fn test_singular_inverse_reports_failure() {
        let singular = Mat2::from_rows([[1.0, 2.0], [2.0, 4.0]]);
        let (_, ok) = singular.inversed();
        assert!(!ok);
        assert!(singular.try_inversed().is_none());

        let mut m = singular;
        assert!(!m.inverse());
    }
}
