//! Arithmetic operators.
//!
//! `+`/`-` need identical shapes, `*` needs the left column count to match the
//! right row count. All of this is checked by the type system.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::Matrix;
use crate::scalar::Scalar;

impl<T: Scalar, const R: usize, const C: usize> Add for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_inner(self.inner + rhs.inner)
    }
}

impl<T: Scalar, const R: usize, const C: usize> AddAssign for Matrix<T, R, C> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const R: usize, const C: usize> Sub for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_inner(self.inner - rhs.inner)
    }
}

impl<T: Scalar, const R: usize, const C: usize> SubAssign for Matrix<T, R, C> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T, const R: usize, const C: usize> Neg for Matrix<T, R, C>
where
    T: Scalar + Neg<Output = T>,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_inner(-self.inner)
    }
}

/// Matrix product: `R x C` times `C x K` gives `R x K`.
impl<T: Scalar, const R: usize, const C: usize, const K: usize> Mul<Matrix<T, C, K>>
    for Matrix<T, R, C>
{
    type Output = Matrix<T, R, K>;

    #[inline]
    fn mul(self, rhs: Matrix<T, C, K>) -> Matrix<T, R, K> {
        Matrix::from_inner(self.inner * rhs.inner)
    }
}

/// `self = self * rhs`; the right operand must be square so the shape is kept.
impl<T: Scalar, const R: usize, const C: usize> MulAssign<Matrix<T, C, C>> for Matrix<T, R, C> {
    #[inline]
    fn mul_assign(&mut self, rhs: Matrix<T, C, C>) {
        let product = *self * rhs;
        *self = product;
    }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: T) -> Self {
        Self::from_inner(self.inner.map(|v| v * scalar))
    }
}

impl<T: Scalar, const R: usize, const C: usize> MulAssign<T> for Matrix<T, R, C> {
    #[inline]
    fn mul_assign(&mut self, scalar: T) {
        *self = *self * scalar;
    }
}

impl<T: Scalar, const R: usize, const C: usize> Div<T> for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn div(self, scalar: T) -> Self {
        Self::from_inner(self.inner.map(|v| v / scalar))
    }
}

impl<T: Scalar, const R: usize, const C: usize> DivAssign<T> for Matrix<T, R, C> {
    #[inline]
    fn div_assign(&mut self, scalar: T) {
        *self = *self / scalar;
    }
}

// Left scalar multiplication has to be spelled out per concrete type.
macro_rules! impl_left_scalar_mul {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<const R: usize, const C: usize> Mul<Matrix<$ty, R, C>> for $ty {
                type Output = Matrix<$ty, R, C>;

                #[inline]
                fn mul(self, rhs: Matrix<$ty, R, C>) -> Matrix<$ty, R, C> {
                    rhs * self
                }
            }
        )*
    };
}

impl_left_scalar_mul!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(test)]
mod tests {
    use crate::{Mat2, Mat3, Matrix, RowVector, Vec2, Vec3};

    #[test]
    fn test_add_sub_round_trip_exact() {
        let mut rng = fastrand::Rng::with_seed(5);
        let a = Matrix::<i32, 3, 2>::from_fn(|_, _| rng.i32(-1000..1000));
        let b = Matrix::<i32, 3, 2>::from_fn(|_, _| rng.i32(-1000..1000));
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn test_add_sub_round_trip_approx() {
        let mut rng = fastrand::Rng::with_seed(6);
        let a = Mat3::random_with(&mut rng);
        let b = Mat3::random_with(&mut rng);
        assert!(((a + b) - b).is_approx(&a));
    }

    #[test]
    fn test_compound_add_sub() {
        let mut a = Vec2::new(1.0, 2.0);
        a += Vec2::new(0.5, 0.5);
        assert_eq!(a, Vec2::new(1.5, 2.5));
        a -= Vec2::new(1.5, 2.5);
        assert_eq!(a, Vec2::zeros());
        assert_eq!(-Vec2::new(1.0, -2.0), Vec2::new(-1.0, 2.0));
    }

    #[test]
    fn test_row_times_col() {
        let row = RowVector::<f32, 2>::from_coefficients([1.0, 2.0]);
        let col = Vec2::new(2.0, 1.0);
        let dot = (row * col)[0];
        assert_eq!(dot, 4.0);
        assert_eq!(dot, col.dot(&row));

        let ones = Vec2::new(1.0, 1.0);
        let twos_row = 2.0f32 * ones.transposed();
        let twos: Mat2 = ones * twos_row;
        assert_eq!(twos, Mat2::from_rows([[2.0, 2.0], [2.0, 2.0]]));
    }

    #[test]
    fn test_product_shapes() {
        let a = Matrix::<i32, 2, 3>::from_rows([[1, 2, 3], [4, 5, 6]]);
        let b = Matrix::<i32, 3, 2>::from_rows([[7, 8], [9, 10], [11, 12]]);
        let c: Matrix<i32, 2, 2> = a * b;
        assert_eq!(c, Matrix::from_rows([[58, 64], [139, 154]]));
    }

    #[test]
    fn test_identity_is_neutral() {
        let mut rng = fastrand::Rng::with_seed(9);
        let a = Mat3::random_with(&mut rng);
        assert_eq!(Mat3::identity() * a, a);
        assert_eq!(a * Mat3::identity(), a);

        let r = Matrix::<f64, 2, 3>::random_with(&mut rng);
        assert_eq!(Matrix::<f64, 2, 2>::identity() * r, r);
        assert_eq!(r * Matrix::<f64, 3, 3>::identity(), r);
    }

    #[test]
    fn test_mul_assign_with_self_copy() {
        let mut a = Matrix::<i32, 2, 2>::from_rows([[1, 1], [0, 1]]);
        let snapshot = a;
        a *= snapshot;
        assert_eq!(a, Matrix::from_rows([[1, 2], [0, 1]]));

        let mut r = Matrix::<i32, 3, 2>::from_rows([[1, 0], [0, 1], [1, 1]]);
        r *= Matrix::from_rows([[2, 0], [0, 3]]);
        assert_eq!(r, Matrix::from_rows([[2, 0], [0, 3], [2, 3]]));
    }

    #[test]
    fn test_scalar_ops() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v * 2.0, 2.0f32 * v);
        assert_eq!(v * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(v / 2.0, Vec3::new(0.5, 1.0, 1.5));

        let mut m = Matrix::<u8, 2, 2>::from_rows([[2, 4], [6, 8]]);
        m /= 2;
        assert_eq!(m, Matrix::from_rows([[1, 2], [3, 4]]));
        m *= 3;
        assert_eq!(m, Matrix::from_rows([[3, 6], [9, 12]]));
    }
}
