//! Element traits for [`Matrix`](crate::Matrix).
//!
//! [`Scalar`] covers every supported element type (signed and unsigned
//! integers, `f32`, `f64`). [`Real`] narrows it to the floating point types
//! needed by norms, inversion and the decomposition-based solvers.

use std::fmt::Display;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use num_traits::{One, Zero};

/// A numeric element stored in a [`Matrix`](crate::Matrix).
pub trait Scalar:
    nalgebra::Scalar
    + Copy
    + PartialOrd
    + Display
    + Zero
    + One
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + DivAssign
{
    /// Tolerance used by the approximate comparisons when none is given.
    ///
    /// `1e-5` for `f32`, `1e-12` for `f64` and `0` (exact) for integers.
    fn default_tolerance() -> Self;

    /// Draws a random value.
    ///
    /// Floating point values are uniform in `[-1, 1]`, integers are uniform
    /// over their whole representable range.
    fn random_with(rng: &mut fastrand::Rng) -> Self;

    /// Whether `self` and `other` agree within `tolerance`.
    ///
    /// Floats compare relative to the larger magnitude, with an absolute
    /// floor of `tolerance` near zero. Integers compare the absolute
    /// difference.
    fn approx_eq(self, other: Self, tolerance: Self) -> bool;

    /// Determinant of the `n x n` matrix stored column-major in `values`.
    ///
    /// Floats use an LU decomposition. Integers use fraction-free Bareiss
    /// elimination in `i128`, so the result is exact as long as it and the
    /// intermediate minors fit; a negative determinant of an unsigned matrix
    /// wraps.
    fn square_determinant(n: usize, values: &[Self]) -> Self;
}

/// A floating point [`Scalar`].
pub trait Real: Scalar + nalgebra::RealField {}

macro_rules! impl_integer_scalar {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                #[inline]
                fn default_tolerance() -> Self {
                    0
                }

                #[inline]
                fn random_with(rng: &mut fastrand::Rng) -> Self {
                    rng.$ty(..)
                }

                #[inline]
                fn approx_eq(self, other: Self, tolerance: Self) -> bool {
                    if tolerance <= 0 {
                        return self == other;
                    }
                    // abs_diff yields the unsigned counterpart, widen both sides
                    self.abs_diff(other) as u128 <= tolerance as u128
                }

                fn square_determinant(n: usize, values: &[Self]) -> Self {
                    let wide = values.iter().map(|&v| v as i128).collect();
                    bareiss_determinant(n, wide) as $ty
                }
            }
        )*
    };
}

impl_integer_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Bareiss elimination on a column-major `n x n` matrix. Every division is
/// exact, so integer arithmetic never rounds.
fn bareiss_determinant(n: usize, mut a: Vec<i128>) -> i128 {
    let at = |row: usize, col: usize| row + col * n;
    if n == 0 {
        return 1;
    }
    let mut sign = 1;
    let mut previous = 1;
    for k in 0..n - 1 {
        if a[at(k, k)] == 0 {
            let Some(pivot) = (k + 1..n).find(|&i| a[at(i, k)] != 0) else {
                return 0;
            };
            for col in 0..n {
                a.swap(at(k, col), at(pivot, col));
            }
            sign = -sign;
        }
        for i in k + 1..n {
            for j in k + 1..n {
                a[at(i, j)] = (a[at(i, j)] * a[at(k, k)] - a[at(i, k)] * a[at(k, j)]) / previous;
            }
        }
        previous = a[at(k, k)];
    }
    sign * a[at(n - 1, n - 1)]
}

macro_rules! impl_float_scalar {
    ($($ty:ident => $tolerance:expr),* $(,)?) => {
        $(
            impl Scalar for $ty {
                #[inline]
                fn default_tolerance() -> Self {
                    $tolerance
                }

                #[inline]
                fn random_with(rng: &mut fastrand::Rng) -> Self {
                    rng.$ty() * 2.0 - 1.0
                }

                #[inline]
                fn approx_eq(self, other: Self, tolerance: Self) -> bool {
                    if self == other {
                        return true;
                    }
                    let scale = self.abs().max(other.abs()).max(1.0);
                    (self - other).abs() <= tolerance * scale
                }

                fn square_determinant(n: usize, values: &[Self]) -> Self {
                    nalgebra::DMatrix::from_column_slice(n, n, values).determinant()
                }
            }

            impl Real for $ty {}
        )*
    };
}

impl_float_scalar!(f32 => 1e-5, f64 => 1e-12);
