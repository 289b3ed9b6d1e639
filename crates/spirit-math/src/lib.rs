#![warn(missing_docs)]

//! Fixed-size matrix and vector types for the spirit engine.
//!
//! A thin, dimension-checked layer over nalgebra. Shapes are const generics,
//! every result is a concrete value (no lazy expressions), and degenerate
//! inputs follow one of three policies:
//!
//! - shape misuse is rejected at compile time;
//! - ill-posed solves and zero-norm normalization quietly return a
//!   best-effort value;
//! - inversion reports success through its return value.
//!
//! # Example
//!
//! ```
//! use spirit_math::{Mat2, Vec2};
//!
//! let a = Mat2::from_rows([[2.0, 1.0], [1.0, 3.0]]);
//! let b = Vec2::new(3.0, 5.0);
//! let x = a.solve(&b);
//! assert!(a.is_good_solution(&x, &b));
//! ```

pub mod error;
pub mod matrix;
pub mod scalar;

pub use error::{MathError, Result};
pub use matrix::Matrix;
pub use scalar::{Real, Scalar};

/// A column vector of `N` elements.
pub type ColVector<T, const N: usize> = Matrix<T, N, 1>;

/// A row vector of `N` elements.
pub type RowVector<T, const N: usize> = Matrix<T, 1, N>;

/// Vectors are column vectors.
pub type Vector<T, const N: usize> = ColVector<T, N>;

/// 2D `f32` vector.
pub type Vec2 = Vector<f32, 2>;
/// 3D `f32` vector.
pub type Vec3 = Vector<f32, 3>;
/// 4D `f32` vector.
pub type Vec4 = Vector<f32, 4>;

/// 2D `i32` vector.
pub type Vec2i = Vector<i32, 2>;
/// 3D `i32` vector.
pub type Vec3i = Vector<i32, 3>;
/// 4D `i32` vector.
pub type Vec4i = Vector<i32, 4>;

/// 2x2 `f32` matrix.
pub type Mat2 = Matrix<f32, 2, 2>;
/// 3x3 `f32` matrix.
pub type Mat3 = Matrix<f32, 3, 3>;
/// 4x4 `f32` matrix.
pub type Mat4 = Matrix<f32, 4, 4>;
