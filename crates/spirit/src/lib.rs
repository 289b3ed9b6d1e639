//! Math layer of the spirit engine.
//!
//! Re-exports [`spirit_math`] and [`spirit_transform`] under one name.

pub use spirit_math as math;
pub use spirit_transform as transform;

pub use spirit_math::{
    ColVector, Mat2, Mat3, Mat4, MathError, Matrix, Real, RowVector, Scalar, Vec2, Vec2i, Vec3, Vec3i,
    Vec4, Vec4i, Vector,
};
pub use spirit_transform::{
    degrees, radians, Transform2, Transform2D, Transform3, Transform3D, TransformError, Transformation,
};
