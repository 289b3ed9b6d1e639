#![warn(missing_docs)]

//! Affine transformations for the spirit engine.
//!
//! [`Transformation`] wraps a homogeneous matrix from `spirit-math` and
//! offers chainable scale, translate, rotate and shear operations, inversion
//! and decomposition back into linear and translation parts.
//!
//! ```
//! use spirit_math::Vec3;
//! use spirit_transform::{radians, Transform3D};
//!
//! let mut t = Transform3D::identity();
//! t.rotate(radians(90.0), &Vec3::unit_z()).translate(&Vec3::new(0.0, 0.0, 2.0));
//!
//! let p = t * Vec3::unit_x();
//! assert!(p.is_approx(&Vec3::new(0.0, 1.0, 2.0)));
//! assert!((t.inversed() * p).is_approx(&Vec3::unit_x()));
//! ```

mod angle;
pub mod error;
mod transform;

pub use angle::{degrees, radians};
pub use error::{Result, TransformError};
pub use transform::{Transform2, Transform2D, Transform3, Transform3D, Transformation};
