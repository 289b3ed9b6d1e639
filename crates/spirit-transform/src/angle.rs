//! Degree/radian conversion.

use spirit_math::Real;

/// Converts an angle in degrees to radians.
pub fn radians<T: Real>(degrees: T) -> T {
    degrees * T::pi() / nalgebra::convert::<f64, T>(180.0)
}

/// Converts an angle in radians to degrees.
pub fn degrees<T: Real>(radians: T) -> T {
    radians * nalgebra::convert::<f64, T>(180.0) / T::pi()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_conversions() {
        assert_relative_eq!(radians(180.0f64), PI);
        assert_relative_eq!(radians(90.0f32), std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(degrees(PI / 4.0), 45.0, epsilon = 1e-12);
        assert_relative_eq!(degrees(radians(33.0f64)), 33.0, epsilon = 1e-12);
    }
}
