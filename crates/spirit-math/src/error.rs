//! Error types for matrix construction.

use thiserror::Error;

/// Errors raised when runtime-shaped data is turned into a fixed-size matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// The input did not have exactly `rows * cols` elements.
    #[error("expected {expected} elements, found {found}")]
    LengthMismatch {
        /// Element count of the target matrix.
        expected: usize,
        /// Element count of the input.
        found: usize,
    },
}

/// Result type for fallible matrix conversions.
pub type Result<T> = std::result::Result<T, MathError>;
