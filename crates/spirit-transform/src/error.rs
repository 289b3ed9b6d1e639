//! Error types for transformation construction.

use thiserror::Error;

/// Errors raised by the checked transformation constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The bottom row of a homogeneous matrix was not `(0, ..., 0, 1)`.
    #[error("not an affine matrix: bottom row element {col} is {found}")]
    NotAffine {
        /// Column of the first offending element.
        col: usize,
        /// The offending value, formatted.
        found: String,
    },
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
