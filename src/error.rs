//! Error types for pixel-buffer transformations

use thiserror::Error;

/// Result type for rasterkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by buffer construction and transformations.
///
/// Every operation is deterministic, so a failure reproduces identically on
/// retry. Callers should repair the input instead of resubmitting it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Zero-sized target or a byte length that disagrees with the dimensions.
    #[error("Invalid dimensions: {width}x{height} with {len} bytes")]
    InvalidDimensions { width: usize, height: usize, len: usize },

    /// Tone curve whose enter input is not strictly below its exit input.
    #[error("Invalid curve: enter input {enter} must be below exit input {exit}")]
    InvalidCurve { enter: u8, exit: u8 },

    #[error("Kernel divisor evaluates to zero")]
    DivisorZero,

    #[error("Unknown kernel preset: {0}")]
    UnknownKernel(String),
}

impl Error {
    pub(crate) fn dimensions(width: usize, height: usize) -> Self {
        Error::InvalidDimensions {
            width,
            height,
            len: width.saturating_mul(height).saturating_mul(4),
        }
    }
}
