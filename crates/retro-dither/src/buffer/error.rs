//! Error types for pixel buffer construction.

use std::fmt;

/// Errors raised when building a [`PixelBuffer`](super::PixelBuffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Width or height is zero.
    InvalidDimensions { width: usize, height: usize },
    /// The pixel data does not cover exactly `width * height` pixels.
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InvalidDimensions { width, height } => {
                write!(f, "invalid buffer dimensions {width}x{height}")
            }
            BufferError::LengthMismatch { expected, actual } => {
                write!(f, "pixel data has length {actual}, expected {expected}")
            }
        }
    }
}

impl std::error::Error for BufferError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = BufferError::InvalidDimensions {
            width: 0,
            height: 4,
        };
        assert_eq!(err.to_string(), "invalid buffer dimensions 0x4");

        let err = BufferError::LengthMismatch {
            expected: 12,
            actual: 10,
        };
        assert_eq!(err.to_string(), "pixel data has length 10, expected 12");
    }
}
