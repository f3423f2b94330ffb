//! Error types for block grid and reveal construction.

use std::fmt;
use std::time::Duration;

/// Errors raised by invalid reveal parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealError {
    /// Block size must be at least one pixel.
    InvalidBlockSize(usize),
    /// Reveal duration must be positive.
    InvalidDuration(Duration),
    /// The image to be revealed has a zero dimension.
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for RevealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevealError::InvalidBlockSize(size) => {
                write!(f, "block size must be positive, got {size}")
            }
            RevealError::InvalidDuration(duration) => {
                write!(f, "reveal duration must be positive, got {duration:?}")
            }
            RevealError::InvalidDimensions { width, height } => {
                write!(f, "cannot reveal an image of size {width}x{height}")
            }
        }
    }
}

impl std::error::Error for RevealError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            RevealError::InvalidBlockSize(0).to_string(),
            "block size must be positive, got 0"
        );
        assert_eq!(
            RevealError::InvalidDuration(Duration::ZERO).to_string(),
            "reveal duration must be positive, got 0ns"
        );
    }
}
