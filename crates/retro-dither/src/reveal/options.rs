//! Reveal timing and granularity options.

use std::time::Duration;

use super::error::RevealError;

/// How a reveal is cut up and how long it takes.
///
/// Defaults to 8 px blocks over 6 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealOptions {
    /// Edge length of a block in image pixels.
    pub block_size: usize,
    /// Time from the first tick until every block is visible.
    pub duration: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            block_size: 8,
            duration: Duration::from_millis(6000),
        }
    }
}

impl RevealOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    #[inline]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn validate(&self) -> Result<(), RevealError> {
        if self.block_size == 0 {
            return Err(RevealError::InvalidBlockSize(self.block_size));
        }
        if self.duration.is_zero() {
            return Err(RevealError::InvalidDuration(self.duration));
        }
        Ok(())
    }
}
