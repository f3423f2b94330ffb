//! Dithering options.

use crate::api::DitherError;

/// Largest accepted error diffusion strength.
pub const MAX_STRENGTH: f64 = 1.2;

/// Configuration for the error diffusion pass.
///
/// # Example
///
/// ```
/// use retro_dither::DitherOptions;
///
/// let options = DitherOptions::new().strength(0.5);
/// assert!(options.validate().is_ok());
///
/// assert!(DitherOptions::new().strength(2.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherOptions {
    /// Multiplier applied to the quantization error before diffusion.
    ///
    /// `0.0` disables diffusion (plain nearest-color mapping); values above
    /// `1.0` over-drive the error. Must lie in `[0, MAX_STRENGTH]`.
    ///
    /// Default: `1.0`
    pub strength: f64,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self { strength: 1.0 }
    }
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diffusion strength.
    #[inline]
    pub fn strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Reject non-finite or out-of-range strengths.
    pub fn validate(&self) -> Result<(), DitherError> {
        if !self.strength.is_finite() || !(0.0..=MAX_STRENGTH).contains(&self.strength) {
            return Err(DitherError::InvalidStrength(self.strength));
        }
        Ok(())
    }
}
