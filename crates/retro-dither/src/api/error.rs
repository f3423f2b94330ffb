//! Unified error type for the retro-dither public API.

use crate::buffer::BufferError;
use crate::palette::{PaletteError, ParseColorError};
use crate::reveal::RevealError;
use std::fmt;

/// Unified error type for the retro-dither public API.
///
/// Wraps all error types from the crate into a single enum for
/// convenient `?` propagation in application code.
///
/// # Example
///
/// ```
/// use retro_dither::{DitherError, Palette};
///
/// fn create_palette() -> Result<Palette, DitherError> {
///     let palette = Palette::from_hex("mono", &["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// # create_palette().unwrap();
/// ```
#[derive(Debug)]
pub enum DitherError {
    /// Palette validation error (empty, too large, duplicate key or parse error)
    Palette(PaletteError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
    /// Pixel buffer shape error
    Buffer(BufferError),
    /// Block size or duration error
    Reveal(RevealError),
    /// Strength outside `[0, MAX_STRENGTH]` or not finite
    InvalidStrength(f64),
}

impl fmt::Display for DitherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherError::Palette(err) => write!(f, "palette error: {}", err),
            DitherError::ParseColor(err) => write!(f, "color parse error: {}", err),
            DitherError::Buffer(err) => write!(f, "buffer error: {}", err),
            DitherError::Reveal(err) => write!(f, "reveal error: {}", err),
            DitherError::InvalidStrength(s) => write!(
                f,
                "dithering strength {} is outside 0..={}",
                s,
                crate::dither::MAX_STRENGTH
            ),
        }
    }
}

impl std::error::Error for DitherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DitherError::Palette(err) => Some(err),
            DitherError::ParseColor(err) => Some(err),
            DitherError::Buffer(err) => Some(err),
            DitherError::Reveal(err) => Some(err),
            DitherError::InvalidStrength(_) => None,
        }
    }
}

impl From<PaletteError> for DitherError {
    fn from(err: PaletteError) -> Self {
        DitherError::Palette(err)
    }
}

impl From<ParseColorError> for DitherError {
    fn from(err: ParseColorError) -> Self {
        DitherError::ParseColor(err)
    }
}

impl From<BufferError> for DitherError {
    fn from(err: BufferError) -> Self {
        DitherError::Buffer(err)
    }
}

impl From<RevealError> for DitherError {
    fn from(err: RevealError) -> Self {
        DitherError::Reveal(err)
    }
}
