//! RetroDitherer builder -- the ergonomic entry point for the crate.

use crate::buffer::PixelBuffer;
use crate::dither::{dither, DitherOptions};
use crate::output::DitheredImage;
use crate::palette::Palette;

use super::DitherError;

/// Reusable dithering configuration bound to one palette.
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`dither()`](Self::dither) takes `&self`, so one ditherer can process
///   many images
///
/// # Example
///
/// ```
/// use retro_dither::{PaletteCatalog, PixelBuffer, RetroDitherer, Rgb};
///
/// let catalog = PaletteCatalog::builtin();
/// let ditherer = RetroDitherer::new(catalog.get("c64").unwrap().clone())
///     .strength(0.8);
///
/// let buffer = PixelBuffer::filled(4, 3, Rgb::new(90, 140, 200)).unwrap();
/// let result = ditherer.dither(buffer).unwrap();
///
/// assert_eq!(result.width(), 4);
/// assert_eq!(result.height(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RetroDitherer {
    palette: Palette,
    options: DitherOptions,
}

impl RetroDitherer {
    /// Create a ditherer with default strength 1.0.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            options: DitherOptions::default(),
        }
    }

    /// Set error diffusion strength, `0.0..=1.2`. Checked when dithering.
    pub fn strength(mut self, strength: f64) -> Self {
        self.options.strength = strength;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn options(&self) -> &DitherOptions {
        &self.options
    }

    /// Quantize `buffer` to the configured palette.
    pub fn dither(&self, buffer: PixelBuffer) -> Result<DitheredImage, DitherError> {
        dither(buffer, &self.palette, &self.options)
    }
}
