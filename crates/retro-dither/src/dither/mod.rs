//! Floyd-Steinberg error diffusion against a fixed palette.
//!
//! The pass is strictly sequential: pixels are visited in raster order and
//! every pixel reads the value left behind by the diffusion of all earlier
//! pixels. Rows cannot be processed independently.
//!
//! # Example
//!
//! ```
//! use retro_dither::{dither, DitherOptions, Palette, PixelBuffer, Rgb};
//!
//! let palette = Palette::new("1-bit", vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
//! let buffer = PixelBuffer::filled(4, 4, Rgb::new(128, 128, 128)).unwrap();
//!
//! let image = dither(buffer, &palette, &DitherOptions::new()).unwrap();
//! assert_eq!(image.indices().len(), 16);
//! ```

mod kernel;
mod options;

pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use options::{DitherOptions, MAX_STRENGTH};

use crate::api::DitherError;
use crate::buffer::PixelBuffer;
use crate::output::DitheredImage;
use crate::palette::Palette;

/// Quantize `buffer` to `palette` with Floyd-Steinberg error diffusion.
///
/// The buffer is consumed and used as scratch space. For each pixel in raster
/// order the current (error-adjusted) color is mapped to its nearest palette
/// entry, and `(current - chosen) * strength` is spread over the right,
/// bottom-left, bottom and bottom-right neighbors. Shares that would land
/// outside the image are dropped.
///
/// # Errors
///
/// [`DitherError::InvalidStrength`] if `options` fails validation. Buffer
/// dimensions and palette size are already guaranteed by their constructors.
pub fn dither(
    buffer: PixelBuffer,
    palette: &Palette,
    options: &DitherOptions,
) -> Result<DitheredImage, DitherError> {
    options.validate()?;
    Ok(dither_with_kernel(buffer, palette, options.strength, &FLOYD_STEINBERG))
}

/// Core diffusion loop, generic over the kernel.
pub(crate) fn dither_with_kernel(
    mut buffer: PixelBuffer,
    palette: &Palette,
    strength: f64,
    kernel: &Kernel,
) -> DitheredImage {
    debug_assert!(kernel.is_causal());

    let width = buffer.width();
    let height = buffer.height();
    let mut indices = Vec::with_capacity(width * height);

    for (x, y) in buffer.raster_positions() {
        let current = buffer.get(x, y);
        let idx = palette.nearest_index(current);
        let chosen = palette.color(idx);
        buffer.set(x, y, chosen);
        indices.push(idx as u8);

        if strength == 0.0 {
            continue;
        }

        let error = [
            (f64::from(current.r) - f64::from(chosen.r)) * strength,
            (f64::from(current.g) - f64::from(chosen.g)) * strength,
            (f64::from(current.b) - f64::from(chosen.b)) * strength,
        ];
        if error == [0.0; 3] {
            continue;
        }

        for &(dx, dy, weight) in kernel.entries {
            buffer.diffuse(
                x as isize + dx as isize,
                y as isize + dy as isize,
                error,
                weight,
                kernel.divisor,
            );
        }
    }

    DitheredImage::new(indices, width, height, palette.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn bw() -> Palette {
        Palette::new("bw", vec![Rgb::BLACK, Rgb::WHITE]).unwrap()
    }

    #[test]
    fn test_invalid_strength_rejected_before_scan() {
        let buffer = PixelBuffer::filled(2, 2, Rgb::BLACK).unwrap();
        let result = dither(buffer, &bw(), &DitherOptions::new().strength(5.0));
        assert!(matches!(result, Err(DitherError::InvalidStrength(s)) if s == 5.0));
    }

    #[test]
    fn test_exact_palette_colors_untouched() {
        let pixels = vec![Rgb::BLACK, Rgb::WHITE, Rgb::WHITE, Rgb::BLACK];
        let buffer = PixelBuffer::new(2, 2, pixels).unwrap();
        let image = dither(buffer, &bw(), &DitherOptions::new()).unwrap();
        assert_eq!(image.indices(), &[0, 1, 1, 0]);
    }

    #[test]
    fn test_grey_row_alternates() {
        // 128 is one step closer to white. Its -127 error drags the next
        // pixel down to 72 (black), whose +72 lifts the third to 160.
        let buffer = PixelBuffer::filled(4, 1, Rgb::new(128, 128, 128)).unwrap();
        let image = dither(buffer, &bw(), &DitherOptions::new()).unwrap();
        assert_eq!(image.indices(), &[1, 0, 1, 0]);
    }

    #[test]
    fn test_error_reaches_next_row() {
        // Single column: all error of (0,0) that is not dropped goes below.
        let pixels = vec![Rgb::new(100, 100, 100), Rgb::new(100, 100, 100)];
        let buffer = PixelBuffer::new(1, 2, pixels).unwrap();
        let image = dither(buffer, &bw(), &DitherOptions::new()).unwrap();
        // (0,0) -> black, below receives 100 * 5/16 = 31.25 -> 131 -> white.
        assert_eq!(image.indices(), &[0, 1]);
    }

    #[test]
    fn test_zero_strength_is_plain_nearest() {
        let pixels = vec![Rgb::new(100, 100, 100); 4];
        let buffer = PixelBuffer::new(2, 2, pixels).unwrap();
        let image = dither(buffer, &bw(), &DitherOptions::new().strength(0.0)).unwrap();
        assert_eq!(image.indices(), &[0, 0, 0, 0]);
    }
}
