//! DitheredImage struct with packed-byte and block-copy views.

use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::palette::Palette;
use crate::reveal::BlockRect;

/// The quantized result of a dithering pass.
///
/// Stores one `u8` palette index per pixel in row-major order, the image
/// dimensions and the palette used. Every pixel is therefore a palette
/// member by construction.
///
/// # Example
///
/// ```
/// use retro_dither::{DitheredImage, Palette, Rgb};
///
/// let palette = Palette::new("bw", vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
/// let image = DitheredImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.pixel(1, 0), Rgb::WHITE);
/// assert_eq!(image.to_rgb_bytes().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitheredImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl DitheredImage {
    /// Create a new `DitheredImage` from palette indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height` and that every
    /// index is inside the palette.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        debug_assert!(indices.iter().all(|&i| usize::from(i) < palette.len()));
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Palette indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.palette
            .color(usize::from(self.indices[y * self.width + x]))
    }

    /// Expand to a full-color [`PixelBuffer`].
    pub fn to_buffer(&self) -> PixelBuffer {
        let pixels = self.colors().collect();
        // Dimensions were validated when the source buffer was built.
        match PixelBuffer::new(self.width, self.height, pixels) {
            Ok(buffer) => buffer,
            Err(err) => unreachable!("dithered image has invalid shape: {err}"),
        }
    }

    /// Packed `[R, G, B, ...]` bytes, length `width * height * 3`.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for color in self.colors() {
            rgb.extend_from_slice(&color.to_bytes());
        }
        rgb
    }

    /// Packed `[R, G, B, 255, ...]` bytes, length `width * height * 4`.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.indices.len() * 4);
        for color in self.colors() {
            rgba.extend_from_slice(&color.to_bytes());
            rgba.push(255);
        }
        rgba
    }

    /// Copy the pixels under `rect` into an RGBA destination of row width
    /// `dst_width` pixels, at the same coordinates.
    ///
    /// The rectangle is clipped to both this image and the destination, so
    /// callers can blit onto a frame that is larger or smaller than the
    /// image. Returns the number of pixels written.
    pub fn copy_rect_rgba(&self, rect: BlockRect, dst: &mut [u8], dst_width: usize) -> usize {
        if dst_width == 0 {
            return 0;
        }
        let dst_height = dst.len() / (dst_width * 4);
        let x_end = (rect.x + rect.width).min(self.width).min(dst_width);
        let y_end = (rect.y + rect.height).min(self.height).min(dst_height);

        let mut written = 0;
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                let color = self.pixel(x, y);
                let offset = (y * dst_width + x) * 4;
                dst[offset..offset + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
                written += 1;
            }
        }
        written
    }

    fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.indices
            .iter()
            .map(|&i| self.palette.color(usize::from(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> DitheredImage {
        let palette = Palette::new("bw", vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        DitheredImage::new(vec![0, 1, 1, 0, 1, 1], 3, 2, palette)
    }

    #[test]
    fn test_rgb_and_rgba_layout() {
        let image = checker();
        let rgb = image.to_rgb_bytes();
        assert_eq!(rgb.len(), 18);
        assert_eq!(&rgb[..6], &[0, 0, 0, 255, 255, 255]);

        let rgba = image.to_rgba_bytes();
        assert_eq!(rgba.len(), 24);
        assert_eq!(&rgba[..8], &[0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn test_to_buffer_matches_pixels() {
        let image = checker();
        let buffer = image.to_buffer();
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.get(2, 1), Rgb::WHITE);
        assert_eq!(buffer.get(0, 0), Rgb::BLACK);
    }

    #[test]
    fn test_copy_rect_only_touches_rect() {
        let image = checker();
        let mut dst = vec![7u8; 3 * 2 * 4];
        let rect = BlockRect {
            x: 1,
            y: 0,
            width: 2,
            height: 1,
        };
        assert_eq!(image.copy_rect_rgba(rect, &mut dst, 3), 2);
        assert_eq!(&dst[0..4], &[7, 7, 7, 7]);
        assert_eq!(&dst[4..8], &[255, 255, 255, 255]);
        assert_eq!(&dst[8..12], &[255, 255, 255, 255]);
        assert!(dst[12..].iter().all(|&b| b == 7));
    }

    #[test]
    fn test_copy_rect_clips_to_destination() {
        let image = checker();
        let mut dst = vec![0u8; 8];
        let rect = BlockRect {
            x: 0,
            y: 0,
            width: 8,
            height: 8,
        };
        assert_eq!(image.copy_rect_rgba(rect, &mut dst, 2), 2);
    }
}
