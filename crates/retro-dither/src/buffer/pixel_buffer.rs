use super::error::BufferError;
use crate::color::Rgb;

/// A row-major grid of RGB pixels with non-zero dimensions.
///
/// # Example
///
/// ```
/// use retro_dither::{PixelBuffer, Rgb};
///
/// let mut buffer = PixelBuffer::filled(3, 2, Rgb::BLACK).unwrap();
/// buffer.set(2, 1, Rgb::WHITE);
///
/// assert_eq!(buffer.get(2, 1), Rgb::WHITE);
/// assert_eq!(buffer.pixels().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Wrap existing row-major pixels.
    ///
    /// # Errors
    ///
    /// - [`BufferError::InvalidDimensions`] if either dimension is zero
    /// - [`BufferError::LengthMismatch`] if `pixels.len() != width * height`
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, BufferError> {
        check_dimensions(width, height)?;
        let expected = width * height;
        if pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A buffer where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, BufferError> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![color; width * height],
        })
    }

    /// Build from packed `[R, G, B, R, G, B, ...]` bytes.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, BufferError> {
        Self::from_packed(width, height, bytes, 3)
    }

    /// Build from packed `[R, G, B, A, ...]` bytes. Alpha is ignored.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, BufferError> {
        Self::from_packed(width, height, bytes, 4)
    }

    fn from_packed(
        width: usize,
        height: usize,
        bytes: &[u8],
        stride: usize,
    ) -> Result<Self, BufferError> {
        check_dimensions(width, height)?;
        let expected = width * height * stride;
        if bytes.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(stride)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Consume the buffer, returning its pixels.
    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.pixels[y * self.width + x] = color;
    }

    /// Iterate every coordinate in raster order: row 0 left to right, then
    /// row 1, and so on.
    ///
    /// Error diffusion depends on this order. Kernels only ever write to
    /// positions that come later in this sequence.
    pub fn raster_positions(&self) -> RasterPositions {
        RasterPositions {
            width: self.width,
            height: self.height,
            next: 0,
        }
    }

    /// Add a weighted share of `error` to the pixel at `(x, y)`.
    ///
    /// Each channel becomes `stored + (error * weight) / divisor` in double
    /// precision, rounded to the nearest integer (ties to even) and clamped
    /// to `[0, 255]`. Targets outside the buffer are ignored; the error is
    /// lost.
    ///
    /// Returns `true` if the write landed inside the buffer.
    pub fn diffuse(&mut self, x: isize, y: isize, error: [f64; 3], weight: u8, divisor: u8) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return false;
        }

        let (weight, divisor) = (f64::from(weight), f64::from(divisor));
        let share = |e: f64| (e * weight) / divisor;
        let cell = &mut self.pixels[y * self.width + x];
        cell.r = add_clamped(cell.r, share(error[0]));
        cell.g = add_clamped(cell.g, share(error[1]));
        cell.b = add_clamped(cell.b, share(error[2]));
        true
    }
}

#[inline]
fn add_clamped(stored: u8, delta: f64) -> u8 {
    (f64::from(stored) + delta).round_ties_even().clamp(0.0, 255.0) as u8
}

fn check_dimensions(width: usize, height: usize) -> Result<(), BufferError> {
    if width == 0 || height == 0 {
        return Err(BufferError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Row-major coordinate iterator returned by [`PixelBuffer::raster_positions()`].
#[derive(Debug, Clone)]
pub struct RasterPositions {
    width: usize,
    height: usize,
    next: usize,
}

impl Iterator for RasterPositions {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.width * self.height {
            return None;
        }
        let pos = (self.next % self.width, self.next / self.width);
        self.next += 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.width * self.height - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RasterPositions {}
