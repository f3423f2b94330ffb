use retro_dither::{BlockRect, DitheredImage, Rgb};

use super::surface::DisplaySurface;
use crate::error::SurfaceError;

/// In-memory RGBA framebuffer.
///
/// Used as the drawing target of the video exporter and as a headless
/// display in tests.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
    acquired: bool,
    presents: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// A black canvas of the given size, already acquired.
    pub fn with_size(width: usize, height: usize) -> Self {
        let mut canvas = Self::new();
        canvas.reset(width, height);
        canvas
    }

    fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.rgba.clear();
        self.rgba.resize(width * height * 4, 0);
        for alpha in self.rgba.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        self.acquired = true;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    /// Number of `present` calls since the last acquire.
    pub fn presents(&self) -> usize {
        self.presents
    }

    /// Current contents as packed RGBA.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let offset = (y * self.width + x) * 4;
        Rgb::new(
            self.rgba[offset],
            self.rgba[offset + 1],
            self.rgba[offset + 2],
        )
    }

    /// True if every pixel of `image` is on the canvas.
    pub fn matches(&self, image: &DitheredImage) -> bool {
        self.width == image.width()
            && self.height == image.height()
            && self.rgba == image.to_rgba_bytes()
    }
}

impl DisplaySurface for Canvas {
    fn acquire(&mut self, width: usize, height: usize) -> Result<(), SurfaceError> {
        self.reset(width, height);
        self.presents = 0;
        Ok(())
    }

    fn blit(&mut self, image: &DitheredImage, rect: BlockRect) -> Result<(), SurfaceError> {
        if !self.acquired {
            return Err(SurfaceError::NotAcquired);
        }
        if image.width() != self.width || image.height() != self.height {
            return Err(SurfaceError::SizeMismatch {
                surface_width: self.width,
                surface_height: self.height,
                image_width: image.width(),
                image_height: image.height(),
            });
        }
        image.copy_rect_rgba(rect, &mut self.rgba, self.width);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.presents += 1;
        Ok(())
    }

    fn release(&mut self) -> Result<(), SurfaceError> {
        self.acquired = false;
        Ok(())
    }
}
