use retro_dither::{BlockRect, DitheredImage};

use crate::error::SurfaceError;

/// Something a reveal can be drawn onto.
///
/// A surface is acquired for one image size, receives block blits, and is
/// asked to present after each batch. Blocks already blitted stay visible
/// until the next `acquire`.
pub trait DisplaySurface {
    /// Prepare a black `width x height` drawing area.
    ///
    /// Fails with [`SurfaceError::Unavailable`] when the display cannot be
    /// obtained at all.
    fn acquire(&mut self, width: usize, height: usize) -> Result<(), SurfaceError>;

    /// Copy the pixels of `image` under `rect` onto the surface.
    fn blit(&mut self, image: &DitheredImage, rect: BlockRect) -> Result<(), SurfaceError>;

    /// Make blitted blocks visible.
    fn present(&mut self) -> Result<(), SurfaceError>;

    /// Give the display back. Safe to call when not acquired.
    fn release(&mut self) -> Result<(), SurfaceError>;
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn acquire(&mut self, width: usize, height: usize) -> Result<(), SurfaceError> {
        (**self).acquire(width, height)
    }

    fn blit(&mut self, image: &DitheredImage, rect: BlockRect) -> Result<(), SurfaceError> {
        (**self).blit(image, rect)
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        (**self).present()
    }

    fn release(&mut self) -> Result<(), SurfaceError> {
        (**self).release()
    }
}
