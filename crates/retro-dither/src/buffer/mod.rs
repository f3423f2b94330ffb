//! Owned, bounds-checked 2D pixel grid.
//!
//! [`PixelBuffer`] is the working surface of the dithering pass. It is a
//! plain row-major value: the engine takes ownership, walks it in the order
//! given by [`PixelBuffer::raster_positions()`] and pushes error into later
//! cells through [`PixelBuffer::diffuse()`], which silently drops writes that
//! fall outside the image.

mod error;
mod pixel_buffer;

pub use error::BufferError;
pub use pixel_buffer::{PixelBuffer, RasterPositions};
