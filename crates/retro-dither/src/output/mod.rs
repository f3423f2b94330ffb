//! Output types for the dithering pipeline.
//!
//! [`DitheredImage`] is the read-only result of a dithering pass: one palette
//! index per pixel plus the palette itself. Packed RGB/RGBA views and block
//! copies are computed on demand.

mod dithered_image;

pub use dithered_image::DitheredImage;
