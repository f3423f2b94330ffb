//! Decoding and sizing of source images.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use retro_dither::{Palette, PixelBuffer};

use crate::error::SourceError;

/// Width used when a palette carries no native width hint.
pub const DEFAULT_NATIVE_WIDTH: u32 = 320;

/// Output size for a `src_width x src_height` image on a platform that is
/// `native_width` pixels wide, scaled by `resolution_scale`.
///
/// Width is `floor(native_width * scale)`, height keeps the aspect ratio
/// rounded down. Both are at least 1.
pub fn target_size(
    src_width: u32,
    src_height: u32,
    native_width: u32,
    resolution_scale: f32,
) -> (u32, u32) {
    let width = ((native_width as f32 * resolution_scale).floor() as u32).max(1);
    let height = (u64::from(width) * u64::from(src_height) / u64::from(src_width.max(1))) as u32;
    (width, height.max(1))
}

/// Decode an image file and prepare it for dithering against `palette`.
pub fn load_source(
    path: &Path,
    palette: &Palette,
    resolution_scale: f32,
) -> Result<PixelBuffer, SourceError> {
    let bytes = std::fs::read(path)?;
    let buffer = decode_source(&bytes, palette, resolution_scale)?;
    tracing::info!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        palette = palette.name(),
        "Loaded source image"
    );
    Ok(buffer)
}

/// Decode in-memory image bytes, flatten alpha over black and resize.
pub fn decode_source(
    bytes: &[u8],
    palette: &Palette,
    resolution_scale: f32,
) -> Result<PixelBuffer, SourceError> {
    let decoded = image::load_from_memory(bytes)?;
    let native_width = palette.native_width().unwrap_or(DEFAULT_NATIVE_WIDTH);
    let (width, height) = target_size(
        decoded.width(),
        decoded.height(),
        native_width,
        resolution_scale,
    );
    tracing::debug!(
        src_width = decoded.width(),
        src_height = decoded.height(),
        width,
        height,
        "Resizing source"
    );

    let resized = resize_rgba(&decoded, width, height);
    let mut rgba = resized.into_raw();
    flatten_over_black(&mut rgba);
    Ok(PixelBuffer::from_rgba_bytes(
        width as usize,
        height as usize,
        &rgba,
    )?)
}

fn resize_rgba(image: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let rgba = image.to_rgba8();
    if rgba.width() == width && rgba.height() == height {
        return rgba;
    }
    image::imageops::resize(&rgba, width, height, FilterType::Triangle)
}

/// Composite straight-alpha RGBA over an opaque black background in place.
fn flatten_over_black(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a < 255 {
            px[0] = mul_div255(u16::from(px[0]), a) as u8;
            px[1] = mul_div255(u16::from(px[1]), a) as u8;
            px[2] = mul_div255(u16::from(px[2]), a) as u8;
        }
        px[3] = 255;
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}
