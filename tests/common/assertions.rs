//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use retro_dither::{DitheredImage, Palette, Rgb};

/// Assert every RGBA pixel of `frame` is opaque and a color of `palette`
/// or black (the unrevealed canvas).
pub fn assert_frame_in_palette(frame: &[u8], palette: &Palette) {
    for (i, px) in frame.chunks_exact(4).enumerate() {
        let color = Rgb::new(px[0], px[1], px[2]);
        assert_eq!(px[3], 255, "pixel {i} not opaque");
        assert!(
            color == Rgb::BLACK || palette.contains(color),
            "pixel {i} = {color} is not in palette {}",
            palette.name()
        );
    }
}

/// Assert every index of `image` addresses its palette.
pub fn assert_indices_valid(image: &DitheredImage) {
    let len = image.palette().len();
    assert_eq!(
        image.indices().len(),
        image.width() * image.height(),
        "index count does not match dimensions"
    );
    if let Some(bad) = image.indices().iter().find(|&&i| i as usize >= len) {
        panic!("index {bad} out of range for palette of {len} colors");
    }
}

/// Count pixels that differ from opaque black.
pub fn lit_pixels(frame: &[u8]) -> usize {
    frame
        .chunks_exact(4)
        .filter(|px| px[..3] != [0, 0, 0])
        .count()
}
