//! Indexed PNG encoding of dithered images.

use std::io::Cursor;

use retro_dither::DitheredImage;

use crate::error::RenderError;

/// Encode a dithered image as a lossless indexed PNG.
///
/// The PLTE chunk holds the palette in order and the bit depth is the
/// smallest of 1, 2, 4 or 8 that fits every index.
pub fn encode_indexed_png(image: &DitheredImage) -> Result<Vec<u8>, RenderError> {
    let palette = image.palette();
    let bits = bits_for_palette(palette.len());
    let plte: Vec<u8> = palette.colors().iter().flat_map(|c| c.to_bytes()).collect();

    let packed = if bits == 8 {
        image.indices().to_vec()
    } else {
        pack_nbits(image.indices(), image.width(), bits)
    };

    let bit_depth = match bits {
        1 => png::BitDepth::One,
        2 => png::BitDepth::Two,
        4 => png::BitDepth::Four,
        _ => png::BitDepth::Eight,
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width() as u32, image.height() as u32);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Best);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }

    let bytes = buf.into_inner();
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        colors = palette.len(),
        bits,
        bytes = bytes.len(),
        "Encoded indexed PNG"
    );
    Ok(bytes)
}

fn bits_for_palette(len: usize) -> u8 {
    match len {
        0..=2 => 1,
        3..=4 => 2,
        5..=16 => 4,
        _ => 8,
    }
}

/// Pack `bits`-wide indices MSB first, each row padded to a whole byte.
fn pack_nbits(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    let per_byte = usize::from(8 / bits);
    let mask = (1u8 << bits) - 1;
    indices
        .chunks(width)
        .flat_map(|row| row.chunks(per_byte))
        .map(|group| {
            group.iter().enumerate().fold(0u8, |byte, (slot, &idx)| {
                let shift = 8 - bits * (slot as u8 + 1);
                byte | ((idx & mask) << shift)
            })
        })
        .collect()
}
