//! Test fixtures and constants.

use std::io::Cursor;

use retro_dither::{PixelBuffer, Rgb};

/// Palette keys shipped with the library
pub mod systems {
    pub const C64: &str = "c64";
    pub const EGA: &str = "ega";
    pub const AMIGA: &str = "amiga";
    pub const VGA: &str = "vga";
    pub const ATARI: &str = "atari";

    pub const ALL: [&str; 5] = [C64, EGA, AMIGA, VGA, ATARI];
}

/// Diagonal RGB gradient, the kind of input that exercises every palette entry.
pub fn gradient(width: usize, height: usize) -> PixelBuffer {
    let mut buffer = PixelBuffer::filled(width, height, Rgb::BLACK).unwrap();
    let span_x = width.saturating_sub(1).max(1);
    let span_y = height.saturating_sub(1).max(1);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / span_x) as u8;
            let g = (y * 255 / span_y) as u8;
            let b = ((x + y) * 255 / (span_x + span_y)) as u8;
            buffer.set(x, y, Rgb::new(r, g, b));
        }
    }
    buffer
}

/// Encode `buffer` as an 8-bit RGBA PNG with the given alpha everywhere.
pub fn png_bytes(buffer: &PixelBuffer, alpha: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(buffer.width() * buffer.height() * 4);
    for pixel in buffer.pixels() {
        data.extend_from_slice(&[pixel.r, pixel.g, pixel.b, alpha]);
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(
            Cursor::new(&mut out),
            buffer.width() as u32,
            buffer.height() as u32,
        );
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&data).unwrap();
    }
    out
}

/// Decoded indexed PNG: dimensions, palette triples and one index per pixel.
pub struct IndexedPng {
    pub width: usize,
    pub height: usize,
    pub bit_depth: u8,
    pub palette: Vec<[u8; 3]>,
    pub indices: Vec<u8>,
}

/// Decode an indexed PNG and unpack its sample rows.
pub fn decode_indexed_png(bytes: &[u8]) -> IndexedPng {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info().unwrap();
    let palette: Vec<[u8; 3]> = reader
        .info()
        .palette
        .as_ref()
        .expect("indexed PNG must carry PLTE")
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    let mut data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data).unwrap();
    assert_eq!(info.color_type, png::ColorType::Indexed);

    let bits = info.bit_depth as u8;
    let width = info.width as usize;
    let height = info.height as usize;
    let per_byte = 8 / bits as usize;
    let mask = ((1u16 << bits) - 1) as u8;

    let mut indices = Vec::with_capacity(width * height);
    for row in data.chunks_exact(info.line_size).take(height) {
        for x in 0..width {
            let byte = row[x / per_byte];
            let shift = 8 - bits as usize * (x % per_byte + 1);
            indices.push((byte >> shift) & mask);
        }
    }

    IndexedPng {
        width,
        height,
        bit_depth: bits,
        palette,
        indices,
    }
}

/// Minimal configuration file defining one extra palette
pub const CUSTOM_PALETTE_CONFIG: &str = r##"
system: gameboy
strength: 0.8
block_size: 4
duration_ms: 1000
palettes:
  gameboy:
    name: "Game Boy"
    description: "4 shades of green"
    native_width: 160
    colors: ["#0f380f", "#306230", "#8bac0f", "#9bbc0f"]
"##;
