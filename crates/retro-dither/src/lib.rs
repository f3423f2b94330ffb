#![allow(clippy::module_inception)]

//! retro-dither: fixed-palette dithering and progressive block reveal
//!
//! This library reduces a true-color image to the palette of a historical
//! computer (Commodore 64, Amiga, EGA, VGA, Atari 2600, or any palette you
//! supply) with Floyd-Steinberg error diffusion, and schedules the
//! "loading from tape" style block-by-block reveal of the result.
//!
//! # Quick Start
//!
//! ```
//! use retro_dither::{PaletteCatalog, PixelBuffer, RetroDitherer, Rgb};
//!
//! let catalog = PaletteCatalog::builtin();
//! let palette = catalog.get("ega").unwrap().clone();
//!
//! let buffer = PixelBuffer::filled(8, 8, Rgb::new(200, 120, 40)).unwrap();
//! let image = RetroDitherer::new(palette).dither(buffer).unwrap();
//!
//! assert!(image
//!     .to_buffer()
//!     .pixels()
//!     .iter()
//!     .all(|&p| image.palette().contains(p)));
//! ```
//!
//! # Pipeline
//!
//! 1. [`PixelBuffer`]: the caller decodes and resizes the source image.
//! 2. [`dither()`] / [`RetroDitherer`]: a single raster-order pass that maps
//!    each pixel to its nearest palette color and diffuses the scaled error
//!    to the right, bottom-left, bottom and bottom-right neighbors.
//! 3. [`DitheredImage`]: the read-only indexed result.
//! 4. [`BlockGrid`] + [`RevealState`]: which blocks of the result are visible
//!    at a given moment.
//!
//! # Color Matching
//!
//! Distance is plain squared Euclidean RGB. When two palette entries are
//! equally close, the one listed first wins. Palettes may contain duplicate
//! colors; the later copies are simply never chosen.
//!
//! # Error Diffusion
//!
//! The error of a pixel is `(current - chosen) * strength`, where `current`
//! already includes error received from earlier pixels. Neighbor values are
//! stored as 8-bit channels: each write is rounded and clamped to `[0, 255]`,
//! and shares aimed outside the image are discarded.

pub mod api;
pub mod buffer;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod reveal;


pub use api::{DitherError, RetroDitherer};
pub use buffer::{BufferError, PixelBuffer};
pub use color::Rgb;
pub use dither::{dither, DitherOptions, MAX_STRENGTH};
pub use output::DitheredImage;
pub use palette::{
    CatalogBuilder, Palette, PaletteCatalog, PaletteError, ParseColorError, MAX_PALETTE_SIZE,
};
pub use reveal::{
    blocks_to_reveal, target_block_count, BlockGrid, BlockRect, RevealError, RevealOptions,
    RevealState,
};
