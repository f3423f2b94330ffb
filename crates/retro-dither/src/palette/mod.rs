//! Palette types and the built-in palette catalog
//!
//! A [`Palette`] is an ordered, non-empty list of colors together with the
//! nearest-color search used for quantization. [`PaletteCatalog`] is the
//! immutable keyed registry of palettes available to callers.

mod catalog;
mod error;
mod palette;

pub use catalog::{CatalogBuilder, PaletteCatalog};
pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, MAX_PALETTE_SIZE};
