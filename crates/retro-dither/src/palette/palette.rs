//! Palette struct with nearest-color matching.
//!
//! This module provides the core `Palette` type: an ordered, named, non-empty
//! list of colors and the linear nearest-color search used by the quantizer.

use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgb;

/// Largest palette that still fits a one-byte pixel index.
pub const MAX_PALETTE_SIZE: usize = 256;

/// A fixed, ordered color palette.
///
/// Besides the colors themselves a palette carries a display name, a short
/// description and an optional native horizontal resolution. The native width
/// is only a hint for callers that resize the source image before dithering.
///
/// # Ordering and ties
///
/// Order is significant. When several entries are equally close to a color,
/// [`nearest_index()`](Palette::nearest_index) returns the one that appears
/// first. Duplicate entries are therefore allowed: later copies can never be
/// selected, but they do no harm.
///
/// # Example
///
/// ```
/// use retro_dither::{Palette, Rgb};
///
/// let palette = Palette::new("1-bit", vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.nearest(Rgb::new(200, 200, 200)), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    description: String,
    native_width: Option<u32>,
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a new palette.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] if `colors` has more than
    ///   [`MAX_PALETTE_SIZE`] entries
    pub fn new(name: impl Into<String>, colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
            });
        }

        Ok(Self {
            name: name.into(),
            description: String::new(),
            native_width: None,
            colors,
        })
    }

    /// Palette from a built-in color table, which is never empty and never
    /// larger than [`MAX_PALETTE_SIZE`].
    pub(crate) fn from_table(name: &str, colors: Vec<Rgb>) -> Self {
        debug_assert!(!colors.is_empty() && colors.len() <= MAX_PALETTE_SIZE);
        Self {
            name: name.to_string(),
            description: String::new(),
            native_width: None,
            colors,
        }
    }

    /// Create a palette from hex color strings.
    ///
    /// Accepts `#RRGGBB` and the `#RGB` shorthand, with or without `#`.
    ///
    /// # Example
    ///
    /// ```
    /// use retro_dither::{Palette, Rgb};
    ///
    /// let palette = Palette::from_hex("mono", &["#000", "#FFFFFF"]).unwrap();
    /// assert_eq!(palette.color(1), Rgb::WHITE);
    /// ```
    pub fn from_hex(name: impl Into<String>, colors: &[&str]) -> Result<Self, PaletteError> {
        let colors = colors
            .iter()
            .map(|s| Rgb::from_str(s).map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(name, colors)
    }

    /// Attach a short human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach the platform's typical horizontal resolution.
    pub fn with_native_width(mut self, width: u32) -> Self {
        self.native_width = Some(width);
        self
    }

    /// Display name of the palette (e.g. "Commodore 64").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short description, empty if none was set.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Typical horizontal resolution of the platform, if known.
    pub fn native_width(&self) -> Option<u32> {
        self.native_width
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: empty palettes are rejected at construction time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// Returns true if `color` is an exact member of the palette.
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Index of the palette entry closest to `color`.
    ///
    /// Distance is squared Euclidean in RGB. The comparison is strict, so
    /// the first entry achieving the minimum wins.
    #[inline]
    pub fn nearest_index(&self, color: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &candidate) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(candidate);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0 {
                    break;
                }
            }
        }

        best_idx
    }

    /// Palette entry closest to `color`. See [`nearest_index()`](Self::nearest_index).
    #[inline]
    pub fn nearest(&self, color: Rgb) -> Rgb {
        self.colors[self.nearest_index(color)]
    }
}
