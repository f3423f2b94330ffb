//! Built-in palettes of historical platforms and the keyed catalog holding them.

use super::error::PaletteError;
use super::palette::Palette;
use crate::color::Rgb;

const C64: &[Rgb] = &[
    rgb(0x000000), rgb(0xFFFFFF), rgb(0x880000), rgb(0xAAFFEE),
    rgb(0xCC44CC), rgb(0x00CC55), rgb(0x0000AA), rgb(0xEEEE77),
    rgb(0xDD8855), rgb(0x664400), rgb(0xFF7777), rgb(0x333333),
    rgb(0x777777), rgb(0xAAFF66), rgb(0x0088FF), rgb(0xBBBBBB),
];

const EGA: &[Rgb] = &[
    rgb(0x000000), rgb(0x0000AA), rgb(0x00AA00), rgb(0x00AAAA),
    rgb(0xAA0000), rgb(0xAA00AA), rgb(0xAA5500), rgb(0xAAAAAA),
    rgb(0x555555), rgb(0x5555FF), rgb(0x55FF55), rgb(0x55FFFF),
    rgb(0xFF5555), rgb(0xFF55FF), rgb(0xFFFF55), rgb(0xFFFFFF),
];

// Workbench 1.3 style 32-color default set.
const AMIGA: &[Rgb] = &[
    rgb(0xAAAAAA), rgb(0x000000), rgb(0xFFFFFF), rgb(0x6688BB),
    rgb(0xFF0000), rgb(0x00FF00), rgb(0x0000FF), rgb(0xFFFF00),
    rgb(0x00FFFF), rgb(0xFF00FF), rgb(0x888888), rgb(0x444444),
    rgb(0xEE8800), rgb(0xEE0088), rgb(0x8800EE), rgb(0x0088EE),
    rgb(0x440000), rgb(0x004400), rgb(0x000044), rgb(0x444400),
    rgb(0x004444), rgb(0x440044), rgb(0x884400), rgb(0x880044),
    rgb(0x008844), rgb(0x004488), rgb(0x448800), rgb(0x440088),
    rgb(0xFFBB00), rgb(0xDDBB44), rgb(0xBB8844), rgb(0x996622),
];

// NTSC subset.
const ATARI: &[Rgb] = &[
    rgb(0x000000), rgb(0x2D2D2D), rgb(0x585858), rgb(0x8C8C8C), rgb(0xBCBCBC), rgb(0xFFFFFF),
    rgb(0x3C3C00), rgb(0x6C6C00), rgb(0x989800), rgb(0xC0C000), rgb(0xE0E000),
    rgb(0x442800), rgb(0x744800), rgb(0xA06800), rgb(0xCC8400), rgb(0xF4A400),
    rgb(0x541400), rgb(0x882C00), rgb(0xB44800), rgb(0xE06800), rgb(0xFC8800),
    rgb(0x500000), rgb(0x800000), rgb(0xAC0000), rgb(0xD80000), rgb(0xFC0000),
    rgb(0x440038), rgb(0x70005C), rgb(0x980080), rgb(0xC000A8), rgb(0xE400D0),
    rgb(0x280048), rgb(0x4C0078), rgb(0x6C00A4), rgb(0x8C00D0), rgb(0xAC00FC),
    rgb(0x080050), rgb(0x1C0084), rgb(0x3400B0), rgb(0x4C00E0), rgb(0x6800FC),
    rgb(0x000050), rgb(0x000084), rgb(0x0000B0), rgb(0x0000E0), rgb(0x0000FC),
    rgb(0x001048), rgb(0x002478), rgb(0x003CB0), rgb(0x0054E0), rgb(0x006CFC),
    rgb(0x001C38), rgb(0x003864), rgb(0x005490), rgb(0x0070C0), rgb(0x008CFC),
    rgb(0x00281C), rgb(0x004C38), rgb(0x007054), rgb(0x009474), rgb(0x00B894),
    rgb(0x002800), rgb(0x004C00), rgb(0x006C00), rgb(0x008C00), rgb(0x00AC00),
    rgb(0x102800), rgb(0x284C00), rgb(0x406C00), rgb(0x5C8C00), rgb(0x78AC00),
    rgb(0x242400), rgb(0x484800), rgb(0x686800), rgb(0x888800), rgb(0xACAC00),
];

/// The 16 EGA colors followed by a 6x6x6 color cube in steps of 51.
fn vga_colors() -> Vec<Rgb> {
    let mut colors = EGA.to_vec();
    for r in 0..6u8 {
        for g in 0..6u8 {
            for b in 0..6u8 {
                colors.push(Rgb::new(r * 51, g * 51, b * 51));
            }
        }
    }
    colors
}

const fn rgb(hex: u32) -> Rgb {
    Rgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// An immutable, ordered registry of named palettes.
///
/// Constructed once (usually via [`PaletteCatalog::builtin()`] plus any
/// configured additions) and then passed by reference to whoever needs a
/// palette. A built catalog has no mutating methods.
///
/// # Example
///
/// ```
/// use retro_dither::PaletteCatalog;
///
/// let catalog = PaletteCatalog::builtin();
/// let c64 = catalog.get("c64").unwrap();
/// assert_eq!(c64.name(), "Commodore 64");
/// assert_eq!(c64.len(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteCatalog {
    entries: Vec<(String, Palette)>,
}

impl PaletteCatalog {
    /// The five historical platforms, in display order:
    /// `c64`, `amiga`, `ega`, `vga`, `atari`.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Start a catalog seeded with the built-in palettes.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder {
            entries: builtin_entries(),
        }
    }

    /// Start a catalog with no palettes.
    pub fn empty_builder() -> CatalogBuilder {
        CatalogBuilder {
            entries: Vec::new(),
        }
    }

    /// Look up a palette by key.
    pub fn get(&self, key: &str) -> Option<&Palette> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, palette)| palette)
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, palette)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Palette)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// Number of registered palettes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no palettes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PaletteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Accumulates palettes before freezing them into a [`PaletteCatalog`].
#[derive(Debug)]
pub struct CatalogBuilder {
    entries: Vec<(String, Palette)>,
}

impl CatalogBuilder {
    /// Register `palette` under `key`.
    ///
    /// # Errors
    ///
    /// [`PaletteError::DuplicateKey`] if the key is already taken.
    pub fn insert(&mut self, key: impl Into<String>, palette: Palette) -> Result<(), PaletteError> {
        let key = key.into();
        if self.entries.iter().any(|(k, _)| *k == key) {
            return Err(PaletteError::DuplicateKey(key));
        }
        self.entries.push((key, palette));
        Ok(())
    }

    /// Freeze into an immutable catalog.
    pub fn build(self) -> PaletteCatalog {
        PaletteCatalog {
            entries: self.entries,
        }
    }
}

fn builtin_entries() -> Vec<(String, Palette)> {
    [
        ("c64", "Commodore 64", "16 colors, High contrast", 320, C64.to_vec()),
        ("amiga", "Amiga OCS", "32 vibrant colors", 320, AMIGA.to_vec()),
        ("ega", "IBM EGA", "16 colors, Digital signal", 640, EGA.to_vec()),
        ("vga", "IBM VGA", "256 colors Mode 13h", 320, vga_colors()),
        ("atari", "Atari 2600", "128 color NTSC palette", 160, ATARI.to_vec()),
    ]
    .into_iter()
    .map(|(key, name, description, width, colors)| {
        let palette = Palette::from_table(name, colors)
            .with_description(description)
            .with_native_width(width);
        (key.to_string(), palette)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys_in_order() {
        let catalog = PaletteCatalog::builtin();
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["c64", "amiga", "ega", "vga", "atari"]);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_every_table_entry_reaches_the_catalog() {
        let catalog = PaletteCatalog::builtin();
        for (key, table) in [("c64", C64), ("amiga", AMIGA), ("ega", EGA), ("atari", ATARI)] {
            assert_eq!(catalog.get(key).unwrap().colors(), table, "{key}");
        }
        assert_eq!(catalog.get("vga").unwrap().colors(), &vga_colors()[..]);
        assert_eq!(C64[3], Rgb::new(0xAA, 0xFF, 0xEE));
        assert_eq!(ATARI[75], Rgb::new(0xAC, 0xAC, 0x00));
    }

    #[test]
    fn test_builtin_sizes_and_metadata() {
        let catalog = PaletteCatalog::builtin();
        let expected = [
            ("c64", "Commodore 64", 16, 320),
            ("amiga", "Amiga OCS", 32, 320),
            ("ega", "IBM EGA", 16, 640),
            ("vga", "IBM VGA", 232, 320),
            ("atari", "Atari 2600", 76, 160),
        ];
        for (key, name, len, width) in expected {
            let palette = catalog.get(key).unwrap();
            assert_eq!(palette.name(), name);
            assert_eq!(palette.len(), len, "{key} size");
            assert_eq!(palette.native_width(), Some(width));
            assert!(!palette.description().is_empty());
        }
    }

    #[test]
    fn test_amiga_shorthand_expanded() {
        let catalog = PaletteCatalog::builtin();
        let amiga = catalog.get("amiga").unwrap();
        assert_eq!(amiga.color(0), Rgb::new(0xAA, 0xAA, 0xAA));
        assert_eq!(amiga.color(3), Rgb::new(0x66, 0x88, 0xBB));
    }

    #[test]
    fn test_vga_starts_with_ega_then_cube() {
        let catalog = PaletteCatalog::builtin();
        let vga = catalog.get("vga").unwrap();
        let ega = catalog.get("ega").unwrap();
        assert_eq!(&vga.colors()[..16], ega.colors());
        assert_eq!(vga.color(16), Rgb::BLACK);
        assert_eq!(vga.color(17), Rgb::new(0, 0, 51));
        assert_eq!(vga.color(231), Rgb::WHITE);
    }

    #[test]
    fn test_unknown_key() {
        assert!(PaletteCatalog::builtin().get("zx81").is_none());
    }

    #[test]
    fn test_builder_extends_catalog() {
        let mono = Palette::from_hex("Mono", &["#000", "#FFF"]).unwrap();
        let mut builder = PaletteCatalog::builder();
        builder.insert("mono", mono).unwrap();
        let catalog = builder.build();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.keys().last(), Some("mono"));
        assert_eq!(catalog.get("mono").unwrap().len(), 2);
    }

    #[test]
    fn test_builder_rejects_duplicate_key() {
        let mono = Palette::from_hex("Mono", &["#000", "#FFF"]).unwrap();
        let mut builder = PaletteCatalog::builder();
        let result = builder.insert("c64", mono);
        assert!(matches!(result, Err(PaletteError::DuplicateKey(k)) if k == "c64"));
        assert_eq!(builder.build().len(), 5);
    }

    #[test]
    fn test_empty_builder() {
        let catalog = PaletteCatalog::empty_builder().build();
        assert!(catalog.is_empty());
    }
}
