//! Palette and color parsing errors.

use std::fmt;

/// A hex color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Digit count after the optional `#` was neither 3 nor 6
    InvalidLength(usize),
    /// Text after the optional `#` contains a non-hex character
    InvalidHex(String),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength(n) => {
                write!(f, "expected 3 or 6 hex digits, found {n}")
            }
            ParseColorError::InvalidHex(text) => write!(f, "'{text}' is not a hex color"),
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Error type for palette validation and catalog construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// No colors provided in palette
    EmptyPalette,
    /// More colors than fit in a one-byte index
    TooManyColors {
        /// Number of colors supplied
        count: usize,
    },
    /// A catalog already holds a palette under this key
    DuplicateKey(String),
    /// Invalid hex color string
    ParseColor(ParseColorError),
}

impl From<ParseColorError> for PaletteError {
    fn from(err: ParseColorError) -> Self {
        PaletteError::ParseColor(err)
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::EmptyPalette => {
                write!(f, "palette cannot be empty")
            }
            PaletteError::TooManyColors { count } => {
                write!(
                    f,
                    "palette has {} colors, at most {} are supported",
                    count,
                    super::MAX_PALETTE_SIZE
                )
            }
            PaletteError::DuplicateKey(key) => {
                write!(f, "palette key '{}' is already registered", key)
            }
            PaletteError::ParseColor(err) => {
                write!(f, "invalid color: {}", err)
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}
