//! Color types
//!
//! The quantization domain is plain 8-bit RGB: no alpha, no gamma handling.
//! Distances are squared Euclidean in RGB space.
//!
//! # Example
//!
//! ```
//! use retro_dither::Rgb;
//!
//! let grey: Rgb = "#808080".parse().unwrap();
//! assert_eq!(grey, Rgb::new(128, 128, 128));
//! assert_eq!(grey.distance_squared(Rgb::BLACK), 3 * 128 * 128);
//! ```

mod rgb;

pub use rgb::Rgb;
