//! Retrovision - retro computer image conversion
//!
//! Converts images to the palettes of historical home computers and replays
//! the conversion as a block-by-block "loading" animation, live in a
//! terminal or recorded to video.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
