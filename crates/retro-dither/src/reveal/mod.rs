//! Progressive block reveal.
//!
//! An image is cut into a grid of square blocks ([`BlockGrid`]) numbered in
//! raster order. [`target_block_count()`] says how many of them should be
//! visible after a given amount of time, and [`RevealState`] tracks how far a
//! particular reveal has got so each block is handed out exactly once.
//!
//! Everything here is driven by caller-supplied timestamps. Nothing reads a
//! clock, which lets the live display and the video exporter share the same
//! timing and lets tests run on a simulated clock.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use retro_dither::{BlockGrid, RevealState};
//!
//! let grid = BlockGrid::new(17, 10, 8).unwrap();
//! assert_eq!(grid.total_blocks(), 6);
//!
//! let mut state = RevealState::new(Duration::ZERO, Duration::from_secs(6), grid.total_blocks()).unwrap();
//! assert_eq!(state.advance(Duration::from_secs(3)), 0..3);
//! assert_eq!(state.advance(Duration::from_secs(6)), 3..6);
//! assert!(state.is_complete());
//! ```

mod error;
mod grid;
mod options;
mod scheduler;

pub use error::RevealError;
pub use grid::{BlockGrid, BlockRect};
pub use options::RevealOptions;
pub use scheduler::{blocks_to_reveal, target_block_count, RevealState};
