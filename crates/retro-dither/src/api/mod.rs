//! High-level API: the [`RetroDitherer`] builder and the unified
//! [`DitherError`] type.

mod builder;
mod error;

pub use builder::RetroDitherer;
pub use error::DitherError;
