use retro_dither::{BufferError, DitherError, RevealError};
use thiserror::Error;

/// Failures on the conversion and live preview path.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),

    #[error("Reveal error: {0}")]
    Reveal(#[from] RevealError),

    #[error("Display error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("No source image loaded")]
    NoSource,

    #[error("Image has not been converted yet")]
    NotConverted,

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

/// Failures of a display surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Display unavailable: {0}")]
    Unavailable(String),

    #[error("Surface is {surface_width}x{surface_height}, image is {image_width}x{image_height}")]
    SizeMismatch {
        surface_width: usize,
        surface_height: usize,
        image_width: usize,
        image_height: usize,
    },

    #[error("Display not acquired")]
    NotAcquired,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while recording a reveal to a video artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Frame sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Frame sink error: {0}")]
    Sink(String),

    #[error("Reveal error: {0}")]
    Reveal(#[from] RevealError),

    #[error("Invalid export settings: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while loading a source image from disk.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the caption service. Never surfaced to the image pipeline.
#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Caption service returned status {0}")]
    Status(u16),

    #[error("Caption response contained no text")]
    MissingText,

    #[error("Caption service not configured: {0}")]
    NotConfigured(String),
}
