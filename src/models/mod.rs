pub mod config;

pub use config::{AppConfig, CaptionConfig, ExportConfig, PaletteConfig, VideoFormat};
