use retro_dither::{Palette, PaletteCatalog, PaletteError, RevealOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Palette key used when none is given on the command line
    pub system: String,

    /// Error diffusion strength, 0.0 to 1.2
    pub strength: f64,

    /// Multiplier applied to the palette's native width when resizing
    pub resolution_scale: f32,

    /// Reveal block edge in pixels
    pub block_size: usize,

    /// Time for a full reveal, in milliseconds
    pub duration_ms: u64,

    pub export: ExportConfig,

    pub caption: CaptionConfig,

    /// Extra palettes, added after the built-in ones
    pub palettes: BTreeMap<String, PaletteConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            system: "c64".to_string(),
            strength: 1.0,
            resolution_scale: 1.0,
            block_size: 8,
            duration_ms: 6000,
            export: ExportConfig::default(),
            caption: CaptionConfig::default(),
            palettes: BTreeMap::new(),
        }
    }
}

/// Container format of exported videos
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    #[default]
    Webm,
    Mp4,
}

impl VideoFormat {
    pub fn extension(self) -> &'static str {
        match self {
            VideoFormat::Webm => "webm",
            VideoFormat::Mp4 => "mp4",
        }
    }
}

impl std::str::FromStr for VideoFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "webm" => Ok(VideoFormat::Webm),
            "mp4" => Ok(VideoFormat::Mp4),
            other => Err(format!("unknown video format '{other}' (expected webm or mp4)")),
        }
    }
}

/// Video export settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub fps: u32,

    /// How long the finished image stays on screen before the recording stops
    pub hold_ms: u64,

    pub format: VideoFormat,

    /// Integer nearest-neighbor upscale applied by the encoder
    pub pixel_scale: u32,

    /// Target video bitrate in ffmpeg notation, e.g. "2500k"
    pub bitrate: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            hold_ms: 100,
            format: VideoFormat::Webm,
            pixel_scale: 1,
            bitrate: "2500k".to_string(),
        }
    }
}

/// Descriptive caption service settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CaptionConfig {
    /// Base URL of a generateContent-style endpoint
    pub endpoint: String,

    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    pub timeout_secs: u64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

/// A user-defined palette
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaletteConfig {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub native_width: Option<u32>,

    /// Hex colors, `#RRGGBB` or `#RGB`
    pub colors: Vec<String>,
}

impl PaletteConfig {
    pub fn to_palette(&self) -> Result<Palette, PaletteError> {
        let colors: Vec<&str> = self.colors.iter().map(String::as_str).collect();
        let palette = Palette::from_hex(self.name.clone(), &colors)?
            .with_description(self.description.clone());
        Ok(match self.native_width {
            Some(width) => palette.with_native_width(width),
            None => palette,
        })
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        system = %config.system,
                        palettes = config.palettes.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Built-in palettes plus the configured ones.
    ///
    /// A configured palette that fails to parse or reuses a key is skipped
    /// with a warning.
    pub fn build_catalog(&self) -> PaletteCatalog {
        let mut builder = PaletteCatalog::builder();
        for (key, config) in &self.palettes {
            let palette = match config.to_palette() {
                Ok(palette) => palette,
                Err(e) => {
                    tracing::warn!(%e, key = %key, "Skipping invalid palette");
                    continue;
                }
            };
            if let Err(e) = builder.insert(key.clone(), palette) {
                tracing::warn!(%e, "Skipping palette");
            }
        }
        builder.build()
    }

    pub fn reveal_options(&self) -> RevealOptions {
        RevealOptions::new()
            .block_size(self.block_size)
            .duration(Duration::from_millis(self.duration_ms))
    }
}
