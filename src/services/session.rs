//! One image being converted and previewed.
//!
//! The session owns every input of a conversion and the cached result.
//! Changing an input that affects the pixels drops the cached image; changing
//! only the reveal timing keeps it. Either way the reveal in progress stops.

use std::sync::Arc;
use std::time::Duration;

use retro_dither::{
    dither, DitherOptions, DitheredImage, Palette, PaletteCatalog, PixelBuffer, RevealOptions,
};

use super::live_renderer::{LiveRenderer, TickOutcome};
use super::video_exporter::{ExportOutput, ExportSettings, FrameSink, VideoExporter};
use crate::error::RenderError;
use crate::rendering::DisplaySurface;

pub struct Session<S: DisplaySurface> {
    catalog: PaletteCatalog,
    system: String,
    dither: DitherOptions,
    reveal: RevealOptions,
    source: Option<PixelBuffer>,
    converted: Option<Arc<DitheredImage>>,
    renderer: LiveRenderer<S>,
}

impl<S: DisplaySurface> Session<S> {
    /// A session for `system`, which must exist in `catalog`.
    pub fn new(
        catalog: PaletteCatalog,
        system: impl Into<String>,
        surface: S,
    ) -> Result<Self, RenderError> {
        let system = system.into();
        if catalog.get(&system).is_none() {
            return Err(RenderError::UnknownPalette(system));
        }
        Ok(Self {
            catalog,
            system,
            dither: DitherOptions::default(),
            reveal: RevealOptions::default(),
            source: None,
            converted: None,
            renderer: LiveRenderer::new(surface),
        })
    }

    pub fn catalog(&self) -> &PaletteCatalog {
        &self.catalog
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn palette(&self) -> Result<&Palette, RenderError> {
        self.catalog
            .get(&self.system)
            .ok_or_else(|| RenderError::UnknownPalette(self.system.clone()))
    }

    pub fn dither_options(&self) -> &DitherOptions {
        &self.dither
    }

    pub fn reveal_options(&self) -> &RevealOptions {
        &self.reveal
    }

    pub fn converted(&self) -> Option<&Arc<DitheredImage>> {
        self.converted.as_ref()
    }

    pub fn renderer(&self) -> &LiveRenderer<S> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut LiveRenderer<S> {
        &mut self.renderer
    }

    /// Replace the source pixels.
    pub fn set_source(&mut self, source: PixelBuffer) {
        self.source = Some(source);
        self.invalidate_image();
    }

    /// Switch to another palette from the catalog.
    pub fn set_system(&mut self, system: &str) -> Result<(), RenderError> {
        if system == self.system {
            return Ok(());
        }
        if self.catalog.get(system).is_none() {
            return Err(RenderError::UnknownPalette(system.to_string()));
        }
        self.system = system.to_string();
        self.invalidate_image();
        Ok(())
    }

    /// Change the error diffusion strength. Checked at the next convert.
    pub fn set_strength(&mut self, strength: f64) {
        if strength == self.dither.strength {
            return;
        }
        self.dither.strength = strength;
        self.invalidate_image();
    }

    pub fn set_block_size(&mut self, block_size: usize) {
        if block_size != self.reveal.block_size {
            self.reveal.block_size = block_size;
            self.renderer.cancel();
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        if duration != self.reveal.duration {
            self.reveal.duration = duration;
            self.renderer.cancel();
        }
    }

    /// Replace both reveal settings at once, e.g. from configuration.
    pub fn set_reveal_options(&mut self, reveal: RevealOptions) {
        self.set_block_size(reveal.block_size);
        self.set_duration(reveal.duration);
    }

    fn invalidate_image(&mut self) {
        if self.converted.take().is_some() {
            tracing::debug!("Discarding converted image");
        }
        self.renderer.invalidate();
    }

    /// The quantized image, running a full dithering pass if the cached one
    /// was invalidated.
    pub fn convert(&mut self) -> Result<Arc<DitheredImage>, RenderError> {
        if let Some(image) = &self.converted {
            return Ok(image.clone());
        }
        let source = self.source.clone().ok_or(RenderError::NoSource)?;
        let palette = self.palette()?;

        let started = std::time::Instant::now();
        let image = Arc::new(dither(source, palette, &self.dither)?);
        tracing::info!(
            palette = palette.name(),
            width = image.width(),
            height = image.height(),
            strength = self.dither.strength,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Converted image"
        );

        self.converted = Some(image.clone());
        Ok(image)
    }

    /// Start revealing the converted image at `now`.
    pub fn start_reveal(&mut self, now: Duration) -> Result<(), RenderError> {
        let image = self.converted.clone().ok_or(RenderError::NotConverted)?;
        self.renderer.start(image, &self.reveal, now)
    }

    pub fn tick(&mut self, now: Duration) -> Result<TickOutcome, RenderError> {
        self.renderer.tick(now)
    }

    /// Record the reveal of the converted image with the current reveal
    /// options. The live reveal is not affected.
    pub fn export<K: FrameSink + ?Sized>(
        &self,
        sink: &mut K,
        settings: ExportSettings,
    ) -> Result<ExportOutput, RenderError> {
        let image = self.converted.as_ref().ok_or(RenderError::NotConverted)?;
        Ok(VideoExporter::new(settings).export(image, &self.reveal, sink)?)
    }
}
