//! Recording a reveal as a fixed-rate frame sequence.
//!
//! The exporter replays the same block schedule the live renderer uses,
//! sampling it at `k / fps` for frame `k` instead of at wall-clock ticks.

use std::time::Duration;

use retro_dither::{BlockGrid, DitheredImage, RevealOptions, RevealState};

use crate::error::ExportError;
use crate::rendering::{Canvas, DisplaySurface};

/// Shape of the frames a sink will receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpec {
    pub width: usize,
    pub height: usize,
    pub fps: u32,
}

/// One captured frame. `rgba` is `width * height * 4` bytes.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub index: u64,
    pub timestamp: Duration,
    pub rgba: &'a [u8],
}

/// Destination of captured frames, producing an encoded artifact.
pub trait FrameSink {
    /// Prepare for frames of `spec`.
    ///
    /// Fails with [`ExportError::SinkUnavailable`] when the capture or
    /// encoding capability is missing.
    fn start(&mut self, spec: FrameSpec) -> Result<(), ExportError>;

    fn submit_frame(&mut self, frame: &Frame<'_>) -> Result<(), ExportError>;

    /// Finish the capture and return the encoded bytes.
    fn finalize(&mut self) -> Result<Vec<u8>, ExportError>;
}

/// Frame rate and post-completion hold of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    pub fps: u32,
    /// How long the complete image stays on screen after the last block.
    pub hold: Duration,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            fps: 60,
            hold: Duration::from_millis(100),
        }
    }
}

impl ExportSettings {
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.fps == 0 {
            return Err(ExportError::InvalidSettings(
                "fps must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Nominal timestamp of frame `index`: `index / fps`, rounded down to
    /// the nanosecond.
    pub fn frame_time(&self, index: u64) -> Duration {
        let nanos = u128::from(index) * 1_000_000_000 / u128::from(self.fps);
        Duration::from_nanos(nanos as u64)
    }

    /// Frames showing the complete image after the reveal: `ceil(hold * fps)`,
    /// at least one.
    pub fn hold_frames(&self) -> u64 {
        let frames = (self.hold.as_nanos() * u128::from(self.fps)).div_ceil(1_000_000_000);
        (frames as u64).max(1)
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    /// Encoded artifact returned by the sink.
    pub bytes: Vec<u8>,
    /// Frames sampled while blocks were still appearing, including the
    /// first complete one.
    pub reveal_frames: u64,
    pub hold_frames: u64,
}

impl ExportOutput {
    pub fn total_frames(&self) -> u64 {
        self.reveal_frames + self.hold_frames
    }
}

/// Replays a reveal into a [`FrameSink`].
#[derive(Debug, Clone, Default)]
pub struct VideoExporter {
    settings: ExportSettings,
}

impl VideoExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Record the reveal of `image` into `sink`.
    ///
    /// The canvas starts black. Frame `k` shows every block scheduled by
    /// `k / fps`; after the first complete frame, the complete image is
    /// repeated for the hold period. Parameters are validated before the
    /// sink is started, and a sink that cannot start aborts the export.
    pub fn export<K: FrameSink + ?Sized>(
        &self,
        image: &DitheredImage,
        options: &RevealOptions,
        sink: &mut K,
    ) -> Result<ExportOutput, ExportError> {
        self.settings.validate()?;
        options.validate()?;

        let grid = BlockGrid::new(image.width(), image.height(), options.block_size)?;
        let mut state = RevealState::new(Duration::ZERO, options.duration, grid.total_blocks())?;
        let spec = FrameSpec {
            width: image.width(),
            height: image.height(),
            fps: self.settings.fps,
        };

        sink.start(spec)?;
        tracing::info!(
            width = spec.width,
            height = spec.height,
            fps = spec.fps,
            blocks = grid.total_blocks(),
            "Export started"
        );

        let mut canvas = Canvas::with_size(image.width(), image.height());
        let mut index = 0u64;
        loop {
            let timestamp = self.settings.frame_time(index);
            for rect in grid.rects(state.advance(timestamp)) {
                canvas
                    .blit(image, rect)
                    .map_err(|e| ExportError::Sink(e.to_string()))?;
            }
            sink.submit_frame(&Frame {
                index,
                timestamp,
                rgba: canvas.rgba(),
            })?;
            index += 1;
            if state.is_complete() {
                break;
            }
        }
        let reveal_frames = index;

        let hold_frames = self.settings.hold_frames();
        for _ in 0..hold_frames {
            sink.submit_frame(&Frame {
                index,
                timestamp: self.settings.frame_time(index),
                rgba: canvas.rgba(),
            })?;
            index += 1;
        }

        let bytes = sink.finalize()?;
        tracing::info!(
            frames = index,
            reveal_frames,
            hold_frames,
            bytes = bytes.len(),
            "Export finished"
        );
        Ok(ExportOutput {
            bytes,
            reveal_frames,
            hold_frames,
        })
    }
}

/// Keeps every frame in memory.
///
/// `finalize` returns the frames concatenated as raw RGBA.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    spec: Option<FrameSpec>,
    frames: Vec<Vec<u8>>,
    timestamps: Vec<Duration>,
    finalized: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec(&self) -> Option<FrameSpec> {
        self.spec
    }

    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    pub fn timestamps(&self) -> &[Duration] {
        &self.timestamps
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

impl FrameSink for MemorySink {
    fn start(&mut self, spec: FrameSpec) -> Result<(), ExportError> {
        self.spec = Some(spec);
        self.frames.clear();
        self.timestamps.clear();
        self.finalized = false;
        Ok(())
    }

    fn submit_frame(&mut self, frame: &Frame<'_>) -> Result<(), ExportError> {
        let Some(spec) = self.spec else {
            return Err(ExportError::Sink("frame submitted before start".to_string()));
        };
        if self.finalized {
            return Err(ExportError::Sink("sink already finalized".to_string()));
        }
        if frame.rgba.len() != spec.width * spec.height * 4 {
            return Err(ExportError::Sink(format!(
                "frame has {} bytes, expected {}",
                frame.rgba.len(),
                spec.width * spec.height * 4
            )));
        }
        self.frames.push(frame.rgba.to_vec());
        self.timestamps.push(frame.timestamp);
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>, ExportError> {
        if self.spec.is_none() {
            return Err(ExportError::Sink("sink was never started".to_string()));
        }
        self.finalized = true;
        Ok(self.frames.concat())
    }
}
