//! Progressive reveal onto an interactive display.
//!
//! [`LiveRenderer`] is a plain state machine advanced by [`LiveRenderer::tick`]
//! with a caller-supplied timestamp. [`LiveRenderer::run_realtime`] is one
//! possible driver, feeding it wall-clock ticks from a tokio interval.

use std::sync::Arc;
use std::time::{Duration, Instant};

use retro_dither::{BlockGrid, DitheredImage, RevealOptions, RevealState};

use crate::error::RenderError;
use crate::rendering::DisplaySurface;

/// Where the renderer is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    Running(RevealState),
    Done,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No reveal is active.
    Idle,
    /// More blocks remain.
    Continue { revealed: usize, total: usize },
    /// Every block is visible.
    Finished,
}

/// Drives one display surface through block reveals, one at a time.
pub struct LiveRenderer<S: DisplaySurface> {
    surface: S,
    image: Option<Arc<DitheredImage>>,
    grid: Option<BlockGrid>,
    phase: RevealPhase,
    clock: Instant,
}

impl<S: DisplaySurface> LiveRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            image: None,
            grid: None,
            phase: RevealPhase::Idle,
            clock: Instant::now(),
        }
    }

    /// Time since this renderer was created, the clock used by
    /// [`start_now`](Self::start_now) and [`run_realtime`](Self::run_realtime).
    pub fn now(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn phase(&self) -> &RevealPhase {
        &self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, RevealPhase::Running(_))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Begin revealing `image` at time `now`.
    ///
    /// Any reveal in progress is cancelled first. The surface is acquired
    /// and cleared to black before the first block appears.
    pub fn start(
        &mut self,
        image: Arc<DitheredImage>,
        options: &RevealOptions,
        now: Duration,
    ) -> Result<(), RenderError> {
        options.validate()?;
        self.cancel();

        let grid = BlockGrid::new(image.width(), image.height(), options.block_size)?;
        let state = RevealState::new(now, options.duration, grid.total_blocks())?;

        self.surface.acquire(image.width(), image.height())?;
        self.surface.present()?;

        tracing::info!(
            width = image.width(),
            height = image.height(),
            blocks = grid.total_blocks(),
            duration_ms = options.duration.as_millis() as u64,
            "Starting reveal"
        );

        self.image = Some(image);
        self.grid = Some(grid);
        self.phase = RevealPhase::Running(state);
        Ok(())
    }

    /// [`start`](Self::start) at the renderer's current clock time.
    pub fn start_now(
        &mut self,
        image: Arc<DitheredImage>,
        options: &RevealOptions,
    ) -> Result<(), RenderError> {
        let now = self.now();
        self.start(image, options, now)
    }

    /// Blit the blocks that became eligible by `now`.
    ///
    /// A surface failure cancels the reveal and is returned once.
    pub fn tick(&mut self, now: Duration) -> Result<TickOutcome, RenderError> {
        let state = match &mut self.phase {
            RevealPhase::Idle => return Ok(TickOutcome::Idle),
            RevealPhase::Done => return Ok(TickOutcome::Finished),
            RevealPhase::Running(state) => state,
        };
        let (Some(image), Some(grid)) = (self.image.as_deref(), self.grid.as_ref()) else {
            return Err(RenderError::NotConverted);
        };

        let range = state.advance(now);
        let revealed = state.revealed();
        let total = state.total_blocks();
        let complete = state.is_complete();

        if !range.is_empty() {
            let blitted = grid
                .rects(range.clone())
                .try_for_each(|rect| self.surface.blit(image, rect))
                .and_then(|()| self.surface.present());
            if let Err(e) = blitted {
                tracing::warn!(%e, "Display failed, cancelling reveal");
                self.phase = RevealPhase::Idle;
                return Err(e.into());
            }
            tracing::trace!(from = range.start, to = range.end, "Revealed blocks");
        }

        if complete {
            tracing::info!(blocks = total, "Reveal complete");
            self.phase = RevealPhase::Done;
            return Ok(TickOutcome::Finished);
        }
        Ok(TickOutcome::Continue { revealed, total })
    }

    /// Stop the active reveal. Blocks already shown stay on the surface.
    pub fn cancel(&mut self) {
        if let RevealPhase::Running(state) = &self.phase {
            tracing::debug!(
                revealed = state.revealed(),
                total = state.total_blocks(),
                "Cancelling reveal"
            );
            self.phase = RevealPhase::Idle;
        }
    }

    /// Cancel and drop the cached image, e.g. after the source changed.
    pub fn invalidate(&mut self) {
        self.cancel();
        self.phase = RevealPhase::Idle;
        self.image = None;
        self.grid = None;
    }

    /// Cancel and hand the display back.
    pub fn release(&mut self) -> Result<(), RenderError> {
        self.cancel();
        self.surface.release()?;
        Ok(())
    }

    /// Tick against the wall clock every `frame_interval` until the reveal
    /// finishes or no reveal is active.
    ///
    /// Dropping the returned future stops ticking; call
    /// [`cancel`](Self::cancel) afterwards to discard the reveal.
    pub async fn run_realtime(&mut self, frame_interval: Duration) -> Result<(), RenderError> {
        let mut interval = tokio::time::interval(frame_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let now = self.now();
            match self.tick(now)? {
                TickOutcome::Continue { .. } => {}
                TickOutcome::Finished | TickOutcome::Idle => return Ok(()),
            }
        }
    }
}
