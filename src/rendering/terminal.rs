//! Live preview in a true-color terminal.
//!
//! Each character cell shows two vertically stacked pixels: the upper one as
//! the foreground of an upper-half-block glyph, the lower one as the cell
//! background. Images larger than the terminal are sampled down by an
//! integer step.

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use retro_dither::{BlockRect, DitheredImage};

use super::canvas::Canvas;
use super::surface::DisplaySurface;
use crate::error::SurfaceError;

const UPPER_HALF: char = '\u{2580}';

/// Terminal display surface
pub struct TerminalSurface {
    out: Stdout,
    canvas: Canvas,
    step: usize,
    /// Cell rows touched since the last present
    dirty_rows: Vec<bool>,
    alternate_screen: bool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            canvas: Canvas::new(),
            step: 1,
            dirty_rows: Vec::new(),
            alternate_screen: false,
        }
    }

    fn cell_rows(&self) -> usize {
        self.canvas.height().div_ceil(2 * self.step)
    }

    fn cell_cols(&self) -> usize {
        self.canvas.width().div_ceil(self.step)
    }

    fn draw_row(&mut self, row: usize) -> io::Result<()> {
        let top_y = 2 * row * self.step;
        let bottom_y = top_y + self.step;
        queue!(self.out, MoveTo(0, row as u16))?;
        for col in 0..self.cell_cols() {
            let x = col * self.step;
            let top = self.canvas.pixel(x, top_y);
            queue!(
                self.out,
                SetForegroundColor(Color::Rgb {
                    r: top.r,
                    g: top.g,
                    b: top.b,
                })
            )?;
            if bottom_y < self.canvas.height() {
                let bottom = self.canvas.pixel(x, bottom_y);
                queue!(
                    self.out,
                    SetBackgroundColor(Color::Rgb {
                        r: bottom.r,
                        g: bottom.g,
                        b: bottom.b,
                    })
                )?;
            } else {
                queue!(self.out, SetBackgroundColor(Color::Reset))?;
            }
            queue!(self.out, Print(UPPER_HALF))?;
        }
        queue!(self.out, ResetColor)?;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.alternate_screen {
            execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
            self.alternate_screen = false;
        }
        Ok(())
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest integer step that fits `width x height` pixels into
/// `cols x rows` cells at two pixels per cell vertically.
fn sampling_step(width: usize, height: usize, cols: usize, rows: usize) -> usize {
    let cols = cols.max(1);
    let rows = rows.max(1);
    width.div_ceil(cols).max(height.div_ceil(2 * rows)).max(1)
}

impl DisplaySurface for TerminalSurface {
    fn acquire(&mut self, width: usize, height: usize) -> Result<(), SurfaceError> {
        if !self.out.is_terminal() {
            return Err(SurfaceError::Unavailable(
                "stdout is not a terminal".to_string(),
            ));
        }
        let (cols, rows) = terminal::size()
            .map_err(|e| SurfaceError::Unavailable(format!("cannot query terminal size: {e}")))?;

        if !self.alternate_screen {
            execute!(self.out, EnterAlternateScreen, Hide)?;
            self.alternate_screen = true;
        }
        execute!(self.out, Clear(ClearType::All))?;

        self.canvas.acquire(width, height)?;
        self.step = sampling_step(width, height, usize::from(cols), usize::from(rows));
        self.dirty_rows = vec![true; self.cell_rows()];
        tracing::debug!(cols, rows, step = self.step, "Acquired terminal");
        Ok(())
    }

    fn blit(&mut self, image: &DitheredImage, rect: BlockRect) -> Result<(), SurfaceError> {
        self.canvas.blit(image, rect)?;
        let first = rect.y / (2 * self.step);
        let last = (rect.y + rect.height).saturating_sub(1) / (2 * self.step);
        for row in first..=last.min(self.dirty_rows.len().saturating_sub(1)) {
            self.dirty_rows[row] = true;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        for row in 0..self.dirty_rows.len() {
            if std::mem::take(&mut self.dirty_rows[row]) {
                self.draw_row(row)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn release(&mut self) -> Result<(), SurfaceError> {
        self.canvas.release()?;
        self.restore()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
