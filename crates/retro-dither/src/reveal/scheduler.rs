//! Time-to-block mapping and per-reveal progress tracking.

use std::ops::Range;
use std::time::Duration;

use super::error::RevealError;

/// Number of blocks that should be visible `elapsed` into a reveal lasting
/// `duration`: `floor(total * min(elapsed, duration) / duration)`.
///
/// Computed in integer nanoseconds, so `elapsed == duration` always yields
/// exactly `total`. A zero `duration` counts as already finished.
pub fn target_block_count(elapsed: Duration, duration: Duration, total_blocks: usize) -> usize {
    if duration.is_zero() {
        return total_blocks;
    }
    let elapsed = elapsed.min(duration).as_nanos();
    let target = total_blocks as u128 * elapsed / duration.as_nanos();
    target as usize
}

/// Block indices that become visible when moving from `previously_revealed`
/// to `target`. Empty when `target` is not ahead.
pub fn blocks_to_reveal(previously_revealed: usize, target: usize) -> Range<usize> {
    previously_revealed..target.max(previously_revealed)
}

/// Progress of a single reveal.
///
/// `revealed` only ever grows and never exceeds `total_blocks`. Timestamps
/// are offsets on whatever monotonic clock the caller uses; an earlier
/// timestamp than one already seen simply reveals nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    started_at: Duration,
    duration: Duration,
    total_blocks: usize,
    revealed: usize,
}

impl RevealState {
    pub fn new(
        started_at: Duration,
        duration: Duration,
        total_blocks: usize,
    ) -> Result<Self, RevealError> {
        if duration.is_zero() {
            return Err(RevealError::InvalidDuration(duration));
        }
        Ok(Self {
            started_at,
            duration,
            total_blocks,
            revealed: 0,
        })
    }

    /// Move to `now` and return the indices that just became visible.
    pub fn advance(&mut self, now: Duration) -> Range<usize> {
        let elapsed = now.saturating_sub(self.started_at);
        let target = target_block_count(elapsed, self.duration, self.total_blocks);
        let range = blocks_to_reveal(self.revealed, target);
        self.revealed = range.end;
        range
    }

    #[inline]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    #[inline]
    pub fn total_blocks(&self) -> usize {
        self.total_blocks
    }

    #[inline]
    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total_blocks
    }

    /// Fraction of the duration elapsed at `now`, clamped to `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIX_SECONDS: Duration = Duration::from_millis(6000);

    #[test]
    fn test_target_endpoints() {
        assert_eq!(target_block_count(Duration::ZERO, SIX_SECONDS, 100), 0);
        assert_eq!(target_block_count(SIX_SECONDS, SIX_SECONDS, 100), 100);
        assert_eq!(
            target_block_count(Duration::from_secs(60), SIX_SECONDS, 100),
            100
        );
    }

    #[test]
    fn test_target_floors() {
        // 100 * 59 / 6000 = 0.98
        assert_eq!(
            target_block_count(Duration::from_millis(59), SIX_SECONDS, 100),
            0
        );
        assert_eq!(
            target_block_count(Duration::from_millis(60), SIX_SECONDS, 100),
            1
        );
        assert_eq!(
            target_block_count(Duration::from_millis(3000), SIX_SECONDS, 7),
            3
        );
    }

    #[test]
    fn test_target_monotonic() {
        let mut last = 0;
        for ms in 0..=6500 {
            let target = target_block_count(Duration::from_millis(ms), SIX_SECONDS, 37);
            assert!(target >= last);
            last = target;
        }
        assert_eq!(last, 37);
    }

    #[test]
    fn test_blocks_to_reveal() {
        assert_eq!(blocks_to_reveal(3, 7), 3..7);
        assert!(blocks_to_reveal(7, 7).is_empty());
        assert!(blocks_to_reveal(7, 3).is_empty());
    }

    #[test]
    fn test_state_offsets_from_start() {
        let start = Duration::from_secs(100);
        let mut state = RevealState::new(start, SIX_SECONDS, 10).unwrap();
        assert!(state.advance(Duration::from_secs(50)).is_empty());
        assert_eq!(state.advance(start + Duration::from_secs(3)), 0..5);
    }

    #[test]
    fn test_state_never_shrinks() {
        let mut state = RevealState::new(Duration::ZERO, SIX_SECONDS, 10).unwrap();
        assert_eq!(state.advance(Duration::from_secs(3)), 0..5);
        assert!(state.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(state.revealed(), 5);
        assert_eq!(state.advance(Duration::from_secs(9)), 5..10);
        assert!(state.is_complete());
        assert!(state.advance(Duration::from_secs(12)).is_empty());
    }

    #[test]
    fn test_progress_clamped() {
        let state = RevealState::new(Duration::from_secs(1), SIX_SECONDS, 10).unwrap();
        assert_eq!(state.progress(Duration::ZERO), 0.0);
        assert_eq!(state.progress(Duration::from_secs(4)), 0.5);
        assert_eq!(state.progress(Duration::from_secs(30)), 1.0);
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert_eq!(
            RevealState::new(Duration::ZERO, Duration::ZERO, 4),
            Err(RevealError::InvalidDuration(Duration::ZERO))
        );
    }
}
