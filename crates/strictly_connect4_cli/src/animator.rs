//! Stand-in for the renderer's falling-piece animation.

use strictly_connect4::AnimationGate;
use tracing::{debug, instrument};

/// Counts frames until a dropped piece reaches its row.
///
/// A piece entering at the top passes `row + 1` rows before resting, each
/// taking `frames_per_row` frames, so deeper landings take longer like
/// they do on screen.
#[derive(Debug, Clone, Copy)]
pub struct FallAnimator {
    frames_per_row: u32,
    remaining: u32,
}

impl FallAnimator {
    /// Creates an animator with no piece in flight.
    pub fn new(frames_per_row: u32) -> Self {
        Self {
            frames_per_row,
            remaining: 0,
        }
    }

    /// Starts a piece falling toward `row`.
    #[instrument(skip(self))]
    pub fn start(&mut self, row: usize) {
        let rows = u32::try_from(row).unwrap_or(u32::MAX).saturating_add(1);
        self.remaining = rows.saturating_mul(self.frames_per_row);
        debug!(frames = self.remaining, "Piece falling");
    }

    /// Moves the piece one frame closer to rest.
    pub fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

impl AnimationGate for FallAnimator {
    fn piece_at_rest(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rests_after_row_scaled_frames() {
        let mut animator = FallAnimator::new(2);
        animator.start(2);
        for _ in 0..5 {
            animator.advance();
            assert!(!animator.piece_at_rest());
        }
        animator.advance();
        assert!(animator.piece_at_rest());
    }

    #[test]
    fn test_zero_frames_lands_immediately() {
        let mut animator = FallAnimator::new(0);
        animator.start(5);
        assert!(animator.piece_at_rest());
    }
}
