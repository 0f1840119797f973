//! Frame loop pairing the engine with the simulated animator.

use crate::animator::FallAnimator;
use crate::cli::FrameArgs;
use anyhow::{Result, bail};
use std::mem::discriminant;
use std::time::Duration;
use strictly_connect4::{DropResponse, PhaseSnapshot, TurnEngine};
use tracing::{debug, info, instrument, warn};

/// Owns one engine and plays the renderer's part for it.
#[derive(Debug)]
pub struct Driver {
    engine: TurnEngine,
    animator: FallAnimator,
    frame: Duration,
    max_frames: u64,
    frames_run: u64,
}

impl Driver {
    /// Creates a driver around `engine`.
    pub fn new(engine: TurnEngine, frames: FrameArgs) -> Self {
        Self {
            engine,
            animator: FallAnimator::new(frames.frames_per_row),
            frame: Duration::from_millis(frames.frame_ms),
            max_frames: frames.max_frames,
            frames_run: 0,
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Requests a drop and starts the fall animation if it was accepted.
    #[instrument(skip(self))]
    pub fn drop_piece(&mut self, column: usize) -> Result<DropResponse> {
        let response = self.engine.request_drop(column)?;
        match response {
            DropResponse::Accepted { row, .. } => self.animator.start(row),
            DropResponse::Rejected(reason) => warn!(%reason, "Drop rejected"),
        }
        Ok(response)
    }

    /// Renders one frame: animation first, then the engine tick.
    pub fn frame(&mut self) -> Result<PhaseSnapshot> {
        if self.frames_run >= self.max_frames {
            bail!("Gave up after {} frames", self.max_frames);
        }
        self.frames_run += 1;

        let before = discriminant(self.engine.phase());
        self.animator.advance();
        let snapshot = self.engine.tick_with(self.frame, &self.animator)?;
        if discriminant(snapshot.phase()) != before {
            debug!(frame = self.frames_run, phase = %snapshot.phase(), "Phase changed");
        }
        Ok(snapshot)
    }

    /// Runs frames until `done` holds for the latest snapshot.
    #[instrument(skip(self, done))]
    pub fn run_until(&mut self, done: impl Fn(&PhaseSnapshot) -> bool) -> Result<PhaseSnapshot> {
        loop {
            let snapshot = self.frame()?;
            if done(&snapshot) {
                return Ok(snapshot);
            }
        }
    }

    /// Runs frames until the dropped piece has been committed.
    pub fn settle(&mut self) -> Result<PhaseSnapshot> {
        self.run_until(|s| s.phase().accepts_input() || s.phase().is_terminal())
    }

    /// Runs frames until a finished game has restarted.
    pub fn wait_for_restart(&mut self) -> Result<PhaseSnapshot> {
        let snapshot = self.run_until(|s| s.phase().accepts_input())?;
        info!(frames = self.frames_run, "Restart observed");
        Ok(snapshot)
    }
}
