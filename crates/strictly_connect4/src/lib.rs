//! Strictly Connect4 - rendering-independent connect-four engine
//!
//! Gravity drops, N-in-a-row detection and a frame-driven turn engine,
//! with no opinion about how pieces are drawn or animated.
//!
//! # Architecture
//!
//! - **Board**: fixed `width × height` grid of marks
//! - **Rules**: pure drop resolution and run scanning over a borrowed board
//! - **TurnEngine**: owns board and phase; consumes drop requests and one
//!   tick per frame, publishes snapshots
//! - **AnimationGate**: the single bit the renderer reports back (has the
//!   falling piece landed?)
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use strictly_connect4::{Phase, Player, TurnEngine};
//!
//! let mut engine = TurnEngine::default();
//! assert!(engine.request_drop(3).unwrap().is_accepted());
//!
//! // The renderer animates the fall and reports when it has landed.
//! engine.tick(Duration::from_millis(16), false).unwrap();
//! let snapshot = engine.tick(Duration::from_millis(16), true).unwrap();
//! assert_eq!(snapshot.phase(), &Phase::AwaitingTurn { player: Player::B });
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config;
mod engine;
mod error;
mod gate;
mod phase;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{DropRecord, DropRequest, DropResponse, RejectReason};
pub use board::{Board, CLASSIC_HEIGHT, CLASSIC_WIDTH};
pub use config::{
    CLASSIC_RESTART_DELAY_SECS, CLASSIC_RUN_LENGTH, ConfigError, EngineConfig,
};
pub use engine::TurnEngine;
pub use error::{BoardError, DropError, EngineError};
pub use gate::AnimationGate;
pub use phase::{Phase, PhaseSnapshot};
pub use rules::{Direction, Landing, WinOutcome};
pub use types::{Cell, Mark, Player};
