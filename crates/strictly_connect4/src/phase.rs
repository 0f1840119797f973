//! Engine phases and the read-only snapshot handed to renderers.

use crate::types::{Cell, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discrete state of the turn engine.
///
/// `since` values are readings of the engine clock, which advances only
/// by the deltas passed to `tick`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for `player` to choose a column.
    AwaitingTurn {
        /// Player on turn.
        player: Player,
    },
    /// A piece is falling; the renderer decides when it has landed.
    Dropping {
        /// Player who dropped.
        player: Player,
        /// Column the piece falls through.
        column: usize,
        /// Row it will rest on.
        row: usize,
    },
    /// Piece has landed and is about to be written to the board.
    ///
    /// Transient: the engine commits within the same tick.
    Resolved {
        /// Player who dropped.
        player: Player,
        /// Landing row.
        row: usize,
        /// Landing column.
        column: usize,
    },
    /// `player` completed a run.
    Won {
        /// The winner.
        player: Player,
        /// Cells of the winning run.
        line: Vec<Cell>,
        /// Clock reading when the game ended.
        since: Duration,
    },
    /// Board filled without a run.
    Draw {
        /// Clock reading when the game ended.
        since: Duration,
    },
    /// Board is being cleared for a new game.
    ///
    /// Transient: the engine returns to `AwaitingTurn` within the same call.
    RestartPending {
        /// Clock reading when the restart began.
        since: Duration,
    },
}

impl Phase {
    /// Checks if drop requests are accepted in this phase.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Phase::AwaitingTurn { .. })
    }

    /// Checks if the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Won { .. } | Phase::Draw { .. })
    }

    /// Clock reading at which a terminal phase began.
    pub fn ended_at(&self) -> Option<Duration> {
        match self {
            Phase::Won { since, .. } | Phase::Draw { since } => Some(*since),
            _ => None,
        }
    }

    /// Returns the winner if the game was won.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Phase::Won { player, .. } => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingTurn { player } => write!(f, "Player {player} to move"),
            Phase::Dropping { player, column, .. } => {
                write!(f, "Player {player} dropping into column {column}")
            }
            Phase::Resolved { player, row, column } => {
                write!(f, "Player {player} landed at ({row}, {column})")
            }
            Phase::Won { player, .. } => write!(f, "Player {player} wins"),
            Phase::Draw { .. } => write!(f, "Draw"),
            Phase::RestartPending { .. } => write!(f, "Restarting"),
        }
    }
}

/// Immutable view of the engine for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PhaseSnapshot {
    /// Active phase.
    phase: Phase,
    /// Player on turn, or the player who moved last once the game ended.
    active_player: Player,
    /// Drops committed since the last restart.
    drops: usize,
    /// Time left before an automatic restart, while the game is over.
    restart_in: Option<Duration>,
}

impl PhaseSnapshot {
    pub(crate) fn new(
        phase: Phase,
        active_player: Player,
        drops: usize,
        restart_in: Option<Duration>,
    ) -> Self {
        Self {
            phase,
            active_player,
            drops,
            restart_in,
        }
    }
}
