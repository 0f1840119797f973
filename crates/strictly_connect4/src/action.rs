//! First-class drop actions.
//!
//! A drop request is the player's intent; a drop record is what the engine
//! committed once the piece came to rest.

use crate::types::{Cell, Player};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A player asking to drop a piece into a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct DropRequest {
    /// The player whose turn it is.
    pub player: Player,
    /// Target column.
    pub column: usize,
}

impl std::fmt::Display for DropRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> column {}", self.player, self.column)
    }
}

/// Why a drop request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum RejectReason {
    /// Target column has no empty cell left.
    #[display("Column {_0} is full")]
    ColumnFull(usize),

    /// A drop is animating or the game is over.
    #[display("Engine is not accepting drops right now")]
    NotAcceptingInput,

    /// The request came from the player who is not on turn.
    #[display("It's not {_0}'s turn")]
    WrongPlayer(Player),
}

/// Answer to a drop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropResponse {
    /// The piece is now falling toward `row`.
    Accepted {
        /// Player who dropped.
        player: Player,
        /// Column the piece falls through.
        column: usize,
        /// Row the piece will rest on.
        row: usize,
    },
    /// Nothing changed.
    Rejected(RejectReason),
}

impl DropResponse {
    /// Checks if the request started a drop.
    pub fn is_accepted(&self) -> bool {
        matches!(self, DropResponse::Accepted { .. })
    }
}

/// A committed drop, kept in the engine's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct DropRecord {
    /// Player whose mark was written.
    pub player: Player,
    /// Row the mark landed on.
    pub row: usize,
    /// Column the mark was dropped into.
    pub column: usize,
}

impl DropRecord {
    /// Board cell this drop occupies.
    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.column)
    }
}

impl std::fmt::Display for DropRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.cell())
    }
}
