//! Monotonic board invariant: the board is exactly its drop history.

use super::Invariant;
use crate::board::Board;
use crate::engine::TurnEngine;
use crate::rules::{Landing, resolve};

/// Invariant: every occupied cell was placed by a recorded drop.
///
/// Replays the history onto an empty board, requiring each drop to land
/// where gravity puts it and on an empty cell. The replayed board must
/// match the live one, so no mark was overwritten, cleared or placed
/// out of band.
pub struct MonotonicBoardInvariant;

impl Invariant<TurnEngine> for MonotonicBoardInvariant {
    fn holds(engine: &TurnEngine) -> bool {
        let live = engine.board();
        let mut replayed = Board::new(live.width(), live.height());

        for record in engine.history() {
            match resolve(&replayed, record.column) {
                Ok(Landing::Row(row)) if row == record.row => {}
                _ => return false,
            }
            if replayed
                .set(record.row, record.column, record.player.mark())
                .is_err()
            {
                return false;
            }
        }

        replayed == *live
    }

    fn description() -> &'static str {
        "Board matches its drop history (marks never overwritten or cleared)"
    }
}
