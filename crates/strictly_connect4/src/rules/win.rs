//! N-in-a-row detection.
//!
//! All four directions share one scan: a direction is just a `(row, column)`
//! step, and a run is `run_length` cells reached by repeating that step
//! from an origin cell.

use crate::board::Board;
use crate::types::{Cell, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Direction a run is traced in from its origin cell.
///
/// Declaration order is the order directions are tried at each origin.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Bottom to top along a column, the way pieces stack.
    Vertical,
    /// Toward the bottom-right corner.
    DiagonalDownRight,
    /// Toward the bottom-left corner.
    DiagonalDownLeft,
}

impl Direction {
    /// Row and column step for one cell along this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (-1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }

    /// Cell `steps` cells away from `origin`, if it is on `board`.
    fn offset(self, board: &Board, origin: Cell, steps: usize) -> Option<Cell> {
        let (dr, dc) = self.delta();
        let steps = isize::try_from(steps).ok()?;
        let row = origin.row.checked_add_signed(dr.checked_mul(steps)?)?;
        let column = origin.column.checked_add_signed(dc.checked_mul(steps)?)?;
        (row < board.height() && column < board.width()).then_some(Cell::new(row, column))
    }
}

/// Result of scanning a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinOutcome {
    /// No run yet and empty cells remain.
    Ongoing,
    /// `player` owns the run covering `line`, listed from its origin.
    Win {
        /// Owner of the run.
        player: Player,
        /// Cells of the run.
        line: Vec<Cell>,
    },
    /// Board is full without a run.
    Draw,
}

impl WinOutcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            WinOutcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Checks if the scan ended the game.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WinOutcome::Ongoing)
    }
}

/// Returns the run of `run_length` same-player cells starting at `origin`.
///
/// The far end is bounds-checked before any cell is read, so runs never
/// wrap around an edge.
pub fn run_from(
    board: &Board,
    origin: Cell,
    direction: Direction,
    run_length: usize,
) -> Option<(Player, Vec<Cell>)> {
    if run_length == 0 {
        return None;
    }
    direction.offset(board, origin, run_length - 1)?;

    let player = board.get(origin.row, origin.column).ok()?.player()?;
    let mut line = Vec::with_capacity(run_length);
    for step in 0..run_length {
        let cell = direction.offset(board, origin, step)?;
        if board.get(cell.row, cell.column).ok()?.player() != Some(player) {
            return None;
        }
        line.push(cell);
    }
    Some((player, line))
}

/// Scans the whole board for a run of `run_length` identical marks.
///
/// Origins are visited top-to-bottom, left-to-right; at each origin the
/// directions are tried in [`Direction`] declaration order. The first run
/// found is returned. With no run, the outcome is [`WinOutcome::Draw`] if the
/// board is full and [`WinOutcome::Ongoing`] otherwise.
#[instrument(skip(board), fields(width = board.width(), height = board.height()))]
pub fn scan(board: &Board, run_length: usize) -> WinOutcome {
    for row in 0..board.height() {
        for column in 0..board.width() {
            let origin = Cell::new(row, column);
            for direction in <Direction as strum::IntoEnumIterator>::iter() {
                if let Some((player, line)) = run_from(board, origin, direction, run_length) {
                    debug!(%player, %direction, %origin, "Run found");
                    return WinOutcome::Win { player, line };
                }
            }
        }
    }

    if board.is_full() {
        debug!("Board full without a run");
        WinOutcome::Draw
    } else {
        WinOutcome::Ongoing
    }
}
