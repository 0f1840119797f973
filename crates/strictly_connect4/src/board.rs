//! Fixed-size grid of marks.

use crate::error::BoardError;
use crate::types::Mark;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Columns on a classic connect-four board.
pub const CLASSIC_WIDTH: usize = 7;
/// Rows on a classic connect-four board.
pub const CLASSIC_HEIGHT: usize = 6;

/// A `width × height` connect-four board.
///
/// Row 0 is the top of the board and row `height - 1` the physical bottom,
/// so gravity pulls pieces toward larger row indices. Once a cell leaves
/// [`Mark::Empty`] it only returns there through [`Board::reset`].
///
/// Deserializing rejects a cell list that does not match the dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    width: usize,
    height: usize,
    /// Cells in row-major order.
    cells: Vec<Mark>,
}

/// Wire shape of a [`Board`], checked before it becomes one.
#[derive(Deserialize)]
struct BoardRepr {
    width: usize,
    height: usize,
    cells: Vec<Mark>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let expected = cell_count(repr.width, repr.height)?;
        if repr.cells.len() != expected {
            return Err(BoardError::CellCount {
                expected,
                actual: repr.cells.len(),
            });
        }
        Ok(Self {
            width: repr.width,
            height: repr.height,
            cells: repr.cells,
        })
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize, BoardError> {
    width
        .checked_mul(height)
        .ok_or(BoardError::TooLarge { width, height })
}

impl Board {
    /// Creates an empty board with the given dimensions.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`. Use [`Board::try_new`] for
    /// dimensions that have not been validated.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(board) => board,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates an empty board, failing with `TooLarge` if the cell count
    /// overflows `usize`.
    #[instrument]
    pub fn try_new(width: usize, height: usize) -> Result<Self, BoardError> {
        let count = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Mark::Empty; count],
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    fn index(&self, row: usize, column: usize) -> Result<usize, BoardError> {
        if row >= self.height || column >= self.width {
            return Err(BoardError::OutOfRange {
                row,
                column,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row * self.width + column)
    }

    /// Returns the mark at `(row, column)`.
    pub fn get(&self, row: usize, column: usize) -> Result<Mark, BoardError> {
        let idx = self.index(row, column)?;
        Ok(self.cells[idx])
    }

    /// Writes `mark` into an empty cell.
    ///
    /// # Errors
    ///
    /// `OutOfRange` outside the grid, `CellOccupied` if the cell already
    /// holds a mark. The board is untouched on error.
    #[instrument(skip(self))]
    pub fn set(&mut self, row: usize, column: usize, mark: Mark) -> Result<(), BoardError> {
        let idx = self.index(row, column)?;
        if !self.cells[idx].is_empty() {
            return Err(BoardError::CellOccupied { row, column });
        }
        self.cells[idx] = mark;
        Ok(())
    }

    /// Checks if no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|m| !m.is_empty())
    }

    /// Checks if the top cell of `column` is taken.
    ///
    /// Out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        !matches!(self.get(0, column), Ok(Mark::Empty))
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_empty()).count()
    }

    /// Clears every cell.
    #[instrument(skip(self), fields(width = self.width, height = self.height))]
    pub fn reset(&mut self) {
        self.cells.fill(Mark::Empty);
    }

    /// Formats the board as a human-readable string.
    ///
    /// One line per row, top row first, followed by a column index footer.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in self.cells.chunks(self.width.max(1)) {
            let line: Vec<String> = row.iter().map(|m| m.glyph().to_string()).collect();
            result.push_str(&line.join(" "));
            result.push('\n');
        }
        let footer: Vec<String> = (0..self.width).map(|c| (c % 10).to_string()).collect();
        result.push_str(&footer.join(" "));
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(CLASSIC_WIDTH, CLASSIC_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.width(), 7);
        assert_eq!(board.height(), 6);
        assert!(board.cells().iter().all(|m| m.is_empty()));
        assert!(!board.is_full());
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::default();
        board.set(5, 3, Player::A.mark()).unwrap();
        assert_eq!(board.get(5, 3), Ok(Mark::Occupied(Player::A)));
        assert_eq!(board.get(4, 3), Ok(Mark::Empty));
    }

    #[test]
    fn test_set_out_of_range() {
        let mut board = Board::default();
        assert!(matches!(
            board.set(6, 0, Player::A.mark()),
            Err(BoardError::OutOfRange { row: 6, .. })
        ));
        assert!(matches!(
            board.get(0, 7),
            Err(BoardError::OutOfRange { column: 7, .. })
        ));
    }

    #[test]
    fn test_set_occupied_cell_fails() {
        let mut board = Board::default();
        board.set(5, 0, Player::A.mark()).unwrap();
        assert_eq!(
            board.set(5, 0, Player::B.mark()),
            Err(BoardError::CellOccupied { row: 5, column: 0 })
        );
        // Clearing through set is also refused.
        assert!(board.set(5, 0, Mark::Empty).is_err());
        assert_eq!(board.get(5, 0), Ok(Player::A.mark()));
    }

    #[test]
    fn test_full_and_reset() {
        let mut board = Board::new(2, 2);
        for row in 0..2 {
            for column in 0..2 {
                board.set(row, column, Player::B.mark()).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.is_column_full(1));
        board.reset();
        assert_eq!(board.occupied(), 0);
        assert_eq!(board, Board::new(2, 2));
    }

    #[test]
    fn test_try_new_rejects_overflowing_dimensions() {
        assert_eq!(
            Board::try_new(usize::MAX, 2),
            Err(BoardError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );
        assert_eq!(Board::try_new(4, 3).unwrap(), Board::new(4, 3));
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn test_new_panics_on_overflow() {
        let _ = Board::new(usize::MAX, usize::MAX);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3, 2);
        board.set(1, 0, Player::A.mark()).unwrap();
        board.set(1, 1, Player::B.mark()).unwrap();
        assert_eq!(board.display(), ". . .\nA B .\n0 1 2");
    }
}
