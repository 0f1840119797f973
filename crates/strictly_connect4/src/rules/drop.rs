//! Gravity drop resolution.

use crate::board::Board;
use crate::error::DropError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where a piece dropped into a column comes to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Landing {
    /// Lowest empty row in the column.
    Row(usize),
    /// Every cell in the column is occupied.
    NoSpace,
}

/// Finds the row a piece dropped into `column` lands on.
///
/// Scans from the bottom row upward and returns the first empty cell.
/// Never mutates the board.
///
/// # Errors
///
/// Returns [`DropError::InvalidColumn`] when `column >= board.width()`.
#[instrument(skip(board), fields(width = board.width()))]
pub fn resolve(board: &Board, column: usize) -> Result<Landing, DropError> {
    if column >= board.width() {
        return Err(DropError::InvalidColumn {
            column,
            width: board.width(),
        });
    }

    let landing = (0..board.height())
        .rev()
        .find(|&row| matches!(board.get(row, column), Ok(mark) if mark.is_empty()))
        .map_or(Landing::NoSpace, Landing::Row);

    debug!(?landing, "Resolved drop");
    Ok(landing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_empty_column_lands_at_bottom() {
        let board = Board::default();
        assert_eq!(resolve(&board, 3), Ok(Landing::Row(5)));
    }

    #[test]
    fn test_stacks_on_existing_pieces() {
        let mut board = Board::default();
        board.set(5, 2, Player::A.mark()).unwrap();
        board.set(4, 2, Player::B.mark()).unwrap();
        assert_eq!(resolve(&board, 2), Ok(Landing::Row(3)));
    }

    #[test]
    fn test_full_column_has_no_space() {
        let mut board = Board::default();
        for row in 0..6 {
            board.set(row, 0, Player::A.mark()).unwrap();
        }
        assert_eq!(resolve(&board, 0), Ok(Landing::NoSpace));
    }

    #[test]
    fn test_invalid_column_is_not_clamped() {
        let board = Board::default();
        assert_eq!(
            resolve(&board, 7),
            Err(DropError::InvalidColumn { column: 7, width: 7 })
        );
    }

    #[test]
    fn test_resolve_does_not_mutate() {
        let board = Board::default();
        let before = board.clone();
        let _ = resolve(&board, 1);
        assert_eq!(board, before);
    }
}
