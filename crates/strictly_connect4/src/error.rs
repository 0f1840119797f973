//! Error types for board access, drop requests and engine ticks.

use derive_more::{Display, Error, From};

/// Board contract violation.
///
/// Reaching one of these through the engine means drop resolution and
/// commit sequencing disagree about the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Coordinate lies outside the grid.
    #[display("Cell ({row}, {column}) is outside the {width}x{height} board")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        column: usize,
        /// Board width.
        width: usize,
        /// Board height.
        height: usize,
    },

    /// Cell already holds a mark.
    #[display("Cell ({row}, {column}) is already occupied")]
    CellOccupied {
        /// Occupied row.
        row: usize,
        /// Occupied column.
        column: usize,
    },

    /// Dimensions whose cell count overflows `usize`.
    #[display("A {width}x{height} board is too large")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Serialized cells do not fill the stated dimensions.
    #[display("Board needs {expected} cells, got {actual}")]
    CellCount {
        /// `width * height`.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },
}

/// Error returned when a drop targets a column that does not exist.
///
/// Column mapping happens upstream of the engine, so this is an
/// integration bug rather than a gameplay outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DropError {
    /// Column index is not in `0..width`.
    #[display("Column {column} is invalid (board has {width} columns)")]
    InvalidColumn {
        /// Requested column.
        column: usize,
        /// Board width.
        width: usize,
    },
}

/// Error surfaced while the engine advances a frame.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum EngineError {
    /// Commit hit a board contract violation.
    #[display("Board error: {_0}")]
    #[from]
    Board(BoardError),

    /// A post-commit invariant failed.
    #[display("Invariant violation: {_0}")]
    InvariantViolation(#[error(not(source))] String),
}
