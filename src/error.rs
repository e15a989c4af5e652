//! Error types for board construction, game configuration and move input
//!
//! The search core itself never fails: an illegal drop is reported by
//! [`Board::drop_piece`](crate::board::Board::drop_piece) returning `false`.
//! These types cover the places where untrusted input enters the crate.

use crate::board::Player;

/// Errors raised when a [`GameConfig`](crate::config::GameConfig) or a set of
/// heuristic weights is rejected before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board dimensions must be at least 1x1, got {rows}x{columns}")]
    ZeroDimension { rows: usize, columns: usize },

    #[error("window size {window} out of range, must be between 1 and {max}")]
    WindowOutOfRange { window: usize, max: usize },

    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("heuristic weights must satisfy win > near-win > two > block > 0 and center >= 0")]
    WeightOrdering,

    #[error("heuristic scores may reach {bound}, which overlaps terminal scores")]
    HeuristicOverflow { bound: i64 },
}

/// Errors raised when a move is rejected by a [`Game`](crate::game::Game).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Invalid move, column {column} out of range. Columns must be between 1 and {columns}")]
    OutOfRange { column: usize, columns: usize },

    #[error("Invalid move, column {0} full")]
    ColumnFull(usize),

    #[error("Invalid move, the game is already over")]
    GameOver,
}

/// Errors raised when building a [`Board`](crate::board::Board) from a move
/// list or a textual picture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("could not parse '{0}' as a cell")]
    UnknownCell(char),

    #[error("column {0} has a piece floating above an empty cell")]
    Floating(usize),

    #[error("column {column} is not playable for {player:?}")]
    IllegalMove { column: usize, player: Player },
}
