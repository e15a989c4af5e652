//! Detection of k-in-a-row along rows, columns and both diagonals

use crate::board::{Board, Direction, Player};

/// Checks whether `player` has `k` consecutive pieces anywhere on the board.
///
/// Every window of length `k` that fits on the grid is tested in each of the
/// four directions; the scan stops at the first complete window. A `k` larger
/// than both dimensions never matches, and a `k` of zero is treated as no win.
pub fn has_win(board: &Board, player: Player, k: usize) -> bool {
    if k == 0 {
        return false;
    }
    Direction::ALL.iter().any(|&direction| {
        board
            .window_starts(direction, k)
            .any(|(row, column)| {
                board
                    .window(row, column, direction, k)
                    .all(|cell| cell.is_player(player))
            })
    })
}

/// The player holding a k-in-a-row, checking Player One first
pub fn winner(board: &Board, k: usize) -> Option<Player> {
    [Player::One, Player::Two]
        .iter()
        .copied()
        .find(|&player| has_win(board, player, k))
}
