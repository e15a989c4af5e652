//! Sliding-window heuristic scoring of non-terminal positions
//!
//! Every window of `k` cells along a row, column or diagonal contributes a
//! score depending on how close it is to becoming a run for the player being
//! evaluated, and how close it is for the opponent. Pieces in the center
//! column earn a flat bonus on top.

use crate::board::{Board, Cell, Direction, Player};
use crate::error::ConfigError;

/// Score of a window filled entirely by the evaluated player
pub const WIN_WINDOW_SCORE: i64 = 1_000_000;
/// Score of a window one piece short of a run, the rest empty
pub const NEAR_WIN_SCORE: i64 = 1_000;
/// Score of a window two pieces short of a run, the rest empty
pub const TWO_SCORE: i64 = 40;
/// Penalty for a window one piece short of a run for the opponent
pub const BLOCK_PENALTY: i64 = 4;
/// Bonus per piece in the center column
pub const CENTER_BONUS: i64 = 3;

/// Tunable heuristic weights.
///
/// Must keep `win > near_win > two > block > 0` so a completed run always
/// outweighs any partial pattern.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Weights {
    pub win: i64,
    pub near_win: i64,
    pub two: i64,
    pub block: i64,
    pub center: i64,
}

impl Weights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.win > self.near_win
            && self.near_win > self.two
            && self.two > self.block
            && self.block > 0
            && self.center >= 0;
        if ordered {
            Ok(())
        } else {
            Err(ConfigError::WeightOrdering)
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            win: WIN_WINDOW_SCORE,
            near_win: NEAR_WIN_SCORE,
            two: TWO_SCORE,
            block: BLOCK_PENALTY,
            center: CENTER_BONUS,
        }
    }
}

/// Scores positions for either player with a fixed set of [`Weights`]
#[derive(Copy, Clone, Debug, Default)]
pub struct Evaluator {
    weights: Weights,
}

impl Evaluator {
    pub fn new(weights: Weights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Heuristic value of a single window for `player`. The window length is
    /// taken as the run length `k`.
    pub fn score_window(&self, window: &[Cell], player: Player) -> i64 {
        let k = window.len();
        let opponent = player.opponent();
        let mine = window.iter().filter(|cell| cell.is_player(player)).count();
        let theirs = window.iter().filter(|cell| cell.is_player(opponent)).count();
        let empty = k - mine - theirs;

        let mut score = 0;
        if mine == k {
            score += self.weights.win;
        } else if mine + 1 == k && empty == 1 {
            score += self.weights.near_win;
        } else if mine + 2 == k && empty == 2 {
            score += self.weights.two;
        }

        if theirs + 1 == k && empty == 1 {
            score -= self.weights.block;
        }
        score
    }

    /// Sum of [`score_window`](Evaluator::score_window) over every window of
    /// length `k` in all four directions, plus the center column bonus.
    pub fn score_position(&self, board: &Board, player: Player, k: usize) -> i64 {
        let mut score = 0;

        if k > 0 {
            let mut window = Vec::with_capacity(k);
            for &direction in Direction::ALL.iter() {
                for (row, column) in board.window_starts(direction, k) {
                    window.clear();
                    window.extend(board.window(row, column, direction, k));
                    score += self.score_window(&window, player);
                }
            }
        }

        let center = board.columns() / 2;
        let center_count = (0..board.rows())
            .filter(|&row| board.get(row, center).is_player(player))
            .count();
        score + center_count as i64 * self.weights.center
    }

    /// Upper bound on the magnitude of
    /// [`score_position`](Evaluator::score_position) for any position on a
    /// `rows` x `columns` board.
    pub fn max_magnitude(&self, rows: usize, columns: usize, k: usize) -> i64 {
        let short_rows = (rows + 1).saturating_sub(k);
        let short_columns = (columns + 1).saturating_sub(k);
        let windows = rows * short_columns + short_rows * columns + 2 * short_rows * short_columns;

        let per_window = self.weights.win.max(self.weights.block);
        (windows as i64)
            .saturating_mul(per_window)
            .saturating_add((rows as i64).saturating_mul(self.weights.center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::board::Cell::{Empty as E, PlayerOne as X, PlayerTwo as O};

    #[test]
    fn window_patterns() {
        let eval = Evaluator::default();

        assert_eq!(eval.score_window(&[X, X, X, X], Player::One), WIN_WINDOW_SCORE);
        assert_eq!(eval.score_window(&[X, E, X, X], Player::One), NEAR_WIN_SCORE);
        assert_eq!(eval.score_window(&[E, X, E, X], Player::One), TWO_SCORE);
        assert_eq!(eval.score_window(&[O, O, E, O], Player::One), -BLOCK_PENALTY);
        assert_eq!(eval.score_window(&[E, E, E, X], Player::One), 0);
        assert_eq!(eval.score_window(&[E, E, E, E], Player::One), 0);
    }

    #[test]
    fn mixed_window_scores_zero() {
        let eval = Evaluator::default();
        assert_eq!(eval.score_window(&[X, X, O, E], Player::One), 0);
        assert_eq!(eval.score_window(&[X, X, O, X], Player::One), 0);
        assert_eq!(eval.score_window(&[X, X, O, X], Player::Two), 0);
    }

    #[test]
    fn window_scoring_is_relative_to_player() {
        let eval = Evaluator::default();
        assert_eq!(eval.score_window(&[O, O, O], Player::Two), WIN_WINDOW_SCORE);
        assert_eq!(eval.score_window(&[O, O, E], Player::Two), NEAR_WIN_SCORE);
        assert_eq!(eval.score_window(&[X, X, E], Player::Two), -BLOCK_PENALTY);
    }

    #[test]
    fn single_piece_in_corner() {
        let eval = Evaluator::default();
        let board = Board::from_moves(4, 4, &[0]).unwrap();

        // one horizontal, one vertical and one down-left window hold the piece
        assert_eq!(eval.score_position(&board, Player::One, 3), 3 * TWO_SCORE);
        assert_eq!(eval.score_position(&board, Player::Two, 3), 0);
    }

    #[test]
    fn center_column_bonus() {
        let eval = Evaluator::default();
        let board = Board::from_moves(4, 4, &[2]).unwrap();

        // two horizontal, one vertical and one down-right window
        assert_eq!(
            eval.score_position(&board, Player::One, 3),
            4 * TWO_SCORE + CENTER_BONUS
        );
    }

    #[test]
    fn score_position_ignores_labels() {
        let eval = Evaluator::default();
        let board = Board::parse(&["....", "..X.", ".OX.", "XOOX"]).unwrap();
        let swapped = Board::parse(&["....", "..O.", ".XO.", "OXXO"]).unwrap();

        assert_eq!(
            eval.score_position(&board, Player::One, 3),
            eval.score_position(&swapped, Player::Two, 3)
        );
        assert_eq!(
            eval.score_position(&board, Player::Two, 3),
            eval.score_position(&swapped, Player::One, 3)
        );
    }

    #[test]
    fn bound_covers_full_board() {
        let eval = Evaluator::default();
        let mut board = Board::new(4, 4);
        for column in 0..4 {
            for _ in 0..4 {
                board.drop_piece(column, Player::One);
            }
        }
        let score = eval.score_position(&board, Player::One, 3);
        assert!(score <= eval.max_magnitude(4, 4, 3));
        assert_eq!(score, eval.max_magnitude(4, 4, 3));
    }

    #[test]
    fn weights_must_be_ordered() {
        assert!(Weights::default().validate().is_ok());

        let inverted = Weights {
            two: 2,
            block: 4,
            ..Weights::default()
        };
        assert_eq!(inverted.validate(), Err(ConfigError::WeightOrdering));
        assert!(Evaluator::new(inverted).is_err());
    }
}
