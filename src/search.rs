//! An agent to choose moves in connect-k games

use std::convert::TryFrom;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info, instrument, trace};

use crate::{
    board::{Board, Player},
    config::GameConfig,
    error::ConfigError,
    evaluator::Evaluator,
    win::has_win,
};

/// Base score of a position won by the searching player
pub const WIN_SCORE: i64 = 1_000_000_000_000;

const INFINITY: i64 = i64::MAX;

/// The outcome of a top-level search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    /// The chosen column, `None` only when no column is playable
    pub column: Option<usize>,
    pub score: i64,
}

/// How to pick between root moves with equal scores
#[derive(Clone, Debug)]
pub enum TieBreak {
    LowestColumn,
    /// Uniformly random among the tied columns
    Random(StdRng),
}

/// A depth-limited alpha-beta agent
///
/// # Position Scoring
/// Scores are always from the point of view of the player the search was
/// started for. A position where that player has a run of `k` scores
/// `WIN_SCORE + d`, where `d` is the search depth left when the win was
/// found, so nearer wins score higher. A position the opponent has won scores
/// `-(WIN_SCORE + d)`, and a full board without a run scores 0. Positions at
/// the depth limit are scored heuristically as the evaluator's score for the
/// player minus its score for the opponent, which the evaluator weights keep
/// well below `WIN_SCORE`.
#[derive(Clone, Debug)]
pub struct Searcher {
    config: GameConfig,
    evaluator: Evaluator,
    tie_break: TieBreak,
    pruning: bool,

    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` with the default heuristic weights
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_evaluator(config, Evaluator::default())
    }

    /// Creates a new `Searcher` with the given evaluator, rejecting weights
    /// whose heuristic scores could overlap terminal scores on this board
    pub fn with_evaluator(config: GameConfig, evaluator: Evaluator) -> Result<Self, ConfigError> {
        let bound = evaluator
            .max_magnitude(config.rows(), config.columns(), config.window())
            .saturating_mul(2);
        if bound >= WIN_SCORE {
            return Err(ConfigError::HeuristicOverflow { bound });
        }
        Ok(Self {
            config,
            evaluator,
            tie_break: TieBreak::LowestColumn,
            pruning: true,
            node_count: 0,
        })
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Breaks ties randomly with a generator seeded from `seed`
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_tie_break(TieBreak::Random(StdRng::seed_from_u64(seed)))
    }

    /// Enables or disables alpha-beta cutoffs. Without them the search is
    /// plain exhaustive minimax and returns the same result, slower.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Chooses the best column for `player` to play.
    ///
    /// Every legal column is tried in ascending order and searched to the
    /// configured depth. `board` is mutated during the search and restored
    /// before returning. A search depth of 0 is treated as 1.
    #[instrument(level = "debug", skip(self, board))]
    pub fn choose_move(&mut self, board: &mut Board, player: Player) -> SearchResult {
        self.node_count = 0;
        #[cfg(debug_assertions)]
        let snapshot = board.clone();

        let child_depth = self.config.max_depth().saturating_sub(1);
        // keep equal scores exact when they may be picked at random
        let keep_ties = matches!(self.tie_break, TieBreak::Random(_));

        let mut alpha = -INFINITY;
        let mut best_score = -INFINITY;
        let mut tied = Vec::new();

        for column in board.legal_moves() {
            board.drop_piece(column, player);
            let score = self.alpha_beta(board, player, child_depth, alpha, INFINITY, false);
            board.undo(column);
            debug!(column, score, "root move");

            if score > best_score {
                best_score = score;
                tied.clear();
                tied.push(column);
            } else if score == best_score {
                tied.push(column);
            }

            if self.pruning {
                alpha = if keep_ties {
                    best_score.saturating_sub(1)
                } else {
                    best_score
                };
            }
        }

        #[cfg(debug_assertions)]
        debug_assert_eq!(*board, snapshot, "search left the board modified");

        let column = match &mut self.tie_break {
            TieBreak::LowestColumn => tied.first().copied(),
            TieBreak::Random(rng) => tied.choose(rng).copied(),
        };
        let score = if column.is_some() { best_score } else { 0 };

        info!(?column, score, nodes = self.node_count, "search finished");
        SearchResult { column, score }
    }

    /// Scores `board` from the point of view of `player`, searching `depth`
    /// more plies. `maximizing` is true when `player` is the side to move.
    ///
    /// The board is restored before returning.
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        player: Player,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> i64 {
        self.node_count += 1;
        let opponent = player.opponent();
        let k = self.config.window();

        if has_win(board, player, k) {
            return WIN_SCORE + depth as i64;
        }
        if has_win(board, opponent, k) {
            return -(WIN_SCORE + depth as i64);
        }
        // also covers a board with no playable column
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return self.evaluator.score_position(board, player, k)
                - self.evaluator.score_position(board, opponent, k);
        }

        let mover = if maximizing { player } else { opponent };
        let mut value = if maximizing { -INFINITY } else { INFINITY };

        for column in board.legal_moves() {
            board.drop_piece(column, mover);
            let score = self.alpha_beta(board, player, depth - 1, alpha, beta, !maximizing);
            board.undo(column);

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }

            // the remaining columns cannot change the result
            if self.pruning && alpha >= beta {
                trace!(column, depth, "cutoff");
                break;
            }
        }
        value
    }

    /// Converts a search score to the number of moves the winning side needs
    /// to complete its run, or `None` if the score is heuristic.
    pub fn score_to_win_distance(&self, score: i64) -> Option<usize> {
        let magnitude = score.checked_abs()?;
        if magnitude < WIN_SCORE {
            return None;
        }
        let depth_left = u32::try_from(magnitude - WIN_SCORE).ok()?;
        let plies = self.config.max_depth().max(1).saturating_sub(depth_left) as usize;
        Some((plies + 1) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn searcher(depth: u32) -> Searcher {
        Searcher::new(GameConfig::new(4, 4, 3, depth).unwrap()).unwrap()
    }

    #[test]
    fn takes_immediate_win_at_any_depth() {
        let board = Board::parse(&[
            ".....", //
            ".....",
            ".....",
            "O....",
            "XX.O.",
        ])
        .unwrap();

        for depth in 1..=4 {
            let config = GameConfig::new(5, 5, 3, depth).unwrap();
            let mut searcher = Searcher::new(config).unwrap();
            let result = searcher.choose_move(&mut board.clone(), Player::One);

            assert_eq!(result.column, Some(2), "depth {}", depth);
            assert!(result.score >= WIN_SCORE);
            assert_eq!(searcher.score_to_win_distance(result.score), Some(1));
        }
    }

    #[test]
    fn blocks_opponent_threat() {
        let mut board = Board::parse(&[
            "....", //
            "....",
            "X...",
            "OO.X",
        ])
        .unwrap();

        let result = searcher(2).choose_move(&mut board, Player::One);
        assert_eq!(result.column, Some(2));
        assert!(result.score > -WIN_SCORE);
    }

    #[test]
    fn board_restored_after_search() {
        let mut board = Board::from_moves(4, 4, &[1, 2, 2, 0]).unwrap();
        let before = board.clone();

        searcher(4).choose_move(&mut board, Player::One);
        assert_eq!(board, before);
    }

    #[test]
    fn full_board_has_no_move() {
        let mut board = Board::parse(&[
            "XOXO", //
            "XOXO",
            "OXOX",
            "OXOX",
        ])
        .unwrap();

        let mut searcher = searcher(3);
        assert_eq!(
            searcher.choose_move(&mut board, Player::One),
            SearchResult {
                column: None,
                score: 0
            }
        );
        assert_eq!(
            searcher.alpha_beta(&mut board, Player::One, 3, -INFINITY, INFINITY, true),
            0
        );
    }

    #[test]
    fn depth_zero_scores_differential() {
        let mut board = Board::from_moves(4, 4, &[0]).unwrap();
        let evaluator = Evaluator::default();
        let expected = evaluator.score_position(&board, Player::Two, 3)
            - evaluator.score_position(&board, Player::One, 3);

        let score = searcher(1).alpha_beta(&mut board, Player::Two, 0, -INFINITY, INFINITY, true);
        assert_eq!(score, expected);
        assert!(score < 0);
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let board = Board::new(4, 4);

        let mut pruned = searcher(4);
        let mut full = searcher(4).with_pruning(false);
        let a = pruned.choose_move(&mut board.clone(), Player::One);
        let b = full.choose_move(&mut board.clone(), Player::One);

        assert_eq!(a, b);
        assert!(pruned.node_count < full.node_count);
    }

    #[test]
    fn seeded_tie_break_is_reproducible() {
        let board = Board::new(4, 5);
        let config = GameConfig::new(4, 5, 3, 2).unwrap();

        let first = Searcher::new(config)
            .unwrap()
            .with_seed(7)
            .choose_move(&mut board.clone(), Player::One);
        let second = Searcher::new(config)
            .unwrap()
            .with_seed(7)
            .choose_move(&mut board.clone(), Player::One);
        let lowest = Searcher::new(config)
            .unwrap()
            .choose_move(&mut board.clone(), Player::One);

        assert_eq!(first, second);
        assert_eq!(first.score, lowest.score);
    }

    #[test]
    fn win_distance_for_losses_and_heuristics() {
        let searcher = searcher(5);
        assert_eq!(searcher.score_to_win_distance(WIN_SCORE + 4), Some(1));
        assert_eq!(searcher.score_to_win_distance(-(WIN_SCORE + 3)), Some(1));
        assert_eq!(searcher.score_to_win_distance(WIN_SCORE + 2), Some(2));
        assert_eq!(searcher.score_to_win_distance(-(WIN_SCORE + 1)), Some(2));
        assert_eq!(searcher.score_to_win_distance(1_234), None);
        assert_eq!(searcher.score_to_win_distance(0), None);
    }

    #[test]
    fn out_of_range_scores_have_no_win_distance() {
        let searcher = searcher(5);
        assert_eq!(searcher.score_to_win_distance(i64::MAX), None);
        assert_eq!(searcher.score_to_win_distance(i64::MIN), None);
        assert_eq!(searcher.score_to_win_distance(-i64::MAX), None);
    }

    #[test]
    fn rejects_weights_that_reach_win_score() {
        let weights = crate::evaluator::Weights {
            win: WIN_SCORE,
            ..Default::default()
        };
        let evaluator = Evaluator::new(weights).unwrap();
        let config = GameConfig::new(4, 4, 3, 2).unwrap();
        assert!(matches!(
            Searcher::with_evaluator(config, evaluator),
            Err(ConfigError::HeuristicOverflow { .. })
        ));
    }
}
