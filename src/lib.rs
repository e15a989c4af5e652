//! An agent for playing or analysing generalised 'Connect 4' games
//!
//! The board can be any size and the number of pieces in a row needed to win
//! (`k`) is configurable. The agent uses a depth-limited alpha-beta game tree
//! search with a sliding-window heuristic to pick a move.
//!
//! # Basic Usage
//!
//! ```
//! use connectk_ai::{Board, GameConfig, Player, Searcher};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let config = GameConfig::new(6, 7, 4, 4)?;
//! let mut board = Board::from_moves(6, 7, &[0, 6, 1, 6, 2])?;
//!
//! // Player Two must block the bottom row
//! let mut searcher = Searcher::new(config)?;
//! let result = searcher.choose_move(&mut board, Player::Two);
//!
//! assert_eq!(result.column, Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod board;

pub mod config;

pub mod error;

pub mod evaluator;

pub mod game;

pub mod search;

pub mod win;


pub use board::{Board, Cell, Direction, Player};
pub use config::GameConfig;
pub use error::{BoardError, ConfigError, MoveError};
pub use evaluator::{Evaluator, Weights};
pub use game::{Game, GameState};
pub use search::{SearchResult, Searcher, TieBreak, WIN_SCORE};
pub use win::{has_win, winner};

// the default heuristic weights must stay strictly ordered, and far below a
// terminal score
const_assert!(evaluator::WIN_WINDOW_SCORE > evaluator::NEAR_WIN_SCORE);
const_assert!(evaluator::NEAR_WIN_SCORE > evaluator::TWO_SCORE);
const_assert!(evaluator::TWO_SCORE > evaluator::BLOCK_PENALTY);
const_assert!(evaluator::BLOCK_PENALTY > 0);
const_assert!(search::WIN_SCORE >= 10_000_000_000);
const_assert!(search::WIN_SCORE > 1000 * evaluator::WIN_WINDOW_SCORE);
