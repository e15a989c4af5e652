//! A single game session: whose turn it is and whether the game has ended

use crate::{
    board::{Board, Player},
    config::GameConfig,
    error::MoveError,
    win::has_win,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Player),
    Draw,
}

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    to_move: Player,
    state: GameState,
    history: Vec<usize>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: Board::new(config.rows(), config.columns()),
            to_move: Player::One,
            state: GameState::Playing,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Columns played so far, 0-indexed
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Plays `column` (0-indexed) for the side to move and returns the new
    /// state of the game.
    pub fn play_checked(&mut self, column: usize) -> Result<GameState, MoveError> {
        if self.state != GameState::Playing {
            return Err(MoveError::GameOver);
        }
        if column >= self.board.columns() {
            return Err(MoveError::OutOfRange {
                column: column + 1,
                columns: self.board.columns(),
            });
        }
        if !self.board.drop_piece(column, self.to_move) {
            return Err(MoveError::ColumnFull(column + 1));
        }
        self.history.push(column);

        self.state = if has_win(&self.board, self.to_move, self.config.window()) {
            GameState::Won(self.to_move)
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = self.to_move.opponent();
        Ok(self.state)
    }
}
