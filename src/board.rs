//! Grid state for a connect-k game under gravity

use std::fmt;
use std::ops::Range;

use crate::error::BoardError;

/// One of the two sides of a game. Player One always moves first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1-based number for display
    pub fn number(self) -> usize {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_player(&self, player: Player) -> bool {
        *self == Cell::from(player)
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
            Cell::Empty => '.',
        }
    }

    fn from_symbol(symbol: char) -> Result<Self, BoardError> {
        match symbol {
            'X' | 'x' => Ok(Cell::PlayerOne),
            'O' | 'o' => Ok(Cell::PlayerTwo),
            '.' | ' ' | '_' => Ok(Cell::Empty),
            other => Err(BoardError::UnknownCell(other)),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// The four scan directions a run of pieces can lie along
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// top-left to bottom-right
    DownRight,
    /// top-right to bottom-left
    DownLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DownRight,
        Direction::DownLeft,
    ];

    // (row step, column step)
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
        }
    }
}

/// A `rows` x `columns` grid where row 0 is the top.
///
/// Pieces only enter through [`drop_piece`](Board::drop_piece) and leave
/// through [`undo`](Board::undo), so every column is filled bottom-up with no
/// gaps.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>, // cells are stored row-major, top-to-bottom
    heights: Vec<usize>,
    num_moves: usize,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    /// Panics if either dimension is zero. Dimensions are expected to be
    /// validated by [`GameConfig`](crate::config::GameConfig) beforehand.
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(
            rows >= 1 && columns >= 1,
            "board dimensions must be at least 1x1, got {}x{}",
            rows,
            columns
        );
        Self {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
            heights: vec![0; columns],
            num_moves: 0,
        }
    }

    /// Builds a position by dropping pieces for Player One and Player Two in
    /// turn, starting with Player One. Columns are 0-indexed.
    pub fn from_moves(rows: usize, columns: usize, moves: &[usize]) -> Result<Self, BoardError> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::Empty);
        }
        let mut board = Self::new(rows, columns);
        let mut player = Player::One;
        for &column in moves {
            if !board.drop_piece(column, player) {
                return Err(BoardError::IllegalMove { column, player });
            }
            player = player.opponent();
        }
        Ok(board)
    }

    /// Builds a position from a picture of the grid, top row first, using
    /// `X` for Player One, `O` for Player Two and `.` for an empty cell.
    pub fn parse(lines: &[&str]) -> Result<Self, BoardError> {
        let rows = lines.len();
        let columns = lines.first().map_or(0, |line| line.chars().count());
        if rows == 0 || columns == 0 {
            return Err(BoardError::Empty);
        }

        let mut board = Self::new(rows, columns);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(BoardError::RaggedRow {
                    row,
                    found,
                    expected: columns,
                });
            }
            for (column, symbol) in line.chars().enumerate() {
                let cell = Cell::from_symbol(symbol)?;
                let idx = board.index(row, column);
                board.cells[idx] = cell;
            }
        }

        // recover the column heights, rejecting pieces above a gap
        for column in 0..columns {
            let filled = (0..rows)
                .filter(|&row| !board.get(row, column).is_empty())
                .count();
            let gap_free = (rows - filled..rows).all(|row| !board.get(row, column).is_empty());
            if !gap_free {
                return Err(BoardError::Floating(column));
            }
            board.heights[column] = filled;
            board.num_moves += filled;
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of pieces on the board
    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// Number of pieces in `column`
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[self.index(row, column)]
    }

    /// Number of cells owned by `player`
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|cell| cell.is_player(player)).count()
    }

    /// True iff `column` is on the board and its top cell is empty
    pub fn is_valid_move(&self, column: usize) -> bool {
        column < self.columns && self.get(0, column).is_empty()
    }

    /// Places a piece for `player` in the lowest empty cell of `column`.
    ///
    /// Returns `false` and leaves the board untouched if the column is out of
    /// range or full; callers are expected to check
    /// [`is_valid_move`](Board::is_valid_move) first.
    pub fn drop_piece(&mut self, column: usize, player: Player) -> bool {
        if !self.is_valid_move(column) {
            return false;
        }
        let row = self.rows - 1 - self.heights[column];
        let idx = self.index(row, column);
        self.cells[idx] = Cell::from(player);
        self.heights[column] += 1;
        self.num_moves += 1;
        true
    }

    /// Clears the topmost piece of `column` and returns what was there.
    ///
    /// # Panics
    /// Panics if `column` is out of range or empty.
    pub fn undo(&mut self, column: usize) -> Cell {
        assert!(
            column < self.columns && self.heights[column] > 0,
            "undo on empty column {}",
            column
        );
        let row = self.rows - self.heights[column];
        let idx = self.index(row, column);
        let cell = self.cells[idx];
        self.cells[idx] = Cell::Empty;
        self.heights[column] -= 1;
        self.num_moves -= 1;
        cell
    }

    pub fn is_full(&self) -> bool {
        (0..self.columns).all(|column| !self.is_valid_move(column))
    }

    /// All playable columns in ascending order
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&column| self.is_valid_move(column))
            .collect()
    }

    /// Top-left corners of every window of length `k` along `direction` that
    /// fits entirely on the board, in row-major order.
    pub fn window_starts(
        &self,
        direction: Direction,
        k: usize,
    ) -> impl Iterator<Item = (usize, usize)> {
        let (rows, columns) = self.start_ranges(direction, k);
        rows.flat_map(move |row| columns.clone().map(move |column| (row, column)))
    }

    /// The `k` cells starting at (`row`, `column`) along `direction`.
    ///
    /// The start must come from [`window_starts`](Board::window_starts).
    pub fn window(
        &self,
        row: usize,
        column: usize,
        direction: Direction,
        k: usize,
    ) -> impl Iterator<Item = Cell> + '_ {
        let (row_step, column_step) = direction.step();
        (0..k as isize).map(move |i| {
            let r = (row as isize + row_step * i) as usize;
            let c = (column as isize + column_step * i) as usize;
            self.get(r, c)
        })
    }

    fn start_ranges(&self, direction: Direction, k: usize) -> (Range<usize>, Range<usize>) {
        let span = k.saturating_sub(1);
        // a window that would cross an edge has no valid start
        let short_rows = 0..self.rows.saturating_sub(span);
        let short_columns = 0..self.columns.saturating_sub(span);
        match direction {
            Direction::Horizontal => (0..self.rows, short_columns),
            Direction::Vertical => (short_rows, 0..self.columns),
            Direction::DownRight => (short_rows, short_columns),
            Direction::DownLeft => (short_rows, span..self.columns),
        }
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            write!(f, "|")?;
            for column in 0..self.columns {
                write!(f, "{}|", self.get(row, column).symbol())?;
            }
            writeln!(f)?;
        }
        for column in 1..=self.columns {
            write!(f, " {}", column % 10)?;
        }
        Ok(())
    }
}
