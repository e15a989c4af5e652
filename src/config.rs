//! Validated game settings: board size, run length and search depth

use crate::error::ConfigError;

/// Default board height in tiles
pub const DEFAULT_ROWS: usize = 6;
/// Default board width in tiles
pub const DEFAULT_COLUMNS: usize = 7;
/// Default run length needed to win
pub const DEFAULT_WINDOW: usize = 4;
/// Default search depth in plies
pub const DEFAULT_DEPTH: u32 = 5;

/// Dimensions, run length and search depth for one game, fixed for its
/// lifetime.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GameConfig {
    rows: usize,
    columns: usize,
    window: usize,
    max_depth: u32,
}

impl GameConfig {
    /// Validates and creates a configuration.
    ///
    /// Rejects empty boards, a window outside `1..=max(rows, columns)` and a
    /// zero search depth.
    pub fn new(
        rows: usize,
        columns: usize,
        window: usize,
        max_depth: u32,
    ) -> Result<Self, ConfigError> {
        if rows == 0 || columns == 0 {
            return Err(ConfigError::ZeroDimension { rows, columns });
        }
        let max = rows.max(columns);
        if window == 0 || window > max {
            return Err(ConfigError::WindowOutOfRange { window, max });
        }
        if max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(Self {
            rows,
            columns,
            window,
            max_depth,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The run length `k` needed to win
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            window: DEFAULT_WINDOW,
            max_depth: DEFAULT_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classic_connect_four() {
        let config = GameConfig::default();
        assert_eq!(GameConfig::new(6, 7, 4, 5), Ok(config));
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(
            GameConfig::new(0, 7, 4, 5),
            Err(ConfigError::ZeroDimension {
                rows: 0,
                columns: 7
            })
        );
    }

    #[test]
    fn window_bounded_by_larger_dimension() {
        assert!(GameConfig::new(3, 8, 8, 2).is_ok());
        assert_eq!(
            GameConfig::new(3, 8, 9, 2),
            Err(ConfigError::WindowOutOfRange { window: 9, max: 8 })
        );
        assert_eq!(
            GameConfig::new(3, 8, 0, 2),
            Err(ConfigError::WindowOutOfRange { window: 0, max: 8 })
        );
    }

    #[test]
    fn rejects_zero_depth() {
        assert_eq!(GameConfig::new(4, 4, 3, 0), Err(ConfigError::ZeroDepth));
    }
}
