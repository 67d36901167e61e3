#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod cell;
mod error;
mod game;
mod generator;
mod types;

/// Board shape plus mine count, the generator input.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, mult(rows, cols));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Rejection-sampling placement needs at least one permanently free
    /// cell, so a mine count reaching the cell count is a config error.
    pub fn validate(&self) -> Result<()> {
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_needs_a_free_cell() {
        assert!(GameConfig::new((3, 3), 8).validate().is_ok());
        assert_eq!(
            GameConfig::new((3, 3), 9).validate().unwrap_err(),
            GameError::TooManyMines
        );
    }

    #[test]
    fn config_clamps_degenerate_sizes() {
        let config = GameConfig::new((0, 5), 0);

        assert_eq!(config.size, (1, 5));
        assert_eq!(config.mines, 1);
    }
}
