use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Initial -> Active
/// - Initial -> Loss
/// - Active -> Win
/// - Active -> Loss
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// No cell opened yet; the next move performs the boundary reveal.
    Initial,
    /// Boundary reveal happened, regular moves accepted.
    Active,
    /// Terminal: every mine flagged.
    Win,
    /// Terminal: a mine was revealed or an out-of-range move was made.
    Loss,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Initial
    }
}

/// Player move kind accepted by [`Game::move_next`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MoveOp {
    Open,
    Mark,
}

/// Preset difficulty levels; the only supported board shapes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Normal,
    Expert,
}

impl Level {
    pub const fn grid_size(self) -> Coord2 {
        match self {
            Self::Beginner => (8, 8),
            Self::Normal => (14, 14),
            Self::Expert => (20, 20),
        }
    }

    pub const fn mine_coefficient(self) -> f32 {
        match self {
            Self::Beginner => 0.15,
            Self::Normal => 0.20,
            Self::Expert => 0.25,
        }
    }

    pub fn game_config(self) -> GameConfig {
        let size = self.grid_size();
        // round half-up, as the classic level tables do
        let mines = (f32::from(mult(size.0, size.1)) * self.mine_coefficient() + 0.5) as CellCount;
        GameConfig::new(size, mines)
    }
}

/// Externally visible face of one cell; base values only leak once revealed.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Open(u8),
    Mine,
}

/// Represents a game from the first reveal to a terminal state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    grid: Array2<Cell>,
    mine_count: CellCount,
    mines_remaining: Saturating<CellCount>,
    flags_remaining: Saturating<CellCount>,
    state: GameState,
}

impl Game {
    /// Starts a fresh game at the given level, mines placed from `seed`.
    pub fn create(level: Level, seed: u64) -> Result<Game> {
        let config = level.game_config();
        let grid = RandomGridGenerator::new(seed).generate(config)?;
        Self::from_grid(grid, config.mines)
    }

    /// Wraps a pre-built grid; for tests and scripted boards.
    pub fn from_grid(grid: Array2<Cell>, mine_count: CellCount) -> Result<Game> {
        if grid.is_empty() {
            return Err(GameError::InvalidBoardShape);
        }
        if usize::from(mine_count) >= grid.len() {
            return Err(GameError::TooManyMines);
        }
        Ok(Self {
            grid,
            mine_count,
            mines_remaining: Saturating(mine_count),
            flags_remaining: Saturating(mine_count),
            state: Default::default(),
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.grid.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    /// Flags still available to place.
    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining.0
    }

    pub fn is_valid_coordinates(&self, row: Coord, col: Coord) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    /// Single state-transition entry point.
    ///
    /// Returns `false` to signal "stop requesting moves": a terminal state
    /// was reached (by this move or earlier) or the coordinates were out of
    /// range. Out-of-range coordinates force a loss rather than no-op.
    pub fn move_next(&mut self, operation: MoveOp, row: Coord, col: Coord) -> bool {
        if !self.is_valid_coordinates(row, col) {
            log::debug!("out of range move at ({}, {}), forcing loss", row, col);
            self.set_state(GameState::Loss);
            return false;
        }

        match self.state {
            GameState::Win | GameState::Loss => false,
            // the first move always opens, whatever was requested
            GameState::Initial => self.open_boundary_cells((row, col)),
            GameState::Active => match operation {
                MoveOp::Mark => self.toggle_flag((row, col)),
                MoveOp::Open => self.open_cell((row, col)),
            },
        }
    }

    /// Read-only copy for rendering; never the live grid.
    pub fn snapshot(&self) -> Array2<CellView> {
        self.grid.map(|&cell| match (cell.is_opened(), cell.is_marked()) {
            (true, _) => match cell.adjacent_mines() {
                Some(count) => CellView::Open(count),
                None => CellView::Mine,
            },
            (false, true) => CellView::Flagged,
            (false, false) => CellView::Hidden,
        })
    }

    /// Every cell's true face, for the end-of-game board dump.
    pub fn revealed_snapshot(&self) -> Array2<CellView> {
        self.grid.map(|&cell| match cell.adjacent_mines() {
            Some(count) => CellView::Open(count),
            None => CellView::Mine,
        })
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            log::debug!("game state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    /// First-move reveal: grows Chebyshev rings around the chosen cell,
    /// spending a budget of `mine_count` reveals on hidden non-mine cells.
    ///
    /// This is deliberately not a connected flood fill of the zero region;
    /// it guarantees that `mine_count` cells become visible around the
    /// click point (fewer only when the board runs out of safe cells).
    fn open_boundary_cells(&mut self, center: Coord2) -> bool {
        if self.cell_at(center).is_mine() {
            self.set_state(GameState::Loss);
            return false;
        }

        let (rows, cols) = self.size();
        let mut budget = self.mine_count;
        // a ring this deep covers the whole board, going deeper cannot
        // reveal anything new
        let max_deep = rows.max(cols);
        let mut deep: Coord = 1;

        while budget > 0 && deep <= max_deep {
            let row_start = center.0.saturating_sub(deep);
            let row_end = center.0.saturating_add(deep).min(rows - 1);
            let col_start = center.1.saturating_sub(deep);
            let col_end = center.1.saturating_add(deep).min(cols - 1);

            for row in row_start..=row_end {
                for col in col_start..=col_end {
                    if budget == 0 {
                        break;
                    }
                    let cell = self.cell_at((row, col));
                    if cell.is_mine() {
                        continue;
                    }
                    if let Some(opened) = cell.open() {
                        self.grid[(row, col).to_nd_index()] = opened;
                        budget -= 1;
                        log::trace!("boundary reveal at ({}, {})", row, col);
                    }
                }
            }

            deep += 1;
        }

        self.set_state(GameState::Active);
        true
    }

    /// Toggle-flag move; see the mark semantics on [`Cell`] for the
    /// per-cell rules.
    fn toggle_flag(&mut self, coords: Coord2) -> bool {
        let cell = self.cell_at(coords);

        // a revealed cell cannot carry a flag
        if cell.is_opened() {
            return true;
        }

        if cell.is_marked() {
            let Some(unmarked) = cell.unmark() else {
                return true;
            };
            self.grid[coords.to_nd_index()] = unmarked;
            self.flags_remaining += 1;
            if cell.is_mine() {
                self.mines_remaining += 1;
            }
            return true;
        }

        // silently refuse to over-flag
        if self.flags_remaining.0 == 0 {
            return true;
        }

        let Some(marked) = cell.mark() else {
            return true;
        };
        self.grid[coords.to_nd_index()] = marked;
        self.flags_remaining -= 1;
        if cell.is_mine() {
            self.mines_remaining -= 1;
            if self.mines_remaining.0 == 0 {
                self.set_state(GameState::Win);
                return false;
            }
        }
        true
    }

    /// Open move on an active board; a single open never cascades.
    fn open_cell(&mut self, coords: Coord2) -> bool {
        let mut cell = self.cell_at(coords);

        // opening a flagged cell implicitly unflags it first, refunding
        // the flag and the mine accounting
        if cell.is_marked()
            && let Some(unmarked) = cell.unmark()
        {
            self.grid[coords.to_nd_index()] = unmarked;
            self.flags_remaining += 1;
            if cell.is_mine() {
                self.mines_remaining += 1;
            }
            cell = unmarked;
        }

        if cell.is_mine() {
            self.set_state(GameState::Loss);
            return false;
        }

        if let Some(opened) = cell.open() {
            self.grid[coords.to_nd_index()] = opened;
        }
        true
    }
}
