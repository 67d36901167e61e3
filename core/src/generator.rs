use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

pub trait GridGenerator {
    fn generate(self, config: GameConfig) -> Result<Array2<Cell>>;
}

/// Purely random mine placement via rejection sampling, matching the
/// classic generator: pick uniform positions and skip the ones that are
/// already mines until the requested count is placed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GameConfig) -> Result<Array2<Cell>> {
        use rand::prelude::*;

        // The rejection loop has no iteration bound, so a board without at
        // least one free cell must be refused up front.
        config.validate()?;

        let (rows, cols) = config.size;
        let mut grid: Array2<Cell> = Array2::default(config.size.to_nd_index());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut remaining = config.mines;
        while remaining > 0 {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            if grid[coords.to_nd_index()].is_mine() {
                continue;
            }
            grid[coords.to_nd_index()] = Cell::new_mine();
            remaining -= 1;
        }
        log::debug!("placed {} mines on a {}x{} grid", config.mines, rows, cols);

        derive_adjacency(&mut grid);
        Ok(grid)
    }
}

/// Builds a grid with mines at exactly the given positions; for tests and
/// scripted boards.
pub fn grid_from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Array2<Cell>> {
    let mut grid: Array2<Cell> = Array2::default(size.to_nd_index());

    for &coords in mine_coords {
        if coords.0 >= size.0 || coords.1 >= size.1 {
            return Err(GameError::InvalidCoords);
        }
        grid[coords.to_nd_index()] = Cell::new_mine();
    }

    derive_adjacency(&mut grid);
    Ok(grid)
}

/// Second generation pass: every mine bumps the count of each in-bounds
/// neighbor that is not itself a mine.
fn derive_adjacency(grid: &mut Array2<Cell>) {
    let mine_coords: Vec<Coord2> = grid
        .indexed_iter()
        .filter(|(_, cell)| cell.is_mine())
        .map(|((row, col), _)| (row.try_into().unwrap(), col.try_into().unwrap()))
        .collect();

    for coords in mine_coords {
        for neighbor in grid.iter_neighbors(coords) {
            let cell = grid[neighbor.to_nd_index()];
            if !cell.is_mine() {
                grid[neighbor.to_nd_index()] = cell.increment_adjacency();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine_count(grid: &Array2<Cell>) -> usize {
        grid.iter().filter(|cell| cell.is_mine()).count()
    }

    #[test]
    fn generates_requested_mine_count() {
        let config = GameConfig::new((8, 8), 10);

        let grid = RandomGridGenerator::new(42).generate(config).unwrap();

        assert_eq!(grid.dim(), (8, 8));
        assert_eq!(mine_count(&grid), 10);
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let config = GameConfig::new((14, 14), 39);

        let first = RandomGridGenerator::new(7).generate(config).unwrap();
        let second = RandomGridGenerator::new(7).generate(config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn refuses_full_board() {
        let config = GameConfig::new_unchecked((3, 3), 9);

        let result = RandomGridGenerator::new(0).generate(config);

        assert_eq!(result.unwrap_err(), GameError::TooManyMines);
    }

    #[test]
    fn adjacency_counts_match_neighboring_mines() {
        let grid = grid_from_mine_coords((4, 3), &[(0, 1), (1, 1), (2, 1), (3, 1)]).unwrap();

        for ((row, col), cell) in grid.indexed_iter() {
            let coords: Coord2 = (row.try_into().unwrap(), col.try_into().unwrap());
            let expected: u8 = grid
                .iter_neighbors(coords)
                .filter(|&pos| grid[pos.to_nd_index()].is_mine())
                .count()
                .try_into()
                .unwrap();

            match cell.adjacent_mines() {
                Some(count) => assert_eq!(count, expected, "at {:?}", coords),
                None => assert!(cell.is_mine()),
            }
        }
    }

    #[test]
    fn every_generated_cell_starts_hidden_and_unflagged() {
        let config = GameConfig::new((8, 8), 10);

        let grid = RandomGridGenerator::new(3).generate(config).unwrap();

        assert!(grid.iter().all(|cell| !cell.is_opened() && !cell.is_marked()));
    }

    #[test]
    fn mine_coords_outside_grid_are_rejected() {
        let result = grid_from_mine_coords((2, 2), &[(2, 0)]);

        assert_eq!(result.unwrap_err(), GameError::InvalidCoords);
    }
}
