use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::*;

/// The minefield grid. Cells are stored row-major with dimension
/// `(height, width)`; all public coordinates are `(x, y)` pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mines: CellCount,
}

impl Board {
    /// Builds a board for `config`, placing `config.mines` mines at uniformly
    /// random positions by rejection sampling: an already-mined position is
    /// redrawn. Terminates because the mine count is checked to be strictly
    /// below the cell count.
    pub fn generate(config: GameConfig, rng: &mut impl Rng) -> Result<Self> {
        let mut board = Self::empty(config.size);
        if config.mines >= board.total_cells() {
            return Err(GameError::TooManyMines);
        }

        for _ in 0..config.mines {
            board.place_mine(rng);
        }
        board.mines = config.mines;
        log::debug!("generated {:?} board with {} mines", config.size, config.mines);
        Ok(board)
    }

    /// Builds a board with mines at the given coordinates, duplicates
    /// collapsed. Mainly for tests and callers that want a fixed layout.
    pub fn with_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::empty(size);

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            if board[coords].is_mine() {
                continue;
            }
            board.set_mine_at(coords);
            board.mines += 1;
        }

        if board.mines >= board.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(board)
    }

    fn empty(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mines: 0,
        }
    }

    fn place_mine(&mut self, rng: &mut impl Rng) {
        let (width, height) = self.size();
        loop {
            let coords = (rng.gen_range(0..width), rng.gen_range(0..height));
            if self[coords].is_mine() {
                continue;
            }
            self.set_mine_at(coords);
            return;
        }
    }

    fn set_mine_at(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].set_mine();
        for pos in self.iter_neighbors(coords) {
            self.cells[pos.to_nd_index()].bump_count();
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Bounds-checked cell accessor.
    pub fn at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    /// Coordinates must have been validated by the caller.
    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Board size as `(width, height)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (cols.try_into().unwrap(), rows.try_into().unwrap())
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    /// Raw adjacency values, row-major. Debug rendering aid.
    pub fn value_grid(&self) -> Array2<u8> {
        self.cells.map(|cell| cell.adjacent_mines())
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn generate_places_exact_mine_count_with_correct_values() {
        let config = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let board = Board::generate(config, &mut rng).unwrap();

        let mut mines = 0;
        for y in 0..board.height() {
            for x in 0..board.width() {
                let cell = board[(x, y)];
                if cell.is_mine() {
                    mines += 1;
                    continue;
                }
                let adjacent = board
                    .iter_neighbors((x, y))
                    .filter(|&pos| board[pos].is_mine())
                    .count();
                assert_eq!(
                    usize::from(cell.adjacent_mines()),
                    adjacent,
                    "wrong count at ({}, {})",
                    x,
                    y
                );
            }
        }
        assert_eq!(mines, config.mines);
        assert_eq!(board.mine_count(), config.mines);
    }

    #[test]
    fn single_center_mine_gives_all_neighbors_value_one() {
        let board = Board::with_mines((3, 3), &[(1, 1)]).unwrap();

        assert!(board[(1, 1)].is_mine());
        for pos in board.iter_neighbors((1, 1)) {
            assert_eq!(board[pos].adjacent_mines(), 1, "at {:?}", pos);
        }
    }

    #[test]
    fn too_many_mines_is_a_configuration_error() {
        let config = GameConfig::new((3, 3), 9);
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            Board::generate(config, &mut rng).unwrap_err(),
            GameError::TooManyMines
        );
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let board = Board::with_mines((9, 9), &[]).unwrap();

        assert_eq!(board.at((9, 0)).unwrap_err(), GameError::InvalidCoords);
        assert_eq!(board.at((0, 9)).unwrap_err(), GameError::InvalidCoords);
        assert!(board.at((8, 8)).is_ok());
    }

    #[test]
    fn with_mines_rejects_out_of_bounds_mines() {
        assert_eq!(
            Board::with_mines((3, 3), &[(3, 0)]).unwrap_err(),
            GameError::InvalidCoords
        );
    }

    #[test]
    fn value_grid_is_row_major() {
        let board = Board::with_mines((3, 2), &[(0, 0)]).unwrap();
        let values = board.value_grid();

        assert_eq!(values.dim(), (2, 3));
        assert_eq!(values[[0, 0]], MINE_VALUE);
        assert_eq!(values[[1, 1]], 1);
        assert_eq!(values[[1, 2]], 0);
    }
}
