use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Logical display symbol for one cell. Picking glyphs for these is the
/// front end's business; the core only decides which symbol applies.
///
/// Flag correctness is only revealed once the game has ended: during play
/// every flag renders as `FlaggedGeneric`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileSymbol {
    Unopened,
    Empty,
    Count(u8),
    Mine,
    FlaggedGeneric,
    FlaggedMine,
    FlaggedSafe,
}

impl Cell {
    /// Symbol for this cell under the given game mode. Pure mapping.
    pub fn symbol(self, mode: GameMode) -> TileSymbol {
        use TileSymbol::*;

        match self.status() {
            CellStatus::Open => match self.adjacent_mines() {
                0 => Empty,
                MINE_VALUE => Mine,
                count => Count(count),
            },
            CellStatus::Flagged => match mode {
                GameMode::Playing => FlaggedGeneric,
                GameMode::Ended if self.is_mine() => FlaggedMine,
                GameMode::Ended => FlaggedSafe,
            },
            CellStatus::Closed => Unopened,
        }
    }
}

impl Game {
    /// Bounds-checked single-cell symbol lookup.
    pub fn symbol_at(&self, coords: Coord2) -> Result<TileSymbol> {
        Ok(self.board().at(coords)?.symbol(self.mode()))
    }

    /// The whole board as logical symbols, row-major `(height, width)`.
    pub fn symbol_grid(&self) -> Array2<TileSymbol> {
        let mode = self.mode();
        self.board().cells().map(|cell| cell.symbol(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> Game {
        Game::from_board(Board::with_mines(size, mines).unwrap())
    }

    #[test]
    fn open_cells_show_their_value() {
        let mut game = game((3, 3), &[(1, 1)]);
        game.open((0, 0)).unwrap();

        assert_eq!(game.symbol_at((0, 0)).unwrap(), TileSymbol::Count(1));
        assert_eq!(game.symbol_at((2, 2)).unwrap(), TileSymbol::Unopened);
    }

    #[test]
    fn opened_mine_shows_as_mine() {
        let mut game = game((3, 3), &[(1, 1)]);
        game.open((1, 1)).unwrap();

        assert_eq!(game.symbol_at((1, 1)).unwrap(), TileSymbol::Mine);
    }

    #[test]
    fn zero_cells_render_empty() {
        let mut game = game((4, 4), &[(3, 3)]);
        game.open((0, 0)).unwrap();

        assert_eq!(game.symbol_at((0, 0)).unwrap(), TileSymbol::Empty);
        assert_eq!(game.symbol_at((2, 2)).unwrap(), TileSymbol::Count(1));
    }

    #[test]
    fn flags_are_generic_while_playing() {
        let mut game = game((3, 3), &[(1, 1)]);
        game.flag((1, 1)).unwrap();
        game.flag((0, 0)).unwrap();

        assert_eq!(game.symbol_at((1, 1)).unwrap(), TileSymbol::FlaggedGeneric);
        assert_eq!(game.symbol_at((0, 0)).unwrap(), TileSymbol::FlaggedGeneric);
    }

    #[test]
    fn flags_reveal_correctness_once_ended() {
        let mut game = game((3, 3), &[(1, 1), (2, 2)]);
        game.flag((1, 1)).unwrap();
        game.flag((0, 0)).unwrap();

        game.open((2, 2)).unwrap();
        assert_eq!(game.mode(), GameMode::Ended);
        assert_eq!(game.result(), Some(GameResult::Loss));

        assert_eq!(game.symbol_at((1, 1)).unwrap(), TileSymbol::FlaggedMine);
        assert_eq!(game.symbol_at((0, 0)).unwrap(), TileSymbol::FlaggedSafe);
    }

    #[test]
    fn symbol_grid_matches_board_layout() {
        let mut game = game((3, 2), &[(0, 0)]);
        game.open((2, 1)).unwrap();

        let grid = game.symbol_grid();
        assert_eq!(grid.dim(), (2, 3));
        assert_eq!(grid[[0, 0]], TileSymbol::Unopened);
        assert_eq!(grid[[1, 2]], TileSymbol::Empty);
        assert_eq!(grid[[1, 1]], TileSymbol::Count(1));
    }
}
