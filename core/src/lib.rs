use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use render::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod game;
mod render;
mod types;

/// Board dimensions and mine count requested for a new game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    /// The classic beginner setup: 9x9 with 9 mines.
    fn default() -> Self {
        Self::new((9, 9), 9)
    }
}
