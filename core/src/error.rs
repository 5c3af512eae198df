use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    InvalidCoords,
    #[error("Mine count must be smaller than the number of cells")]
    TooManyMines,
}

pub type Result<T> = std::result::Result<T, GameError>;
