use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Grid must contain at least one cell")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
