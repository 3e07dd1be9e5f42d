use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board must have at least one cell")]
    InvalidBoardShape,
    #[error("Unknown difficulty {0:?}, expected easy, medium or hard")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure reported by a [`ScoreStore`](crate::ScoreStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage contents could not be (de)serialized: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Storage backend failed: {0}")]
    Backend(String),
}
