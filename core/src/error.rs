use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside of the board")]
    OutOfBounds,
    #[error("Invalid level configuration, mines must be fewer than cells")]
    InvalidConfiguration,
    #[error("Unknown level")]
    UnknownLevel,
}

pub type Result<T> = core::result::Result<T, GameError>;
