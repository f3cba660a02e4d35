use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board must have at least one row and one column")]
    InvalidDimensions,
    #[error("Mine count exceeds the number of cells")]
    InvalidMineCount,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Unknown difficulty preset")]
    UnknownPreset,
    #[error("Board state is inconsistent")]
    InvalidBoardState,
}

pub type Result<T> = core::result::Result<T, BoardError>;
