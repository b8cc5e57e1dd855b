use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{mines} mines do not fit a {width}x{height} board")]
    InvalidConfig {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("coordinates outside the board")]
    OutOfBounds,
    #[error("game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
