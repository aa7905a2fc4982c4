use thiserror::Error;

use crate::{Action, CellCount, Coord, Phase, Pos};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Pos),
    #[error("Cannot fit {mines} mines on a {rows}x{cols} board")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Cannot {action} while the game is {phase}")]
    InvalidAction { action: Action, phase: Phase },
    #[error("Mine at {0:?} lies inside the safe zone")]
    MineInSafeZone(Pos),
}

pub type Result<T> = core::result::Result<T, GameError>;
