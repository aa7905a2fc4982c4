#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use difficulty::*;
pub use error::*;
pub use grid::*;
pub use placement::*;
pub use reveal::*;
pub use session::*;
pub use timer::*;
pub use types::*;

mod cell;
mod difficulty;
mod error;
mod grid;
mod placement;
mod reveal;
mod session;
mod timer;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    Rejected,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Flagged => true,
            Self::Unflagged => true,
            Self::Rejected => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Target was already revealed or flagged, nothing changed.
    AlreadySettled,
    /// At least one cell was revealed and none of them was a mine.
    Cleared,
    /// A mine was revealed.
    Mine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            AlreadySettled => false,
            Cleared => true,
            Mine => true,
        }
    }
}

/// Used to merge outcomes when a chord reveals several neighbors
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Mine, _) => Mine,
            (_, Mine) => Mine,
            (Cleared, _) => Cleared,
            (_, Cleared) => Cleared,
            (AlreadySettled, AlreadySettled) => AlreadySettled,
        }
    }
}
