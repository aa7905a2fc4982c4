use serde::{Deserialize, Serialize};

/// Logical state of one board position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Neither revealed nor flagged.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Revealed or flagged, a reveal on it does nothing.
    pub const fn is_settled(self) -> bool {
        self.is_revealed || self.is_flagged
    }
}

/// What a cell should look like, accounting for end-of-game marks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Hidden,
    Open(u8),
    Flagged,
    /// The mine that ended the game.
    Exploded,
    /// A mine uncovered because the game was lost.
    Mine,
    /// A flag on a safe cell, only shown after a loss.
    IncorrectFlag,
}

impl Tile {
    // whether the tile is visually closed
    pub const fn is_closed(self) -> bool {
        use Tile::*;
        match self {
            Hidden => true,
            Open(_) => false,
            Flagged => true,
            Exploded => false,
            Mine => false,
            IncorrectFlag => true,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Snapshot of a cell handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub tile: Tile,
}

impl CellView {
    pub(crate) const fn new(cell: Cell, tile: Tile) -> Self {
        Self {
            is_revealed: cell.is_revealed,
            is_flagged: cell.is_flagged,
            is_mine: cell.is_mine,
            adjacent_mines: cell.adjacent_mines,
            tile,
        }
    }
}
