use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Board dimensions and mine count of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDifficulty")]
pub struct Difficulty {
    rows: Coord,
    cols: Coord,
    mine_count: CellCount,
}

impl Difficulty {
    pub const EASY: Self = Self::new_unchecked(9, 9, 10);
    pub const MEDIUM: Self = Self::new_unchecked(16, 16, 40);
    pub const HARD: Self = Self::new_unchecked(16, 30, 99);

    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mine_count: CellCount) -> Self {
        Self {
            rows,
            cols,
            mine_count,
        }
    }

    /// Validates that placement can always terminate, wherever the first reveal lands.
    pub fn new(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<Self> {
        let total_cells = mult(rows, cols);
        let crowded = mine_count.saturating_add(SAFE_ZONE_MAX) >= total_cells;
        if rows == 0 || cols == 0 || mine_count == 0 || crowded {
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: mine_count,
            });
        }
        Ok(Self::new_unchecked(rows, cols, mine_count))
    }

    pub const fn preset(key: DifficultyKey) -> Self {
        match key {
            DifficultyKey::Easy => Self::EASY,
            DifficultyKey::Medium => Self::MEDIUM,
            DifficultyKey::Hard => Self::HARD,
        }
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Pos {
        (self.rows, self.cols)
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }
}

/// Deserialized fields, checked by [`Difficulty::new`] before use.
#[derive(Deserialize)]
struct RawDifficulty {
    rows: Coord,
    cols: Coord,
    mine_count: CellCount,
}

impl TryFrom<RawDifficulty> for Difficulty {
    type Error = GameError;

    fn try_from(raw: RawDifficulty) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.mine_count)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::EASY
    }
}

impl From<DifficultyKey> for Difficulty {
    fn from(key: DifficultyKey) -> Self {
        Self::preset(key)
    }
}

/// Name of one of the fixed presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyKey {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl DifficultyKey {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for DifficultyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown difficulty, expected one of: easy, medium, hard")]
pub struct ParseDifficultyError;

impl FromStr for DifficultyKey {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParseDifficultyError)
    }
}
