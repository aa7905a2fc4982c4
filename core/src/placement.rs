use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::*;

/// Largest possible safe zone, the full 3x3 block.
pub const SAFE_ZONE_MAX: CellCount = 9;

/// Positions that must stay mine-free around the first reveal.
pub type SafeZone = SmallVec<[Pos; 9]>;

/// The 3x3 block centered on `center`, clipped to the grid.
pub fn safe_zone(grid: &Grid, center: Pos) -> Result<SafeZone> {
    let center = grid.validate(center)?;
    let mut zone = SafeZone::new();
    zone.push(center);
    zone.extend(grid.iter_neighbors(center));
    Ok(zone)
}

/// Mines go down once per board, a second attempt means the game is already running.
fn check_unplaced(grid: &Grid) -> Result<()> {
    if grid.mines_placed() {
        return Err(GameError::InvalidAction {
            action: Action::PlaceMines,
            phase: Phase::InProgress,
        });
    }
    Ok(())
}

/// Strategy used to lay out mines once the first cell is revealed.
pub trait MinePlacer {
    fn place(&mut self, grid: &mut Grid, mine_count: CellCount, safe_center: Pos)
        -> Result<MineSet>;
}

/// Places `mine_count` mines uniformly at random outside the safe zone around `safe_center`.
pub fn place<R: Rng + ?Sized>(
    grid: &mut Grid,
    mine_count: CellCount,
    safe_center: Pos,
    rng: &mut R,
) -> Result<MineSet> {
    let zone = safe_zone(grid, safe_center)?;
    check_unplaced(grid)?;

    let free_cells = grid.total_cells() - zone.len() as CellCount;
    if mine_count > free_cells {
        return Err(GameError::InvalidConfiguration {
            rows: grid.rows(),
            cols: grid.cols(),
            mines: mine_count,
        });
    }

    let (rows, cols) = grid.size();
    let mut mines = MineSet::with_capacity(mine_count.into());
    while mines.len() < usize::from(mine_count) {
        let pos = (rng.random_range(0..rows), rng.random_range(0..cols));
        if zone.contains(&pos) {
            continue;
        }
        mines.insert(pos);
    }

    grid.lay_mines(&mines);
    log::debug!(
        "Placed {} mines, {} safe cells around {:?}",
        mine_count,
        zone.len(),
        safe_center
    );
    Ok(mines)
}

/// Rejection-sampling placement driven by an injected random source.
#[derive(Clone, Debug)]
pub struct RandomPlacer<R> {
    rng: R,
}

impl<R: Rng> RandomPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPlacer<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MinePlacer for RandomPlacer<R> {
    fn place(
        &mut self,
        grid: &mut Grid,
        mine_count: CellCount,
        safe_center: Pos,
    ) -> Result<MineSet> {
        place(grid, mine_count, safe_center, &mut self.rng)
    }
}

/// Lays out a predetermined set of mines, mostly for fixtures and benchmarks.
///
/// The positions must be distinct, in bounds, outside the safe zone, and match the requested mine
/// count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedPlacer {
    mines: Vec<Pos>,
}

impl FixedPlacer {
    pub fn new(mines: impl IntoIterator<Item = Pos>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinePlacer for FixedPlacer {
    fn place(
        &mut self,
        grid: &mut Grid,
        mine_count: CellCount,
        safe_center: Pos,
    ) -> Result<MineSet> {
        let zone = safe_zone(grid, safe_center)?;
        check_unplaced(grid)?;

        let mut mines = MineSet::with_capacity(self.mines.len());
        for &pos in &self.mines {
            let pos = grid.validate(pos)?;
            if zone.contains(&pos) {
                return Err(GameError::MineInSafeZone(pos));
            }
            mines.insert(pos);
        }
        if mines.len() != usize::from(mine_count) {
            log::warn!(
                "Fixed layout has {} distinct mines, requested {}",
                mines.len(),
                mine_count
            );
            return Err(GameError::InvalidConfiguration {
                rows: grid.rows(),
                cols: grid.cols(),
                mines: mine_count,
            });
        }

        grid.lay_mines(&mines);
        Ok(mines)
    }
}
