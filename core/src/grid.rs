use hashbrown::HashSet;
use ndarray::Array2;

use crate::*;

/// Positions holding a mine. Derived from the grid, never authoritative.
pub type MineSet = HashSet<Pos>;

/// Fixed-size board of cells plus the running counters the engine keeps.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
    mines_placed: bool,
}

impl Grid {
    pub fn new(rows: Coord, cols: Coord) -> Self {
        Self {
            cells: Array2::default((rows, cols).to_nd_index()),
            mine_count: 0,
            revealed_count: 0,
            flagged_count: 0,
            mines_placed: false,
        }
    }

    pub fn size(&self) -> Pos {
        let (rows, cols) = self.cells.dim();
        // dimensions always come from `Coord` values
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, (row, col): Pos) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn validate(&self, pos: Pos) -> Result<Pos> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds(pos))
        }
    }

    pub fn get(&self, pos: Pos) -> Result<&Cell> {
        let pos = self.validate(pos)?;
        Ok(&self.cells[pos.to_nd_index()])
    }

    /// In-bounds neighbors of `pos`, row-major over its 3x3 block.
    pub fn neighbors_of(&self, pos: Pos) -> Result<NeighborIter> {
        let pos = self.validate(pos)?;
        Ok(self.iter_neighbors(pos))
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_set(&self) -> MineSet {
        self.positions().filter(|&pos| self.cell(pos).is_mine).collect()
    }

    /// Counts revealed cells by scanning the whole board.
    pub fn scan_revealed(&self) -> CellCount {
        // a board never holds more than `CellCount::MAX` cells
        self.cells.iter().filter(|cell| cell.is_revealed).count() as CellCount
    }

    /// Whether every non-mine cell is revealed, by scanning the whole board.
    pub fn all_safe_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine || cell.is_revealed)
    }

    pub(crate) fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, pos: Pos) -> NeighborIter {
        NeighborIter::new(pos, self.size())
    }

    pub(crate) fn count_neighbors(&self, pos: Pos, pred: impl Fn(Cell) -> bool) -> u8 {
        // at most eight neighbors
        self.iter_neighbors(pos)
            .filter(|&neighbor| pred(self.cell(neighbor)))
            .count() as u8
    }

    /// Marks `mines` and computes adjacency counts for all other cells.
    pub(crate) fn lay_mines(&mut self, mines: &MineSet) {
        for &pos in mines {
            self.cells[pos.to_nd_index()].is_mine = true;
        }
        for pos in self.positions() {
            if !self.cell(pos).is_mine {
                let adjacent_mines = self.count_neighbors(pos, Cell::is_mine);
                self.cells[pos.to_nd_index()].adjacent_mines = adjacent_mines;
            }
        }
        self.mine_count = mines.len() as CellCount;
        self.mines_placed = true;
    }

    pub(crate) fn mark_revealed(&mut self, pos: Pos) {
        let cell = &mut self.cells[pos.to_nd_index()];
        debug_assert!(cell.is_hidden(), "revealing settled cell {pos:?}");
        cell.is_revealed = true;
        self.revealed_count += 1;
    }

    pub(crate) fn set_flagged(&mut self, pos: Pos, flagged: bool) {
        let cell = &mut self.cells[pos.to_nd_index()];
        debug_assert!(!cell.is_revealed, "flagging revealed cell {pos:?}");
        if cell.is_flagged == flagged {
            return;
        }
        cell.is_flagged = flagged;
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn new_grid_has_default_cells() {
        let grid = Grid::new(4, 7);

        assert_eq!(grid.size(), (4, 7));
        assert_eq!(grid.total_cells(), 28);
        assert!(grid.positions().all(|pos| grid.cell(pos) == Cell::default()));
        assert!(!grid.mines_placed());
        assert_eq!(grid.revealed_count(), 0);
    }

    #[test]
    fn get_rejects_out_of_bounds() {
        let grid = Grid::new(3, 5);

        assert!(grid.get((2, 4)).is_ok());
        assert_eq!(grid.get((3, 0)), Err(GameError::OutOfBounds((3, 0))));
        assert_eq!(grid.get((0, 5)), Err(GameError::OutOfBounds((0, 5))));
        assert!(grid.neighbors_of((9, 9)).is_err());
    }

    #[test]
    fn positions_are_row_major() {
        let grid = Grid::new(2, 3);
        let positions: Vec<Pos> = grid.positions().collect();

        assert_eq!(positions, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn lay_mines_computes_adjacency() {
        let mut grid = Grid::new(3, 3);
        let mines: MineSet = [(0, 0), (2, 2)].into_iter().collect();

        grid.lay_mines(&mines);

        assert_eq!(grid.mine_count(), 2);
        assert_eq!(grid.safe_cell_count(), 7);
        assert_eq!(grid.cell((1, 1)).adjacent_mines, 2);
        assert_eq!(grid.cell((0, 1)).adjacent_mines, 1);
        assert_eq!(grid.cell((0, 2)).adjacent_mines, 0);
        assert_eq!(grid.cell((0, 0)).adjacent_mines, 0);
        assert_eq!(grid.mine_set(), mines);
    }

    #[test]
    fn flag_counter_tracks_changes_only() {
        let mut grid = Grid::new(2, 2);

        grid.set_flagged((0, 0), true);
        grid.set_flagged((0, 0), true);
        assert_eq!(grid.flagged_count(), 1);

        grid.set_flagged((0, 0), false);
        assert_eq!(grid.flagged_count(), 0);
    }
}
