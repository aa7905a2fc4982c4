/// Row or column index, also used for board height and width.
pub type Coord = u8;

/// Number of cells or mines on a board.
pub type CellCount = u16;

/// `(row, col)`, zero-based from the top left.
pub type Pos = (Coord, Coord);

/// Conversion into the `[row, col]` form ndarray indexes with.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Pos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        let (row, col) = self;
        [row.into(), col.into()]
    }
}

/// Cell count of a `rows` by `cols` board, clamped at `CellCount::MAX`.
pub const fn mult(rows: Coord, cols: Coord) -> CellCount {
    (rows as CellCount).saturating_mul(cols as CellCount)
}

/// Offsets to the eight surrounding cells, top row first.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Neighbors of a cell that fall inside the board.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Pos,
    size: Pos,
    offsets: core::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub(crate) fn new(center: Pos, size: Pos) -> Self {
        Self {
            center,
            size,
            offsets: OFFSETS.iter(),
        }
    }

    fn shift(&self, (d_row, d_col): (i8, i8)) -> Option<Pos> {
        let (row, col) = self.center;
        let (rows, cols) = self.size;
        let row = row.checked_add_signed(d_row).filter(|&row| row < rows)?;
        let col = col.checked_add_signed(d_col).filter(|&col| col < cols)?;
        Some((row, col))
    }
}

impl Iterator for NeighborIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = self.offsets.next() {
            if let Some(pos) = self.shift(offset) {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn interior_cell_has_eight_neighbors_in_row_major_order() {
        let neighbors: Vec<Pos> = NeighborIter::new((1, 1), (3, 3)).collect();

        assert_eq!(
            neighbors,
            [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn corners_and_edges_are_clipped() {
        assert_eq!(NeighborIter::new((0, 0), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((2, 2), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((0, 1), (3, 3)).count(), 5);
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(16, 30), 480);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
