//! Cell addressing on the square world grid.
//!
//! A [`GridSpec`] fixes the side length `N` for an episode and converts
//! between `(row, col)` cells and flat indices `row * N + col`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::heading::Heading;
use crate::error::{AnveshakError, Result};

/// A grid cell addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell.
    #[inline]
    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A planning state: where the agent stands and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    pub cell: Cell,
    pub heading: Heading,
}

impl State {
    #[inline]
    pub const fn new(cell: Cell, heading: Heading) -> Self {
        Self { cell, heading }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.cell, self.heading)
    }
}

/// Dimensions of the square world grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    size: usize,
}

impl GridSpec {
    /// Create a grid of `size` x `size` cells.
    ///
    /// Grids smaller than 2x2 cannot carry the cue structure and are rejected.
    pub fn new(size: usize) -> Result<Self> {
        if size < 2 {
            return Err(AnveshakError::InvalidGrid(size));
        }
        Ok(Self { size })
    }

    /// Side length `N`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells `N * N`.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    /// Flat index of a cell.
    #[inline]
    pub fn to_index(&self, cell: Cell) -> usize {
        debug_assert!(self.contains(cell), "cell {cell} outside grid");
        cell.row * self.size + cell.col
    }

    /// Cell at a flat index.
    #[inline]
    pub fn to_cell(&self, index: usize) -> Cell {
        debug_assert!(index < self.cell_count(), "index {index} outside grid");
        Cell::new(index / self.size, index % self.size)
    }

    /// Error unless the cell lies on the grid.
    pub fn check(&self, cell: Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(AnveshakError::CellOutOfBounds {
                cell,
                size: self.size,
            })
        }
    }

    /// Adjacent cell in the given direction, if it is on the grid.
    pub fn neighbor_toward(&self, cell: Cell, heading: Heading) -> Option<Cell> {
        let (d_row, d_col) = heading.offset();
        let row = cell.row.checked_add_signed(d_row as isize)?;
        let col = cell.col.checked_add_signed(d_col as isize)?;
        let next = Cell::new(row, col);
        self.contains(next).then_some(next)
    }

    /// In-bounds 4-connected neighbours, in heading order.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        Heading::ALL
            .iter()
            .filter_map(|&heading| self.neighbor_toward(cell, heading))
            .collect()
    }

    /// In-bounds neighbours paired with the heading that reaches them.
    pub fn neighbors_with_heading(&self, cell: Cell) -> Vec<(Heading, Cell)> {
        Heading::ALL
            .iter()
            .filter_map(|&heading| {
                self.neighbor_toward(cell, heading)
                    .map(|next| (heading, next))
            })
            .collect()
    }

    /// `origin` followed by every cell in a straight line up to the grid edge.
    pub fn ray(&self, origin: Cell, heading: Heading) -> Vec<Cell> {
        let mut cells = vec![origin];
        let mut current = origin;
        while let Some(next) = self.neighbor_toward(current, heading) {
            cells.push(next);
            current = next;
        }
        cells
    }

    /// Every cell in index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(|index| self.to_cell(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_grid_rejected() {
        assert!(matches!(GridSpec::new(0), Err(AnveshakError::InvalidGrid(0))));
        assert!(matches!(GridSpec::new(1), Err(AnveshakError::InvalidGrid(1))));
        assert!(GridSpec::new(2).is_ok());
    }

    #[test]
    fn test_index_roundtrip() {
        let grid = GridSpec::new(4).unwrap();
        assert_eq!(grid.to_index(Cell::new(3, 3)), 15);
        assert_eq!(grid.to_cell(15), Cell::new(3, 3));
        for index in 0..grid.cell_count() {
            assert_eq!(grid.to_index(grid.to_cell(index)), index);
        }
        for cell in grid.cells() {
            assert_eq!(grid.to_cell(grid.to_index(cell)), cell);
        }
    }

    #[test]
    fn test_neighbors_in_bounds_and_symmetric() {
        let grid = GridSpec::new(5).unwrap();
        for cell in grid.cells() {
            let neighbors = grid.neighbors(cell);
            assert!((2..=4).contains(&neighbors.len()));
            for n in neighbors {
                assert!(grid.contains(n));
                assert_eq!(n.manhattan_distance(&cell), 1);
                assert!(grid.neighbors(n).contains(&cell));
            }
        }
        assert_eq!(grid.neighbors(Cell::new(0, 0)).len(), 2);
        assert_eq!(grid.neighbors(Cell::new(2, 2)).len(), 4);
    }

    #[test]
    fn test_ray_reaches_edge() {
        let grid = GridSpec::new(4).unwrap();
        assert_eq!(
            grid.ray(Cell::new(1, 1), Heading::East),
            vec![Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 3)]
        );
        assert_eq!(
            grid.ray(Cell::new(1, 1), Heading::South),
            vec![Cell::new(1, 1), Cell::new(0, 1)]
        );
        assert_eq!(grid.ray(Cell::new(0, 3), Heading::East), vec![Cell::new(0, 3)]);
    }

    #[test]
    fn test_check_out_of_bounds() {
        let grid = GridSpec::new(4).unwrap();
        assert!(grid.check(Cell::new(3, 0)).is_ok());
        assert!(matches!(
            grid.check(Cell::new(4, 0)),
            Err(AnveshakError::CellOutOfBounds { size: 4, .. })
        ));
    }
}
