//! Grid module - square 2D storage
//!
//! A `size x size` grid using a flat vector in row-major order (`y * size + x`).
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom). The grid is generic so the transform and matching code can
//! run on tile boards, kind-only views and boolean masks alike.

use crate::types::Coord;

/// Square grid with flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(x, y)` for every cell
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(f(x, y));
            }
        }
        Self { size, cells }
    }

    /// Wrap a row-major vector; None unless it holds exactly `size * size` cells
    pub fn from_vec(size: usize, cells: Vec<T>) -> Option<Self> {
        if cells.len() != size * size {
            return None;
        }
        Some(Self { size, cells })
    }

    /// Build from rows (outer index = y); None unless the rows form a square
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        let cells = rows.into_iter().flatten().collect();
        Some(Self { size, cells })
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(y * self.size + x)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.index(x, y).map(move |idx| &mut self.cells[idx])
    }

    pub fn at(&self, coord: Coord) -> Option<&T> {
        self.get(coord.x, coord.y)
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two cells
    /// Returns false if either is out of bounds
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a.x, a.y), self.index(b.x, b.y)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    /// Iterate `(coord, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i % size, i / size), cell))
    }

    /// Iterate the cells of column `x` from top to bottom
    pub fn column(&self, x: usize) -> impl Iterator<Item = &T> + '_ {
        let len = if x < self.size { self.size } else { 0 };
        self.cells.iter().skip(x).step_by(self.size.max(1)).take(len)
    }

    /// Apply `f` to every cell, keeping positions
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Grid with every cell set to `value`
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }

    /// Copy of this grid with side `new_size`
    ///
    /// Cells inside both bounds keep their coordinates, cells outside the new
    /// bounds are dropped and newly exposed cells come from `fill`.
    pub fn resized(&self, new_size: usize, mut fill: impl FnMut() -> T) -> Self {
        Self::from_fn(new_size, |x, y| match self.get(x, y) {
            Some(cell) => cell.clone(),
            None => fill(),
        })
    }

    /// Rows as nested vectors (outer index = y)
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.size).map(|row| row.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::filled(3, 0u8);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(2, 0), Some(2));
        assert_eq!(grid.index(0, 1), Some(3));
        assert_eq!(grid.index(2, 2), Some(8));
        assert_eq!(grid.index(3, 0), None);
        assert_eq!(grid.index(0, 3), None);
    }

    #[test]
    fn test_grid_set_and_get() {
        let mut grid = Grid::filled(4, 0u8);

        assert!(grid.set(1, 2, 7));
        assert_eq!(grid.get(1, 2), Some(&7));
        assert_eq!(grid.cells()[2 * 4 + 1], 7);

        assert!(!grid.set(4, 0, 1));
        assert_eq!(grid.get(0, 4), None);
    }

    #[test]
    fn test_grid_from_rows_roundtrip() {
        let rows = vec![vec![1u8, 2, 3], vec![4, 5, 6], vec![7, 8, 9]];
        let grid = Grid::from_rows(rows.clone()).unwrap();

        assert_eq!(grid.get(2, 0), Some(&3));
        assert_eq!(grid.get(0, 2), Some(&7));
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_grid_from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(vec![vec![1u8, 2], vec![3]]).is_none());
        assert!(Grid::from_vec(2, vec![1u8, 2, 3]).is_none());
    }

    #[test]
    fn test_grid_column_iteration() {
        let grid = Grid::from_rows(vec![vec![1u8, 2], vec![3, 4]]).unwrap();
        assert_eq!(grid.column(0).copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(grid.column(1).copied().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(grid.column(2).count(), 0);
    }

    #[test]
    fn test_grid_resized_keeps_positions() {
        let grid = Grid::from_rows(vec![vec![1u8, 2], vec![3, 4]]).unwrap();

        let grown = grid.resized(3, || 0);
        assert_eq!(
            grown.to_rows(),
            vec![vec![1, 2, 0], vec![3, 4, 0], vec![0, 0, 0]]
        );

        let shrunk = grown.resized(1, || 9);
        assert_eq!(shrunk.to_rows(), vec![vec![1]]);
    }

    #[test]
    fn test_grid_swap() {
        let mut grid = Grid::from_rows(vec![vec![1u8, 2], vec![3, 4]]).unwrap();
        assert!(grid.swap(Coord::new(0, 0), Coord::new(1, 1)));
        assert_eq!(grid.to_rows(), vec![vec![4, 2], vec![3, 1]]);
        assert!(!grid.swap(Coord::new(0, 0), Coord::new(2, 0)));
    }
}
