//! Grid module - generic fixed-size 2D storage
//!
//! A grid is a `rows x columns` array of optional values with bounds-checked
//! addressing. Dimensions are fixed for the lifetime of the grid; there is no
//! resizing API. Storage is a flat row-major vector for cache locality.

use arrayvec::ArrayVec;

use crate::types::{GameError, Position};

/// Fixed-size 2D array of optional values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    /// Flat cell storage, row-major order (row * columns + column)
    cells: Vec<Option<T>>,
    rows: usize,
    columns: usize,
}

impl<T> Grid<T> {
    /// Create an empty grid. Both dimensions must be positive.
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(rows > 0 && columns > 0, "grid dimensions must be positive");
        let mut cells = Vec::with_capacity(rows * columns);
        cells.resize_with(rows * columns, || None);
        Self {
            cells,
            rows,
            columns,
        }
    }

    /// Calculate flat index from a position.
    /// Returns None if out of bounds.
    #[inline]
    fn index(&self, (row, column): Position) -> Option<usize> {
        if row < self.rows && column < self.columns {
            Some(row * self.columns + column)
        } else {
            None
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Dimensions as a (rows, columns) pair.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// True iff `position` addresses a cell of this grid.
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// The cell at `position`: `None` when out of bounds, `Some(&None)`
    /// for an in-range empty cell.
    pub fn cell(&self, position: Position) -> Option<&Option<T>> {
        self.index(position).map(|idx| &self.cells[idx])
    }

    /// The value at `position`, flattening out-of-bounds and empty to `None`.
    pub fn get(&self, position: Position) -> Option<&T> {
        self.index(position).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Mutable access to the value at `position`.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.index(position)
            .and_then(|idx| self.cells[idx].as_mut())
    }

    /// Place a value, returning whatever it displaced.
    /// Out-of-range positions are rejected, never clamped.
    pub fn set(&mut self, position: Position, value: T) -> Result<Option<T>, GameError> {
        match self.index(position) {
            Some(idx) => Ok(self.cells[idx].replace(value)),
            None => Err(GameError::InvalidPosition(position)),
        }
    }

    /// Empty the cell at `position`, returning the removed value.
    pub fn clear(&mut self, position: Position) -> Result<Option<T>, GameError> {
        match self.index(position) {
            Some(idx) => Ok(self.cells[idx].take()),
            None => Err(GameError::InvalidPosition(position)),
        }
    }

    /// Take the value out of a cell, leaving it empty.
    /// Out-of-bounds behaves like an empty cell.
    pub fn take(&mut self, position: Position) -> Option<T> {
        self.index(position).and_then(|idx| self.cells[idx].take())
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
    }

    /// `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Option<T>)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    /// One row of cells, left to right.
    pub fn row(&self, row: usize) -> &[Option<T>] {
        assert!(row < self.rows, "row index out of range");
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    /// Valid neighbours of `position` for the given delta set.
    /// Out-of-range neighbours are filtered out.
    pub fn adjacent(&self, (row, column): Position, deltas: &[(i32, i32)]) -> ArrayVec<Position, 8> {
        let mut neighbours = ArrayVec::new();
        for &(dr, dc) in deltas {
            let r = row as i64 + dr as i64;
            let c = column as i64 + dc as i64;
            if r < 0 || c < 0 {
                continue;
            }
            let neighbour = (r as usize, c as usize);
            if self.contains(neighbour) {
                neighbours.push(neighbour);
            }
        }
        neighbours
    }

    /// Empty every cell. Dimensions are unchanged.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AXIAL_DELTAS, RADIAL_DELTAS};

    #[test]
    fn test_new_grid_is_empty() {
        let grid: Grid<u32> = Grid::new(3, 4);
        assert_eq!(grid.size(), (3, 4));
        for position in grid.positions() {
            assert_eq!(grid.cell(position), Some(&None));
        }
    }

    #[test]
    #[should_panic(expected = "grid dimensions must be positive")]
    fn test_zero_dimension_rejected() {
        let _grid: Grid<u32> = Grid::new(0, 4);
    }

    #[test]
    fn test_set_get_clear() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.set((1, 1), 7), Ok(None));
        assert_eq!(grid.get((1, 1)), Some(&7));
        assert_eq!(grid.set((1, 1), 9), Ok(Some(7)));
        assert_eq!(grid.clear((1, 1)), Ok(Some(9)));
        assert_eq!(grid.cell((1, 1)), Some(&None));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid: Grid<u32> = Grid::new(2, 3);
        assert!(!grid.contains((2, 0)));
        assert!(!grid.contains((0, 3)));
        assert_eq!(grid.cell((2, 0)), None);
        assert_eq!(grid.get((0, 3)), None);
        assert_eq!(grid.set((5, 5), 1), Err(GameError::InvalidPosition((5, 5))));
        assert_eq!(grid.clear((5, 5)), Err(GameError::InvalidPosition((5, 5))));
    }

    #[test]
    fn test_positions_row_major() {
        let grid: Grid<u32> = Grid::new(2, 3);
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_iter_pairs_values_with_positions() {
        let mut grid = Grid::new(2, 2);
        grid.set((0, 1), 5).unwrap();
        let filled: Vec<_> = grid
            .iter()
            .filter_map(|(position, cell)| cell.as_ref().map(|v| (position, *v)))
            .collect();
        assert_eq!(filled, vec![((0, 1), 5)]);
    }

    #[test]
    fn test_adjacent_corner_and_center() {
        let grid: Grid<u32> = Grid::new(3, 3);

        let corner = grid.adjacent((0, 0), &AXIAL_DELTAS);
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&(0, 1)));
        assert!(corner.contains(&(1, 0)));

        let center = grid.adjacent((1, 1), &RADIAL_DELTAS);
        assert_eq!(center.len(), 8);
        assert!(!center.contains(&(1, 1)));
    }

    #[test]
    fn test_take_and_reset() {
        let mut grid = Grid::new(2, 2);
        grid.set((0, 0), 1).unwrap();
        assert_eq!(grid.take((0, 0)), Some(1));
        assert_eq!(grid.take((0, 0)), None);
        assert_eq!(grid.take((9, 9)), None);

        grid.set((1, 0), 2).unwrap();
        grid.reset();
        assert!(grid.iter().all(|(_, cell)| cell.is_none()));
        assert_eq!(grid.size(), (2, 2));
    }

    #[test]
    fn test_row_slices() {
        let mut grid = Grid::new(2, 3);
        grid.set((1, 2), 9).unwrap();
        assert_eq!(grid.row(0), &[None, None, None]);
        assert_eq!(grid.row(1), &[None, None, Some(9)]);
    }
}
