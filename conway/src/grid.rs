// grid.rs - Toroidal cell grid and the B3/S23 transition rule

use crate::error::{LifeError, Result};

/// Square board of dead/alive cells whose edges wrap around in both axes.
///
/// Cells are addressed as `(x, y)` with `x` the column and `y` the row.
/// The size is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Make an all-dead grid of `size` x `size` cells.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(LifeError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![false; size * size],
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        let ix = self.checked_index(x, y)?;
        Ok(self.cells[ix])
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) -> Result<()> {
        let ix = self.checked_index(x, y)?;
        self.cells[ix] = value;
        Ok(())
    }

    /// Apply a pointer edit and return the cell's new value.
    ///
    /// A fresh press (`extend == false`) flips the cell. A drag continuation
    /// (`extend == true`) leaves the cell alive whatever it was before.
    pub fn edit(&mut self, x: usize, y: usize, extend: bool) -> Result<bool> {
        let ix = self.checked_index(x, y)?;
        let value = if extend { true } else { !self.cells[ix] };
        self.cells[ix] = value;
        Ok(value)
    }

    /// Number of live cells among the 8 surrounding `(x, y)`, wrapping at the edges.
    pub fn count_moore_neighbors(&self, x: usize, y: usize) -> usize {
        let n = self.size as isize;
        let mut count = 0;
        for dx in [-1isize, 0, 1] {
            for dy in [-1isize, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x as isize + dx).rem_euclid(n) as usize;
                let ny = (y as isize + dy).rem_euclid(n) as usize;
                if self.cells[self.index(nx, ny)] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Compute the following generation into a fresh grid.
    ///
    /// Every neighbor count is taken against `self`, never against the grid
    /// being filled in.
    pub fn next_generation(&self) -> Grid {
        let mut next = Grid {
            size: self.size,
            cells: vec![false; self.cells.len()],
        };
        for x in 0..self.size {
            for y in 0..self.size {
                let alive = self.cells[self.index(x, y)];
                next.cells[self.index(x, y)] = match (alive, self.count_moore_neighbors(x, y)) {
                    (true, 2) | (_, 3) => true, // Survival or birth
                    _ => false,
                };
            }
        }
        next
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, column-major.
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(ix, _)| (ix / size, ix % size))
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.size + y
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.size || y >= self.size {
            return Err(LifeError::OutOfRange {
                x,
                y,
                size: self.size,
            });
        }
        Ok(self.index(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        for &(x, y) in live {
            grid.set(x, y, true).unwrap();
        }
        grid
    }

    fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = grid.iter_live().collect();
        cells.sort_unstable();
        cells
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(Grid::new(0), Err(LifeError::InvalidSize(0))));
    }

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(7).unwrap();
        assert_eq!(grid.size(), 7);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn access_outside_the_grid_fails() {
        let mut grid = Grid::new(4).unwrap();
        assert!(matches!(
            grid.get(4, 0),
            Err(LifeError::OutOfRange { x: 4, y: 0, size: 4 })
        ));
        assert!(grid.set(0, 9, true).is_err());
        assert!(grid.edit(5, 5, false).is_err());
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn neighbors_wrap_around_both_axes() {
        let n = 6;
        let grid = grid_with(n, &[(0, 0)]);
        let expected_one = [(n - 1, n - 1), (0, 1), (1, 0), (1, 1), (n - 1, 0), (0, n - 1), (1, n - 1), (n - 1, 1)];
        for x in 0..n {
            for y in 0..n {
                let count = grid.count_moore_neighbors(x, y);
                if expected_one.contains(&(x, y)) {
                    assert_eq!(count, 1, "cell ({x}, {y})");
                } else {
                    assert_eq!(count, 0, "cell ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn neighbor_count_excludes_the_cell_itself() {
        let grid = grid_with(3, &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        assert_eq!(grid.count_moore_neighbors(1, 1), 8);
    }

    #[test]
    fn block_is_a_still_life() {
        let grid = grid_with(6, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
        let next = grid.next_generation();
        assert_eq!(next, grid);
    }

    #[test]
    fn l_tromino_becomes_a_block() {
        let grid = grid_with(5, &[(1, 1), (2, 1), (1, 2)]);
        let next = grid.next_generation();
        assert_eq!(live_cells(&next), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        // The source grid is left untouched.
        assert_eq!(grid.live_count(), 3);
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = grid_with(5, &[(1, 2), (2, 2), (3, 2)]);
        let vertical = horizontal.next_generation();
        assert_eq!(live_cells(&vertical), vec![(2, 1), (2, 2), (2, 3)]);
        assert_eq!(vertical.next_generation(), horizontal);
    }

    #[test]
    fn lone_cell_dies() {
        let grid = grid_with(5, &[(2, 2)]);
        assert_eq!(grid.next_generation().live_count(), 0);
    }

    #[test]
    fn press_toggles_and_drag_sticks() {
        let mut grid = Grid::new(3).unwrap();
        assert!(grid.edit(1, 1, false).unwrap());
        assert!(!grid.edit(1, 1, false).unwrap());

        assert!(grid.edit(2, 0, true).unwrap());
        assert!(grid.edit(2, 0, true).unwrap());
        assert!(grid.get(2, 0).unwrap());
    }

    #[test]
    fn equality_needs_same_size_and_cells() {
        assert_ne!(Grid::new(3).unwrap(), Grid::new(4).unwrap());
        assert_ne!(grid_with(3, &[(0, 0)]), grid_with(3, &[(0, 1)]));
        assert_eq!(grid_with(3, &[(0, 1)]), grid_with(3, &[(0, 1)]));
    }

    #[test]
    fn clear_kills_everything() {
        let mut grid = grid_with(4, &[(0, 0), (3, 3), (1, 2)]);
        grid.clear();
        assert_eq!(grid, Grid::new(4).unwrap());
    }
}
