use std::fmt;

use rand::Rng;
use thiserror::Error;

use crate::rule_set::RuleSet;

/// Offsets of the Moore neighborhood of a cell
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell ({x}, {y}) is outside of the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
}

/// The cell states of one generation.
///
/// Cells are stored row by row, so `(x, y)` lives at `y * width + x`. The dimensions are fixed
/// when the grid is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid where every cell is dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![false; width * height],
            width,
            height,
        }
    }

    /// Create a grid where each cell is independently alive with probability `density`
    pub fn random<R: Rng>(width: usize, height: usize, density: f64, rng: &mut R) -> Self {
        let cells = (0..width * height).map(|_| rng.gen_bool(density)).collect();

        Self {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// State of the cell at `(x, y)`, or `None` if it's outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.cells[self.at(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<(), GridError> {
        let i = self.checked_at(x as i64, y as i64)?;
        self.cells[i] = alive;

        Ok(())
    }

    /// Flip the cell at `(x, y)`. Coordinates come straight from pointer input, so they may be
    /// negative or past the edge of the grid.
    pub fn toggle(&mut self, x: i64, y: i64) -> Result<bool, GridError> {
        let i = self.checked_at(x, y)?;
        self.cells[i] = !self.cells[i];

        Ok(self.cells[i])
    }

    /// Number of live cells in the grid
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterate over the coordinates of every live cell
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// Count the live cells in the Moore neighborhood of `(x, y)`. Anything past the edge of the
    /// grid is dead; the grid does not wrap.
    pub fn neighbors(&self, x: usize, y: usize) -> u8 {
        NEIGHBORHOOD
            .iter()
            .map(|&(dx, dy)| self.is_alive(x as isize + dx, y as isize + dy))
            .sum()
    }

    /// Compute the next generation under `rules`.
    ///
    /// Every cell is evaluated against `self` and written into a fresh grid, so the result does
    /// not depend on the order cells are visited in.
    pub fn next(&self, rules: &RuleSet) -> Grid {
        let mut next = Grid::new(self.width, self.height);

        for y in 0..self.height {
            for x in 0..self.width {
                let i = self.at(x, y);
                next.cells[i] = rules.next(self.cells[i], self.neighbors(x, y));
            }
        }

        next
    }

    fn is_alive(&self, x: isize, y: isize) -> u8 {
        if x < 0 || y < 0 {
            return 0;
        }

        match self.get(x as usize, y as usize) {
            Some(true) => 1,
            _ => 0,
        }
    }

    fn at(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn checked_at(&self, x: i64, y: i64) -> Result<usize, GridError> {
        let in_bounds = (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y);

        if !in_bounds {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok(self.at(x as usize, y as usize))
    }
}

/// One line per row, `#` for a live cell and `.` for a dead one
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
