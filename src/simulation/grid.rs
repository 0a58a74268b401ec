//! The line grid the agent walks on.

use crate::simulation::error::{SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Line,
}

/// A grid coordinate. Signed so that probes just past an edge are representable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Width and height of a grid, detached from its cells.
///
/// The agent keeps a copy so it can validate moves without borrowing the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    #[must_use]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }
}

/// A fixed-size matrix of [`Cell`]s stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Errors
    /// [`SimulationError::InvalidDimension`] if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> SimulationResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(SimulationError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        })
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        Bounds {
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.bounds().contains(x, y)
    }

    /// Flat index for an in-bounds coordinate.
    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Cell at `(x, y)`, or `None` past the edge.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.offset(x, y)])
        } else {
            None
        }
    }

    /// True when `(x, y)` is inside the grid and marked.
    #[must_use]
    pub fn is_line(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(Cell::Line)
    }

    /// Overwrites the cell at `(x, y)`.
    ///
    /// # Errors
    /// [`SimulationError::OutOfBounds`] if `(x, y)` lies outside the grid; the
    /// grid is left untouched.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> SimulationResult<()> {
        if !self.in_bounds(x, y) {
            return Err(SimulationError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.offset(x, y);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Clears every cell back to [`Cell::Empty`].
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Number of marked cells.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Line).count()
    }

    /// One row of cells, or `None` if `y` is outside the grid.
    #[must_use]
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let start = self.offset(0, y);
        Some(&self.cells[start..start + self.width as usize])
    }
}
