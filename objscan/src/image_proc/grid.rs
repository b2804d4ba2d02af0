//! Binary occupancy grid consumed by the detection passes.
//!
//! A [`BinaryGrid`] is an immutable H×W matrix of foreground/background flags.
//! Construction is the only place preconditions are checked: once a grid exists
//! it is guaranteed to have at least one row and one column, so the traversal
//! code never has to handle a degenerate shape.

use std::fmt;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a grid from caller-supplied data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Cell ({row},{col}) holds {value}, expected 0 or 1")]
    NonBinaryValue { row: usize, col: usize, value: u8 },
}

/// Grid coordinate as (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Index form used with `ndarray` (`[row, col]`).
    pub fn index(&self) -> [usize; 2] {
        [self.row, self.col]
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One of the four axis-aligned neighbor directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbor expansion order shared by every traversal in this crate.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Step from `cell` in this direction, or `None` if that leaves a
    /// `rows`×`cols` grid.
    pub fn step(self, cell: Cell, rows: usize, cols: usize) -> Option<Cell> {
        match self {
            Direction::Up => cell.row.checked_sub(1).map(|row| Cell::new(row, cell.col)),
            Direction::Down => {
                (cell.row + 1 < rows).then(|| Cell::new(cell.row + 1, cell.col))
            }
            Direction::Left => cell.col.checked_sub(1).map(|col| Cell::new(cell.row, col)),
            Direction::Right => {
                (cell.col + 1 < cols).then(|| Cell::new(cell.row, cell.col + 1))
            }
        }
    }
}

/// Immutable binary grid with non-zero dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryGrid {
    cells: Array2<bool>,
}

impl BinaryGrid {
    /// Wrap a boolean mask, rejecting zero-sized arrays.
    pub fn new(cells: Array2<bool>) -> Result<Self, GridError> {
        let (rows, cols) = cells.dim();
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        Ok(Self { cells })
    }

    /// Build a grid from rows of 0/1 values.
    ///
    /// Every row must have the same length as the first one and contain only
    /// `0` (background) or `1` (foreground).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if height == 0 || width == 0 {
            return Err(GridError::EmptyGrid {
                rows: height,
                cols: width,
            });
        }

        let mut cells = Array2::from_elem((height, width), false);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                cells[[row, col]] = match value {
                    0 => false,
                    1 => true,
                    value => return Err(GridError::NonBinaryValue { row, col, value }),
                };
            }
        }

        Ok(Self { cells })
    }

    /// Build a `rows`×`cols` grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self, GridError>
    where
        F: FnMut(usize, usize) -> bool,
    {
        Self::new(Array2::from_shape_fn((rows, cols), |(r, c)| f(r, c)))
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Dimensions as (rows, cols).
    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.cells.get([row, col]).copied()
    }

    /// `true` if `cell` is inside the grid and foreground.
    pub fn is_foreground(&self, cell: Cell) -> bool {
        self.cells.get(cell.index()).copied().unwrap_or(false)
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    pub fn view(&self) -> ArrayView2<'_, bool> {
        self.cells.view()
    }

    /// Foreground cells in row-major order.
    pub fn foreground_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .indexed_iter()
            .filter(|&(_, &v)| v)
            .map(|((row, col), _)| Cell::new(row, col))
    }

    /// In-bounds 4-neighbors of `cell`, in [`Direction::ALL`] order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        let (rows, cols) = self.dim();
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| dir.step(cell, rows, cols))
    }

    /// Grid with foreground and background swapped.
    pub fn inverted(&self) -> Self {
        Self {
            cells: self.cells.mapv(|v| !v),
        }
    }
}
