//! Axis-aligned bounding boxes for connected grid regions.
//!
//! A [`BoundingBox`] tracks the tightest rectangle of grid cells containing a
//! region. Boxes start out empty (inverted bounds) and only ever grow while a
//! traversal merges cells into them, so the result of a flood fill is always
//! the minimal box of the region that produced it.
//!
//! # Coordinate System
//! - **Rows**: increase downward from the top of the grid
//! - **Columns**: increase rightward from the left of the grid
//! - **Bounds**: both min and max coordinates are inclusive
//!
//! # Examples
//!
//! ```rust
//! use objscan::image_proc::detection::aabb::BoundingBox;
//! use objscan::image_proc::grid::Cell;
//!
//! let mut bbox = BoundingBox::empty();
//! assert!(!bbox.is_valid());
//!
//! bbox.expand_to_include(Cell::new(1, 1));
//! bbox.expand_to_include(Cell::new(3, 2));
//! assert_eq!(bbox.to_tuple(), (1, 3, 1, 2));
//! assert_eq!(bbox.height(), 3);
//! assert_eq!(bbox.width(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::image_proc::grid::Cell;

/// Inclusive bounding box of a set of grid cells.
///
/// Field order follows the (minRow, maxRow, minCol, maxCol) convention used by
/// the text reports and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Topmost row (inclusive)
    pub min_row: usize,
    /// Bottommost row (inclusive)
    pub max_row: usize,
    /// Leftmost column (inclusive)
    pub min_col: usize,
    /// Rightmost column (inclusive)
    pub max_col: usize,
}

impl BoundingBox {
    /// Create an empty box with inverted bounds.
    ///
    /// Min coordinates start at `usize::MAX` and max coordinates at 0, so the
    /// box is invalid until the first cell is merged with
    /// [`expand_to_include`](Self::expand_to_include).
    pub fn empty() -> Self {
        Self {
            min_row: usize::MAX,
            max_row: 0,
            min_col: usize::MAX,
            max_col: 0,
        }
    }

    /// Create a box from explicit inclusive bounds.
    ///
    /// ```rust
    /// use objscan::image_proc::detection::aabb::BoundingBox;
    ///
    /// let bbox = BoundingBox::from_coords(1, 3, 1, 3);
    /// assert_eq!(bbox.area(), 9);
    /// ```
    pub fn from_coords(min_row: usize, max_row: usize, min_col: usize, max_col: usize) -> Self {
        Self {
            min_row,
            max_row,
            min_col,
            max_col,
        }
    }

    /// Single-cell box.
    pub fn from_cell(cell: Cell) -> Self {
        Self::from_coords(cell.row, cell.row, cell.col, cell.col)
    }

    /// Bounds as (min_row, max_row, min_col, max_col).
    pub fn to_tuple(&self) -> (usize, usize, usize, usize) {
        (self.min_row, self.max_row, self.min_col, self.max_col)
    }

    /// Grow the box so it contains `cell`. Never shrinks an existing bound.
    pub fn expand_to_include(&mut self, cell: Cell) {
        self.min_row = self.min_row.min(cell.row);
        self.max_row = self.max_row.max(cell.row);
        self.min_col = self.min_col.min(cell.col);
        self.max_col = self.max_col.max(cell.col);
    }

    /// Smallest box containing both `self` and `other`.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_row: self.min_row.min(other.min_row),
            max_row: self.max_row.max(other.max_row),
            min_col: self.min_col.min(other.min_col),
            max_col: self.max_col.max(other.max_col),
        }
    }

    /// `false` for boxes that have not absorbed any cell yet.
    pub fn is_valid(&self) -> bool {
        self.min_row <= self.max_row && self.min_col <= self.max_col
    }

    /// Number of columns covered (`max_col - min_col + 1`), 0 when empty.
    pub fn width(&self) -> usize {
        if self.is_valid() {
            self.max_col - self.min_col + 1
        } else {
            0
        }
    }

    /// Number of rows covered (`max_row - min_row + 1`), 0 when empty.
    pub fn height(&self) -> usize {
        if self.is_valid() {
            self.max_row - self.min_row + 1
        } else {
            0
        }
    }

    /// Cell count of the full rectangle.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_square(&self) -> bool {
        self.is_valid() && self.width() == self.height()
    }

    /// Check if `cell` lies within the inclusive bounds.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= self.min_row
            && cell.row <= self.max_row
            && cell.col >= self.min_col
            && cell.col <= self.max_col
    }

    /// `true` when the box covers the entire extent of a `rows`×`cols` grid.
    pub fn spans(&self, rows: usize, cols: usize) -> bool {
        self.height() == rows && self.width() == cols
    }

    /// Center as (row, col) in fractional cell units.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_row as f64 + self.max_row as f64) / 2.0,
            (self.min_col as f64 + self.max_col as f64) / 2.0,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
