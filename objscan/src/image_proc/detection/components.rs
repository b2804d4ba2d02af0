//! Connected component extraction over a binary grid.
//!
//! Foreground cells are grouped into maximal 4-connected regions using an
//! iterative flood fill. The grid is scanned in row-major order and every
//! unvisited foreground cell seeds a new region, so regions come out in the
//! order their seed was first encountered.
//!
//! The visited set is the label map itself: a cell is visited once its label
//! is non-zero, and labels are assigned exactly once per pass.

use std::collections::VecDeque;

use ndarray::Array2;
use serde::Serialize;

use crate::image_proc::detection::aabb::BoundingBox;
use crate::image_proc::detection::config::Traversal;
use crate::image_proc::grid::{BinaryGrid, Cell};

/// A maximal 4-connected set of foreground cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// First cell of the region met by the row-major scan.
    pub seed: Cell,
    /// Number of cells in the region (always >= 1).
    pub pixel_count: usize,
    /// Tight bounding box of all member cells.
    pub bbox: BoundingBox,
    /// Member cells in visitation order.
    pub cells: Vec<Cell>,
}

impl Region {
    /// Fraction of the bounding box covered by the region.
    pub fn fill_ratio(&self) -> f64 {
        self.pixel_count as f64 / self.bbox.area() as f64
    }
}

/// Pending cells of a flood fill; popped LIFO or FIFO depending on strategy.
enum Frontier {
    Stack(Vec<Cell>),
    Queue(VecDeque<Cell>),
}

impl Frontier {
    fn new(traversal: Traversal) -> Self {
        match traversal {
            Traversal::DepthFirst => Frontier::Stack(Vec::new()),
            Traversal::BreadthFirst => Frontier::Queue(VecDeque::new()),
        }
    }

    fn push(&mut self, cell: Cell) {
        match self {
            Frontier::Stack(stack) => stack.push(cell),
            Frontier::Queue(queue) => queue.push_back(cell),
        }
    }

    fn pop(&mut self) -> Option<Cell> {
        match self {
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Queue(queue) => queue.pop_front(),
        }
    }
}

/// Flood-fill based region finder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentExtractor {
    traversal: Traversal,
}

impl ComponentExtractor {
    pub fn new(traversal: Traversal) -> Self {
        Self { traversal }
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Find every connected foreground region of `grid`.
    ///
    /// An all-background grid yields an empty vector.
    pub fn extract(&self, grid: &BinaryGrid) -> Vec<Region> {
        self.label(grid).1
    }

    /// Find every region and return the label map alongside it.
    ///
    /// Label `k` (1-based) marks the cells of `regions[k - 1]`; background
    /// cells keep label 0.
    pub fn label(&self, grid: &BinaryGrid) -> (Array2<u32>, Vec<Region>) {
        let mut labels = Array2::<u32>::zeros(grid.dim());
        let mut regions = Vec::new();

        for seed in grid.foreground_cells() {
            if labels[seed.index()] != 0 {
                continue;
            }

            let label = regions.len() as u32 + 1;
            let region = self.flood(grid, &mut labels, seed, label);
            log::debug!(
                "Region {} seeded at {}: {} px, bbox {:?}",
                label,
                seed,
                region.pixel_count,
                region.bbox.to_tuple()
            );
            regions.push(region);
        }

        (labels, regions)
    }

    fn flood(&self, grid: &BinaryGrid, labels: &mut Array2<u32>, seed: Cell, label: u32) -> Region {
        let mut frontier = Frontier::new(self.traversal);
        let mut bbox = BoundingBox::empty();
        let mut cells = Vec::new();

        // Cells are labeled when queued so none can be queued twice.
        labels[seed.index()] = label;
        frontier.push(seed);

        while let Some(cell) = frontier.pop() {
            bbox.expand_to_include(cell);
            cells.push(cell);

            for neighbor in grid.neighbors(cell) {
                if grid.is_foreground(neighbor) && labels[neighbor.index()] == 0 {
                    labels[neighbor.index()] = label;
                    frontier.push(neighbor);
                }
            }
        }

        Region {
            seed,
            pixel_count: cells.len(),
            bbox,
            cells,
        }
    }
}
