//! Structured detection results and their text form.
//!
//! Both report types are plain data (serde-serializable) and implement
//! `Display` with the plain-text layout of the command-line output:
//!
//! ```text
//! Object 1: RECTANGLE
//! Object 2: UNKNOWN
//! ```
//!
//! and, for the boundary mode,
//!
//! ```text
//! Object 1
//! Area: 4
//!
//! Boundary pixels: (0,1) (1,1) (1,0) (0,0)
//!
//! Total objects detected = 1
//! ```

use std::fmt;

use serde::Serialize;

use crate::image_proc::detection::{BoundingBox, ComponentTrace, Region, Shape};
use crate::image_proc::grid::Cell;

/// A flood-fill region together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedObject {
    /// 1-based position in seed-discovery order.
    pub index: usize,
    pub region: Region,
    pub shape: Shape,
}

/// Result of the flood-fill (bounding box) mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectReport {
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub objects: Vec<DetectedObject>,
}

impl ObjectReport {
    /// `true` for the "no object detected" outcome.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Number of objects classified as `shape`.
    pub fn count(&self, shape: Shape) -> usize {
        self.objects.iter().filter(|o| o.shape == shape).count()
    }

    pub fn shapes(&self) -> Vec<Shape> {
        self.objects.iter().map(|o| o.shape).collect()
    }

    pub fn bounding_boxes(&self) -> Vec<BoundingBox> {
        self.objects.iter().map(|o| o.region.bbox).collect()
    }
}

impl fmt::Display for ObjectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No object detected");
        }
        for object in &self.objects {
            writeln!(f, "Object {}: {}", object.index, object.shape)?;
        }
        Ok(())
    }
}

/// A cell-graph component with its boundary and classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundaryRegion {
    /// 1-based position along the node chain.
    pub index: usize,
    pub trace: ComponentTrace,
    pub shape: Shape,
}

impl BoundaryRegion {
    pub fn area(&self) -> usize {
        self.trace.area
    }

    pub fn boundary(&self) -> &[Cell] {
        &self.trace.boundary
    }
}

/// Result of the cell-graph (boundary) mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundaryReport {
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub regions: Vec<BoundaryRegion>,
}

impl BoundaryReport {
    pub fn total(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Sum of all region areas, i.e. the foreground cell count.
    pub fn total_area(&self) -> usize {
        self.regions.iter().map(BoundaryRegion::area).sum()
    }
}

impl fmt::Display for BoundaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for region in &self.regions {
            writeln!(f, "Object {}", region.index)?;
            writeln!(f, "Area: {}", region.area())?;
            writeln!(f)?;
            write!(f, "Boundary pixels: ")?;
            for cell in region.boundary() {
                write!(f, "{cell} ")?;
            }
            writeln!(f)?;
            writeln!(f)?;
        }
        writeln!(f, "Total objects detected = {}", self.total())
    }
}
