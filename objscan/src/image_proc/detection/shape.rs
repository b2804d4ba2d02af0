//! Geometric shape classification from pixel count and bounding box.
//!
//! Two tests are applied in order:
//!
//! 1. **Rectangle**: the region fills its bounding box exactly
//!    (`pixel_count == width * height`). A box spanning the whole grid is
//!    never accepted as a rectangle, since a blob touching all four grid
//!    edges says nothing about its own outline.
//! 2. **Circle**: the box is square and the pixel count is within a relative
//!    tolerance of the inscribed disk area `π (width / 2)²`.
//!
//! Anything else is [`Shape::Unknown`], which is a regular result and not an
//! error.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::image_proc::detection::aabb::BoundingBox;
use crate::image_proc::detection::components::Region;
use crate::image_proc::detection::config::ClassifierConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shape {
    Rectangle,
    Circle,
    Unknown,
}

impl Shape {
    /// `true` for every outcome except [`Shape::Unknown`].
    pub fn is_classified(&self) -> bool {
        !matches!(self, Shape::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Rectangle => "RECTANGLE",
            Shape::Circle => "CIRCLE",
            Shape::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pure classifier; the same inputs always produce the same [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeClassifier {
    circle_tolerance: f64,
}

impl ShapeClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            circle_tolerance: config.circle_tolerance,
        }
    }

    /// Classify a region of `pixel_count` cells bounded by `bbox` inside a
    /// `grid_rows`×`grid_cols` grid.
    pub fn classify(
        &self,
        pixel_count: usize,
        bbox: &BoundingBox,
        grid_rows: usize,
        grid_cols: usize,
    ) -> Shape {
        if !bbox.is_valid() || pixel_count == 0 {
            return Shape::Unknown;
        }

        if is_rectangle(pixel_count, bbox, grid_rows, grid_cols) {
            Shape::Rectangle
        } else if self.is_circle(pixel_count, bbox) {
            Shape::Circle
        } else {
            Shape::Unknown
        }
    }

    pub fn classify_region(&self, region: &Region, grid_rows: usize, grid_cols: usize) -> Shape {
        self.classify(region.pixel_count, &region.bbox, grid_rows, grid_cols)
    }

    /// Circle test: square box and `|n - π r²| < tolerance · π r²` with
    /// `r = width / 2`.
    pub fn is_circle(&self, pixel_count: usize, bbox: &BoundingBox) -> bool {
        if !bbox.is_square() {
            return false;
        }

        let radius = bbox.width() as f64 / 2.0;
        let expected_area = PI * radius * radius;
        (pixel_count as f64 - expected_area).abs() < self.circle_tolerance * expected_area
    }
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

/// Rectangle test: the box is fully and exactly filled and does not cover
/// the whole grid.
pub fn is_rectangle(pixel_count: usize, bbox: &BoundingBox, grid_rows: usize, grid_cols: usize) -> bool {
    if bbox.spans(grid_rows, grid_cols) {
        return false;
    }
    pixel_count == bbox.area()
}
