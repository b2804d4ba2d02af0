//! Bounding-box overlays on an upscaled canvas.
//!
//! Each grid cell maps to a `scale`×`scale` block of canvas pixels, where
//! `scale = output_size / max(rows, cols)`. A region's outline runs from
//! `(min_row * scale, min_col * scale)` to `((max_row + 1) * scale,
//! (max_col + 1) * scale)` inclusive, one pixel thick. The canvas is one pixel
//! larger than the scaled grid in each direction so outlines on the far grid
//! edges stay visible.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::image_proc::detection::{BoundingBox, Shape};
use crate::image_proc::grid::Cell;
use crate::image_proc::report::{BoundaryReport, ObjectReport};

/// Target size of the longer canvas side.
pub const DEFAULT_OUTPUT_SIZE: usize = 200;

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const RED: [u8; 3] = [255, 0, 0];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Canvas of {canvas} px is too small for a {rows}x{cols} grid")]
    CanvasTooSmall {
        canvas: usize,
        rows: usize,
        cols: usize,
    },
}

/// Which regions get an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlinePolicy {
    #[default]
    All,
    /// Skip regions classified as [`Shape::Unknown`].
    ClassifiedOnly,
}

impl OutlinePolicy {
    pub fn should_draw(&self, shape: Shape) -> bool {
        match self {
            OutlinePolicy::All => true,
            OutlinePolicy::ClassifiedOnly => shape.is_classified(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub output_size: usize,
    /// Applies to the bounding-box mode; the boundary mode always skips
    /// unclassified regions.
    pub outline: OutlinePolicy,
    pub outline_color: [u8; 3],
    /// Paint boundary cells in this color (boundary mode only).
    pub boundary_color: Option<[u8; 3]>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_size: DEFAULT_OUTPUT_SIZE,
            outline: OutlinePolicy::All,
            outline_color: RED,
            boundary_color: None,
        }
    }
}

/// White RGB canvas with a fixed cell-to-pixel scale.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    scale: usize,
}

impl Canvas {
    pub fn new(rows: usize, cols: usize, output_size: usize) -> Result<Self, RenderError> {
        let longest = rows.max(cols);
        let scale = output_size.checked_div(longest).unwrap_or(0);
        if scale == 0 {
            return Err(RenderError::CanvasTooSmall {
                canvas: output_size,
                rows,
                cols,
            });
        }

        let width = (cols * scale + 1) as u32;
        let height = (rows * scale + 1) as u32;
        Ok(Self {
            image: RgbImage::from_pixel(width, height, Rgb(WHITE)),
            scale,
        })
    }

    /// Canvas pixels per grid cell.
    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Color at canvas pixel (row, col), `None` outside the canvas.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        let (width, height) = self.image.dimensions();
        if row < height as usize && col < width as usize {
            Some(self.image.get_pixel(col as u32, row as u32).0)
        } else {
            None
        }
    }

    fn put(&mut self, row: usize, col: usize, color: [u8; 3]) {
        let (width, height) = self.image.dimensions();
        if row < height as usize && col < width as usize {
            self.image.put_pixel(col as u32, row as u32, Rgb(color));
        }
    }

    /// Draw the one-pixel outline of `bbox`.
    pub fn draw_outline(&mut self, bbox: &BoundingBox, color: [u8; 3]) {
        if !bbox.is_valid() {
            return;
        }

        let top = bbox.min_row * self.scale;
        let bottom = (bbox.max_row + 1) * self.scale;
        let left = bbox.min_col * self.scale;
        let right = (bbox.max_col + 1) * self.scale;

        for row in top..=bottom {
            self.put(row, left, color);
            self.put(row, right, color);
        }
        for col in left..=right {
            self.put(top, col, color);
            self.put(bottom, col, color);
        }
    }

    /// Fill the block of canvas pixels covered by `cell`.
    pub fn fill_cell(&mut self, cell: Cell, color: [u8; 3]) {
        let top = cell.row * self.scale;
        let left = cell.col * self.scale;
        for row in top..top + self.scale {
            for col in left..left + self.scale {
                self.put(row, col, color);
            }
        }
    }
}

/// Outline every object of a flood-fill report allowed by `config.outline`.
pub fn render_objects(report: &ObjectReport, config: &RenderConfig) -> Result<RgbImage, RenderError> {
    let mut canvas = Canvas::new(report.grid_rows, report.grid_cols, config.output_size)?;

    for object in &report.objects {
        if config.outline.should_draw(object.shape) {
            canvas.draw_outline(&object.region.bbox, config.outline_color);
        }
    }

    Ok(canvas.into_image())
}

/// Paint boundary cells (when configured) and outline classified regions.
pub fn render_boundaries(
    report: &BoundaryReport,
    config: &RenderConfig,
) -> Result<RgbImage, RenderError> {
    let mut canvas = Canvas::new(report.grid_rows, report.grid_cols, config.output_size)?;

    if let Some(color) = config.boundary_color {
        for region in &report.regions {
            for &cell in region.boundary() {
                canvas.fill_cell(cell, color);
            }
        }
    }

    for region in &report.regions {
        if OutlinePolicy::ClassifiedOnly.should_draw(region.shape) {
            canvas.draw_outline(&region.trace.bbox, config.outline_color);
        }
    }

    Ok(canvas.into_image())
}
