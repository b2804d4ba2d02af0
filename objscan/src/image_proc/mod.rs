//! Object detection on binary grids
//!
//! This module turns a grayscale image or a binary mask into labelled regions,
//! classifies each region as a rectangle, circle or unknown shape, extracts
//! region boundaries from a sparse cell graph, and renders bounding-box
//! overlays.

pub mod detection;
pub mod grid;
pub mod image;
pub mod render;
pub mod report;
pub mod segment;
pub mod thresholding;

// Re-export key functionality for easier access
pub use detection::{BoundingBox, ComponentExtractor, DetectionConfig, Region, Shape};
pub use grid::{BinaryGrid, Cell, GridError};
pub use render::{render_boundaries, render_objects, RenderConfig, RenderError};
pub use report::{BoundaryReport, ObjectReport};
pub use segment::{analyze_grayscale, detect_boundaries, detect_objects, AnalysisConfig};
pub use thresholding::{binarize, otsu_threshold, ThresholdPolicy};
