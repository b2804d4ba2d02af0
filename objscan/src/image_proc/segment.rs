//! End-to-end detection passes over a grid or a grayscale image.

use image::{GrayImage, RgbImage};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::image_proc::detection::{
    CellGraph, ComponentExtractor, DetectionConfig, Shape, ShapeClassifier,
};
use crate::image_proc::grid::BinaryGrid;
use crate::image_proc::image::gray_image_to_array2;
use crate::image_proc::render::{render_objects, RenderConfig, RenderError};
use crate::image_proc::report::{BoundaryRegion, BoundaryReport, DetectedObject, ObjectReport};
use crate::image_proc::thresholding::{binarize, ThresholdError, ThresholdPolicy};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Thresholding failed: {0}")]
    Threshold(#[from] ThresholdError),
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
    #[error("Invalid analysis config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Every tunable of a full grayscale-to-overlay run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub threshold: ThresholdPolicy,
    pub detection: DetectionConfig,
    pub render: RenderConfig,
}

impl AnalysisConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Flood-fill every region of `grid` and classify it.
pub fn detect_objects(grid: &BinaryGrid, config: &DetectionConfig) -> ObjectReport {
    let (rows, cols) = grid.dim();
    let classifier = ShapeClassifier::new(&config.classifier);
    let regions = ComponentExtractor::new(config.traversal).extract(grid);

    let objects: Vec<DetectedObject> = regions
        .into_iter()
        .enumerate()
        .map(|(i, region)| {
            let shape = classifier.classify_region(&region, rows, cols);
            DetectedObject {
                index: i + 1,
                region,
                shape,
            }
        })
        .collect();

    let report = ObjectReport {
        grid_rows: rows,
        grid_cols: cols,
        objects,
    };

    if report.is_empty() {
        log::warn!("No object detected in {rows}x{cols} grid");
    } else {
        log::info!(
            "Detected {} objects in {}x{} grid ({} rectangles, {} circles)",
            report.len(),
            rows,
            cols,
            report.count(Shape::Rectangle),
            report.count(Shape::Circle),
        );
    }

    report
}

/// Walk the sparse cell graph of `grid`, collecting each component's area,
/// boundary and classification.
pub fn detect_boundaries(grid: &BinaryGrid, config: &DetectionConfig) -> BoundaryReport {
    let (rows, cols) = grid.dim();
    let classifier = ShapeClassifier::new(&config.classifier);
    let graph = CellGraph::build(grid);

    let regions: Vec<BoundaryRegion> = graph
        .components()
        .into_iter()
        .enumerate()
        .map(|(i, trace)| {
            let shape = classifier.classify(trace.area, &trace.bbox, rows, cols);
            BoundaryRegion {
                index: i + 1,
                trace,
                shape,
            }
        })
        .collect();

    let report = BoundaryReport {
        grid_rows: rows,
        grid_cols: cols,
        regions,
    };

    log::info!(
        "Traced {} components covering {} cells in {}x{} grid",
        report.total(),
        report.total_area(),
        rows,
        cols
    );

    report
}

/// Threshold a grayscale image and run flood-fill detection on the result.
pub fn analyze_grayscale(
    image: ArrayView2<u8>,
    config: &AnalysisConfig,
) -> Result<ObjectReport, AnalysisError> {
    let grid = binarize(image, &config.threshold)?;
    Ok(detect_objects(&grid, &config.detection))
}

/// [`analyze_grayscale`] for an in-memory [`GrayImage`].
pub fn analyze_gray_image(
    image: &GrayImage,
    config: &AnalysisConfig,
) -> Result<ObjectReport, AnalysisError> {
    let levels = gray_image_to_array2(image);
    analyze_grayscale(levels.view(), config)
}

/// Detection plus the outlined canvas.
pub fn annotate_grayscale(
    image: ArrayView2<u8>,
    config: &AnalysisConfig,
) -> Result<(ObjectReport, RgbImage), AnalysisError> {
    let report = analyze_grayscale(image, config)?;
    let canvas = render_objects(&report, &config.render)?;
    Ok((report, canvas))
}
