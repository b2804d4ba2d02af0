//! Tunable parameters for the detection passes.
//!
//! Defaults: depth-first flood
//! fill and a 35% relative tolerance on the circle area test. Both structs are
//! `serde`-enabled so they can be embedded in an
//! [`AnalysisConfig`](crate::image_proc::segment::AnalysisConfig) document.
//!
//! ```rust
//! use objscan::image_proc::detection::config::{DetectionConfig, Traversal};
//!
//! let config = DetectionConfig::default();
//! assert_eq!(config.traversal, Traversal::DepthFirst);
//! assert_eq!(config.classifier.circle_tolerance, 0.35);
//! ```

use serde::{Deserialize, Serialize};

/// Default relative tolerance for the circle area test.
pub const DEFAULT_CIRCLE_TOLERANCE: f64 = 0.35;

/// Work-list discipline used by the flood fill.
///
/// Both strategies discover the same regions with the same bounding boxes;
/// only the order in which a region's cells are visited differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// LIFO stack
    #[default]
    DepthFirst,
    /// FIFO queue
    BreadthFirst,
}

/// Shape classifier parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum relative deviation between the pixel count and the area of the
    /// disk inscribed in the bounding box (`|n - A| < tolerance * A`).
    pub circle_tolerance: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            circle_tolerance: DEFAULT_CIRCLE_TOLERANCE,
        }
    }
}

/// Parameters shared by the flood-fill and cell-graph detection modes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub traversal: Traversal,
    pub classifier: ClassifierConfig,
}
