pub mod aabb;
pub mod components;
pub mod config;
pub mod shape;
pub mod sparse_graph;

pub use aabb::BoundingBox;
pub use components::{ComponentExtractor, Region};
pub use config::{ClassifierConfig, DetectionConfig, Traversal, DEFAULT_CIRCLE_TOLERANCE};
pub use shape::{is_rectangle, Shape, ShapeClassifier};
pub use sparse_graph::{CellGraph, CellNode, ComponentTrace, Links, NodeId, VisitedNodes};
