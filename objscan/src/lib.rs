//! Connected-component detection and shape classification for binary grids.
//!
//! ```rust
//! use objscan::image_proc::{detect_objects, BinaryGrid, DetectionConfig, Shape};
//!
//! let grid = BinaryGrid::from_rows(&[
//!     [0u8, 0, 0, 0, 0],
//!     [0, 1, 1, 1, 0],
//!     [0, 1, 1, 1, 0],
//!     [0, 1, 1, 1, 0],
//!     [0, 0, 0, 0, 0],
//! ])
//! .unwrap();
//!
//! let report = detect_objects(&grid, &DetectionConfig::default());
//! assert_eq!(report.shapes(), vec![Shape::Rectangle]);
//! println!("{report}");
//! ```

pub mod image_proc;
