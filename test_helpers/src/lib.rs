//! Test infrastructure shared by the workspace crates.
//!
//! Two concerns live here:
//!
//! - **Artifact paths**: [`find_project_root`], [`get_output_dir`] and
//!   [`output_path`] give tests a stable `test_output/` directory at the
//!   workspace root for images and logs worth inspecting by hand.
//! - **Grid fixtures**: the [`grids`] module builds synthetic binary masks
//!   (rectangles, disks, L-shapes, seeded random noise) as `Array2<bool>`.
//!
//! ```rust
//! use test_helpers::grids::filled_disk;
//!
//! let disk = filled_disk(20, 20, 10, 10, 5);
//! assert_eq!(disk.iter().filter(|&&v| v).count(), 81);
//! ```

pub mod grids;

use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),
}

/// Walk up from the current directory to the `Cargo.toml` holding the
/// `[workspace]` section.
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let mut current_dir = env::current_dir().map_err(|e| {
        TestHelperError::ProjectRootNotFound(format!("Failed to get current directory: {}", e))
    })?;

    loop {
        let cargo_toml = current_dir.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml).map_err(|e| {
                TestHelperError::ProjectRootNotFound(format!("Failed to read Cargo.toml: {}", e))
            })?;

            if content.contains("[workspace]") {
                return Ok(current_dir);
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Err(TestHelperError::ProjectRootNotFound(
        "Workspace root not found".to_string(),
    ))
}

static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_project_root().expect("Failed to find project root directory"));

/// `<workspace root>/test_output`, created on first use.
pub fn get_output_dir() -> PathBuf {
    let output_dir = PROJECT_ROOT.join("test_output");

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    }

    output_dir
}

/// Path of a test artifact inside [`get_output_dir`].
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    get_output_dir().join(path)
}
