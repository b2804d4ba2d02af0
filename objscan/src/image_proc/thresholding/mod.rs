//! Grayscale to binary grid conversion.
//!
//! Objects are dark shapes on a light background, so a pixel becomes
//! foreground when its intensity falls below a cutoff. The cutoff is chosen
//! by a [`ThresholdPolicy`]:
//!
//! - [`ThresholdPolicy::MeanOffset`]: image mean minus a margin, optionally
//!   floored at zero
//! - [`ThresholdPolicy::Fixed`]: caller-supplied constant
//! - [`ThresholdPolicy::NotWhite`]: everything except the exact white level
//! - [`ThresholdPolicy::Otsu`]: Otsu's method over the 256-level histogram

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::image_proc::grid::{BinaryGrid, GridError};

/// Margin subtracted from the mean by the default policy.
pub const DEFAULT_MEAN_MARGIN: f64 = 5.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("Cannot threshold an empty {rows}x{cols} image")]
    EmptyImage { rows: usize, cols: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// How the foreground cutoff is derived from a grayscale image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// `cutoff = mean - margin`, floored at 0 when `clamp_to_zero` is set.
    MeanOffset { margin: f64, clamp_to_zero: bool },
    /// Constant cutoff.
    Fixed { cutoff: f64 },
    /// Foreground is any value other than `max_value`.
    NotWhite { max_value: u8 },
    /// Otsu's between-class variance maximum.
    Otsu,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        ThresholdPolicy::MeanOffset {
            margin: DEFAULT_MEAN_MARGIN,
            clamp_to_zero: false,
        }
    }
}

impl ThresholdPolicy {
    /// Cutoff for `image`: pixels strictly below it are foreground.
    ///
    /// For [`ThresholdPolicy::NotWhite`] this is the white level itself;
    /// values above it (out of range for the source format) still count as
    /// foreground in [`binarize`].
    pub fn cutoff(&self, image: ArrayView2<u8>) -> Result<f64, ThresholdError> {
        let (rows, cols) = image.dim();
        if rows == 0 || cols == 0 {
            return Err(ThresholdError::EmptyImage { rows, cols });
        }

        let cutoff = match *self {
            ThresholdPolicy::MeanOffset {
                margin,
                clamp_to_zero,
            } => {
                let cutoff = mean_intensity(image) - margin;
                if clamp_to_zero {
                    cutoff.max(0.0)
                } else {
                    cutoff
                }
            }
            ThresholdPolicy::Fixed { cutoff } => cutoff,
            ThresholdPolicy::NotWhite { max_value } => max_value as f64,
            ThresholdPolicy::Otsu => otsu_cutoff(image),
        };

        Ok(cutoff)
    }
}

/// Mean pixel intensity of a non-empty image.
pub fn mean_intensity(image: ArrayView2<u8>) -> f64 {
    let sum: u64 = image.iter().map(|&v| v as u64).sum();
    sum as f64 / image.len() as f64
}

/// Calculate Otsu's threshold for an 8-bit grayscale image.
///
/// Returns the histogram level `t` maximizing the between-class variance of
/// the classes `[0, t]` and `(t, 255]`. A flat image returns its only level.
pub fn otsu_threshold(image: ArrayView2<u8>) -> f64 {
    let mut histogram = [0u64; 256];
    for &v in image.iter() {
        histogram[v as usize] += 1;
    }

    let total_pixels = image.len() as f64;
    if total_pixels == 0.0 {
        return 0.0;
    }

    let occupied: Vec<usize> = (0..256).filter(|&i| histogram[i] > 0).collect();
    if occupied.len() < 2 {
        return occupied.first().copied().unwrap_or(0) as f64;
    }

    let total_weighted: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut cum_count = 0u64;
    let mut cum_weighted = 0.0;
    let mut best_threshold = 0;
    let mut max_variance = 0.0;

    for (t, &count) in histogram.iter().enumerate().take(255) {
        cum_count += count;
        cum_weighted += t as f64 * count as f64;

        let w_bg = cum_count as f64 / total_pixels;
        if w_bg == 0.0 || w_bg == 1.0 {
            continue;
        }
        let w_fg = 1.0 - w_bg;

        let mean_bg = cum_weighted / cum_count as f64;
        let mean_fg = (total_weighted - cum_weighted) / (total_pixels - cum_count as f64);

        let variance = w_bg * w_fg * (mean_bg - mean_fg).powi(2);
        if variance > max_variance {
            max_variance = variance;
            best_threshold = t;
        }
    }

    best_threshold as f64
}

/// Otsu level shifted so the dark class (`<= t`) falls below the cutoff.
/// A flat image gets its own level back, leaving no foreground.
fn otsu_cutoff(image: ArrayView2<u8>) -> f64 {
    let t = otsu_threshold(image);
    let is_flat = image.iter().all(|&v| v as f64 == t);
    if is_flat {
        t
    } else {
        t + 1.0
    }
}

/// Turn a grayscale image into a [`BinaryGrid`] using `policy`.
pub fn binarize(image: ArrayView2<u8>, policy: &ThresholdPolicy) -> Result<BinaryGrid, ThresholdError> {
    let cutoff = policy.cutoff(image)?;
    log::debug!("Thresholding {:?} image with cutoff {:.3}", image.dim(), cutoff);

    let mask = match *policy {
        ThresholdPolicy::NotWhite { max_value } => image.mapv(|v| v != max_value),
        _ => image.mapv(|v| (v as f64) < cutoff),
    };

    Ok(BinaryGrid::new(mask)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr2, Array2};

    #[test]
    fn test_mean_offset_cutoff() {
        let image = arr2(&[[250u8, 250], [250, 10]]);
        // mean = 190, cutoff = 185
        let cutoff = ThresholdPolicy::default().cutoff(image.view()).unwrap();
        assert_relative_eq!(cutoff, 185.0, epsilon = 1e-12);

        let grid = binarize(image.view(), &ThresholdPolicy::default()).unwrap();
        assert_eq!(grid.foreground_count(), 1);
        assert_eq!(grid.get(1, 1), Some(true));
    }

    #[test]
    fn test_mean_offset_clamps_at_zero() {
        let image = Array2::from_elem((3, 3), 2u8);
        let policy = ThresholdPolicy::MeanOffset {
            margin: 5.0,
            clamp_to_zero: true,
        };
        assert_eq!(policy.cutoff(image.view()).unwrap(), 0.0);

        let unclamped = ThresholdPolicy::default();
        assert_relative_eq!(unclamped.cutoff(image.view()).unwrap(), -3.0);

        // Either way a flat image has no foreground.
        assert_eq!(binarize(image.view(), &policy).unwrap().foreground_count(), 0);
    }

    #[test]
    fn test_fixed_and_not_white() {
        let image = arr2(&[[0u8, 127, 128, 255]]);

        let fixed = binarize(image.view(), &ThresholdPolicy::Fixed { cutoff: 128.0 }).unwrap();
        assert_eq!(fixed.view().iter().copied().collect::<Vec<_>>(), vec![true, true, false, false]);

        let not_white =
            binarize(image.view(), &ThresholdPolicy::NotWhite { max_value: 255 }).unwrap();
        assert_eq!(not_white.view().iter().copied().collect::<Vec<_>>(), vec![true, true, true, false]);

        let low_white =
            binarize(image.view(), &ThresholdPolicy::NotWhite { max_value: 127 }).unwrap();
        assert_eq!(low_white.view().iter().copied().collect::<Vec<_>>(), vec![true, false, true, true]);
    }

    #[test]
    fn test_otsu_separates_bimodal_image() {
        let mut image = Array2::from_elem((10, 10), 200u8);
        for r in 2..5 {
            for c in 2..5 {
                image[[r, c]] = 20;
            }
        }

        let t = otsu_threshold(image.view());
        assert!((20.0..200.0).contains(&t));

        let grid = binarize(image.view(), &ThresholdPolicy::Otsu).unwrap();
        assert_eq!(grid.foreground_count(), 9);
    }

    #[test]
    fn test_otsu_flat_image_has_no_foreground() {
        let image = Array2::from_elem((4, 4), 90u8);
        assert_eq!(otsu_threshold(image.view()), 90.0);
        let grid = binarize(image.view(), &ThresholdPolicy::Otsu).unwrap();
        assert_eq!(grid.foreground_count(), 0);
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let image = Array2::<u8>::zeros((0, 3));
        assert_eq!(
            binarize(image.view(), &ThresholdPolicy::default()),
            Err(ThresholdError::EmptyImage { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn test_policy_json() {
        let policy: ThresholdPolicy =
            serde_json::from_str(r#"{ "kind": "fixed", "cutoff": 128.0 }"#).unwrap();
        assert_eq!(policy, ThresholdPolicy::Fixed { cutoff: 128.0 });

        let policy: ThresholdPolicy = serde_json::from_str(r#"{ "kind": "otsu" }"#).unwrap();
        assert_eq!(policy, ThresholdPolicy::Otsu);
    }
}
