//! Synthetic binary masks. `true` marks a foreground cell.

use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `rows`×`cols` mask with a filled `height`×`width` block at (`top`, `left`).
/// Parts of the block outside the mask are dropped.
pub fn filled_rect(
    rows: usize,
    cols: usize,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
) -> Array2<bool> {
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        (top..top + height).contains(&r) && (left..left + width).contains(&c)
    })
}

/// Disk of cells with `(r - cr)² + (c - cc)² <= radius²`.
pub fn filled_disk(
    rows: usize,
    cols: usize,
    center_row: usize,
    center_col: usize,
    radius: usize,
) -> Array2<bool> {
    let r2 = (radius * radius) as i64;
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let dr = r as i64 - center_row as i64;
        let dc = c as i64 - center_col as i64;
        dr * dr + dc * dc <= r2
    })
}

/// L made of a `size`-tall vertical bar and a `size`-wide foot along its
/// bottom, both `thickness` cells thick, with the corner at (`top`, `left`).
pub fn l_shape(
    rows: usize,
    cols: usize,
    top: usize,
    left: usize,
    size: usize,
    thickness: usize,
) -> Array2<bool> {
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let in_bar = (top..top + size).contains(&r) && (left..left + thickness).contains(&c);
        let in_foot = (top + size - thickness..top + size).contains(&r)
            && (left..left + size).contains(&c);
        in_bar || in_foot
    })
}

/// Parse an ASCII picture: `#` or `1` is foreground, anything else is
/// background. Blank lines are skipped and surrounding whitespace trimmed;
/// short lines are padded with background.
pub fn mask_from_ascii(picture: &str) -> Array2<bool> {
    let lines: Vec<&str> = picture
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let rows = lines.len();
    let cols = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    let mut mask = Array2::from_elem((rows, cols), false);
    for (r, line) in lines.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            mask[[r, c]] = matches!(ch, '#' | '1');
        }
    }
    mask
}

/// Reproducible noise mask: each cell is foreground with probability `density`.
pub fn random_mask(rows: usize, cols: usize, density: f64, seed: u64) -> Array2<bool> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Array2::from_shape_simple_fn((rows, cols), || rng.random_bool(density))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(mask: &Array2<bool>) -> usize {
        mask.iter().filter(|&&v| v).count()
    }

    #[test]
    fn test_filled_rect() {
        let mask = filled_rect(5, 5, 1, 1, 3, 3);
        assert_eq!(count(&mask), 9);
        assert!(mask[[1, 1]] && mask[[3, 3]]);
        assert!(!mask[[0, 0]] && !mask[[4, 4]]);

        // Clipped at the edge
        assert_eq!(count(&filled_rect(4, 4, 2, 2, 5, 5)), 4);
    }

    #[test]
    fn test_filled_disk_extent() {
        let disk = filled_disk(20, 20, 10, 10, 5);
        assert_eq!(count(&disk), 81);
        assert!(disk[[5, 10]] && disk[[15, 10]] && disk[[10, 5]] && disk[[10, 15]]);
        assert!(!disk[[4, 10]] && !disk[[6, 6]]);
    }

    #[test]
    fn test_l_shape() {
        let mask = l_shape(6, 6, 1, 1, 4, 1);
        assert_eq!(count(&mask), 7);
        assert!(mask[[1, 1]] && mask[[4, 1]] && mask[[4, 4]]);
        assert!(!mask[[1, 4]]);
    }

    #[test]
    fn test_mask_from_ascii() {
        let mask = mask_from_ascii(
            "
            #..
            .##
            ",
        );
        assert_eq!(mask.dim(), (2, 3));
        assert_eq!(count(&mask), 3);
        assert!(mask[[0, 0]] && mask[[1, 2]]);
    }

    #[test]
    fn test_random_mask_is_seeded() {
        let a = random_mask(16, 16, 0.4, 7);
        let b = random_mask(16, 16, 0.4, 7);
        assert_eq!(a, b);
        assert_eq!(count(&random_mask(8, 8, 0.0, 1)), 0);
        assert_eq!(count(&random_mask(8, 8, 1.0, 1)), 64);
    }
}
