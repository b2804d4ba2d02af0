use image::{GrayImage, Luma};
use ndarray::Array2;

use crate::image_proc::grid::BinaryGrid;

/// Converts an ndarray Array2<u8> to an image::GrayImage
///
/// Array indices [row, col] map to pixel coordinates (x = col, y = row).
/// Note that array dimensions are (height, width) while image dimensions are (width, height).
pub fn array2_to_gray_image(arr: &Array2<u8>) -> GrayImage {
    let (height, width) = arr.dim();
    let mut img = GrayImage::new(width as u32, height as u32);

    for y in 0..height {
        for x in 0..width {
            img.put_pixel(x as u32, y as u32, Luma([arr[[y, x]]]));
        }
    }

    img
}

/// Converts an in-memory image::GrayImage to an Array2<u8> of shape (height, width)
pub fn gray_image_to_array2(img: &GrayImage) -> Array2<u8> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        img.get_pixel(x as u32, y as u32).0[0]
    })
}

/// Renders a grid as a black-on-white mask: foreground 0, background 255.
pub fn grid_to_mask_image(grid: &BinaryGrid) -> GrayImage {
    let levels = grid.view().mapv(|fg| if fg { 0u8 } else { 255u8 });
    array2_to_gray_image(&levels)
}
