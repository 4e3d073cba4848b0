//! Image preprocessing: decoded image to model input batch
//!
//! The model expects a single NHWC batch of shape (1, 224, 224, 3) with
//! RGB channel values scaled to [0, 1].

use image::{imageops::FilterType, DynamicImage};
use ndarray::Array4;

/// Model input edge length in pixels.
pub const IMG_SIZE: u32 = 224;

/// Convert any decoded image into a normalized single-item batch.
///
/// Handles arbitrary source dimensions and color modes (grayscale, RGBA):
/// the image is converted to 3-channel RGB, resized (not cropped) to
/// 224x224 with a fixed bilinear filter, and scaled by 1/255.
pub fn to_input_batch(image: &DynamicImage) -> Array4<f32> {
    let resized = image
        .resize_exact(IMG_SIZE, IMG_SIZE, FilterType::Triangle)
        .to_rgb8();

    let mut batch = Array4::<f32>::zeros((1, IMG_SIZE as usize, IMG_SIZE as usize, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        batch[[0, y as usize, x as usize, 0]] = r as f32 / 255.0;
        batch[[0, y as usize, x as usize, 1]] = g as f32 / 255.0;
        batch[[0, y as usize, x as usize, 2]] = b as f32 / 255.0;
    }
    batch
}
