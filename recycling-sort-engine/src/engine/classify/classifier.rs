use std::collections::HashMap;

use image::DynamicImage;
use image::imageops::FilterType;
use thiserror::Error;

/// Outcome of one classification request. Immutable once produced.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// Best label. Free-form; zone matching is case-insensitive.
    pub label: String,
    /// Per-label confidence in `[0, 1]`.
    pub confidences: HashMap<String, f64>,
}

#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The model could not be loaded at startup. Fatal: the game
    /// cannot be offered without it.
    #[error("classification model unavailable: {0}")]
    ModelUnavailable(String),
    /// The submitted image could not be decoded.
    #[error("could not decode input image: {0}")]
    Decode(#[from] image::ImageError),
    /// Inference failed for this request only; gameplay continues with
    /// an unknown label.
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Opaque still-image classifier. Implementations run on the compute
/// task pool and must not touch scene state; results come back through
/// the main schedule.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifyError>;
}

/// Fit `image` into a `side` x `side` square, preserving aspect ratio
/// and padding with black. Models expect fixed input dimensions.
pub fn letterbox(image: &DynamicImage, side: u32) -> DynamicImage {
    let resized = image.resize(side, side, FilterType::Triangle);
    if resized.width() == side && resized.height() == side {
        return resized;
    }

    let mut canvas = image::RgbaImage::from_pixel(side, side, image::Rgba([0, 0, 0, 255]));
    let x = (side - resized.width()) / 2;
    let y = (side - resized.height()) / 2;
    image::imageops::overlay(&mut canvas, &resized.to_rgba8(), i64::from(x), i64::from(y));
    DynamicImage::ImageRgba8(canvas)
}

/// Mean RGB over every pixel, in `[0, 255]` per channel.
pub fn mean_rgb(image: &DynamicImage) -> [f64; 3] {
    let rgb = image.to_rgb8();
    let count = (rgb.width() as u64 * rgb.height() as u64) as f64;
    if count == 0.0 {
        return [0.0; 3];
    }
    let mut acc = [0.0f64; 3];
    for pixel in rgb.pixels() {
        acc[0] += f64::from(pixel[0]);
        acc[1] += f64::from(pixel[1]);
        acc[2] += f64::from(pixel[2]);
    }
    [acc[0] / count, acc[1] / count, acc[2] / count]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn letterbox_squares_a_wide_image() {
        let wide = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 10, Rgb([255, 255, 255])));
        let boxed = letterbox(&wide, 64);
        assert_eq!((boxed.width(), boxed.height()), (64, 64));
        // White content strip, black padding above and below.
        let mean = mean_rgb(&boxed);
        assert!(mean[0] > 40.0 && mean[0] < 90.0);
    }

    #[test]
    fn letterbox_passes_squares_through_unpadded() {
        let square = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([200, 0, 0])));
        let boxed = letterbox(&square, 32);
        assert_eq!((boxed.width(), boxed.height()), (32, 32));
        let mean = mean_rgb(&boxed);
        assert!(mean[0] > 150.0 && mean[1] < 20.0);
    }
}
