use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::Array4;

use crate::errors::PredictError;

pub const INPUT_WIDTH: u32 = 224;
pub const INPUT_HEIGHT: u32 = 224;

/// Converts a decoded image into the classifier's input tensor.
///
/// The image is resized to exactly 224x224 (Triangle filter, fixed so the
/// numeric output is reproducible) and scaled to [-1, 1] with the
/// MobileNetV2 convention `pixel / 127.5 - 1`. Output shape is
/// `(1, 224, 224, 3)`, channels last, batch dimension of 1.
pub fn preprocess(image: &RgbImage) -> Result<Array4<f32>, PredictError> {
    let resized = imageops::resize(image, INPUT_WIDTH, INPUT_HEIGHT, FilterType::Triangle);

    let mut values = Vec::with_capacity((INPUT_WIDTH * INPUT_HEIGHT * 3) as usize);
    for pixel in resized.pixels() {
        for channel in 0..3 {
            values.push(pixel[channel] as f32 / 127.5 - 1.0);
        }
    }

    Array4::from_shape_vec((1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize, 3), values)
        .map_err(|err| PredictError::PreprocessFailure(err.to_string()))
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn output_shape_is_fixed_regardless_of_aspect_ratio() {
        for (width, height) in [(10, 10), (64, 13), (13, 64), (640, 480)] {
            let image = RgbImage::new(width, height);
            let tensor = preprocess(&image).unwrap();
            assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        }
    }

    #[test]
    fn black_maps_to_minus_one() {
        let image = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let tensor = preprocess(&image).unwrap();
        assert!(tensor.iter().all(|&value| value == -1.0));
    }

    #[test]
    fn white_maps_to_plus_one() {
        let image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        let tensor = preprocess(&image).unwrap();
        assert!(tensor.iter().all(|&value| value == 1.0));
    }

    #[test]
    fn channels_are_normalized_independently() {
        // Solid color, so resampling cannot change any pixel value.
        let image = RgbImage::from_pixel(50, 50, Rgb([255, 0, 51]));
        let tensor = preprocess(&image).unwrap();

        assert_eq!(tensor[[0, 100, 100, 0]], 1.0);
        assert_eq!(tensor[[0, 100, 100, 1]], -1.0);
        assert_eq!(tensor[[0, 100, 100, 2]], 51.0 / 127.5 - 1.0);
        assert_eq!(tensor[[0, 0, 0, 2]], tensor[[0, 223, 223, 2]]);
    }
}
