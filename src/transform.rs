//! The transform seam between decoded images and tensor samples.
//!
//! The index never owns a transform; callers pass one explicitly so that
//! independent consumers (say, a training and an evaluation split) can hold
//! their own pipelines.

use image::imageops::FilterType;
use image::RgbImage;
use ndarray::Array3;

/// Converts a decoded RGB image into a fixed-shape tensor.
///
/// Implementations must be pure: the sample accessor may be called
/// concurrently from several threads sharing one transform.
pub trait Transform: Sync {
    fn apply(&self, image: RgbImage) -> Array3<f32>;
}

/// Reference pipeline: resize to a fixed square resolution, then scale the
/// pixel data into `[0, 1]` channel-first floats.
#[derive(Clone, Copy, Debug)]
pub struct ResizeToTensor {
    /// Square edge length of the output, in pixels.
    pub size: u32,
}

impl Default for ResizeToTensor {
    fn default() -> Self {
        Self { size: 256 }
    }
}

impl Transform for ResizeToTensor {
    fn apply(&self, image: RgbImage) -> Array3<f32> {
        let resized = image::imageops::resize(&image, self.size, self.size, FilterType::Triangle);
        let (width, height) = resized.dimensions();

        Array3::from_shape_fn((3, height as usize, width as usize), |(channel, y, x)| {
            f32::from(resized.get_pixel(x as u32, y as u32).0[channel]) / 255.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn resize_to_tensor_produces_chw_unit_floats() {
        let image = RgbImage::from_pixel(8, 4, Rgb([255, 128, 0]));
        let tensor = ResizeToTensor { size: 16 }.apply(image);

        assert_eq!(tensor.shape(), &[3, 16, 16]);
        assert!((tensor[[0, 0, 0]] - 1.0).abs() < 1e-6);
        assert!(tensor.iter().all(|value| (0.0..=1.0).contains(value)));
    }

    #[test]
    fn default_size_matches_reference_pipeline() {
        assert_eq!(ResizeToTensor::default().size, 256);
    }
}
