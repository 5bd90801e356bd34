//! Image preprocessing: pixel-format normalization, resizing, and tensor
//! conversion.
//!
//! The policy is fixed by construction parameters: a square target edge
//! length and a quantization flag selecting the value-range treatment.
//! Preprocessing always copies; the caller's image is never mutated.

use crate::core::constants::{DEFAULT_INPUT_SIZE, TENSOR_CHANNELS};
use crate::core::errors::ClassifyError;
use crate::core::inference::TensorInput;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use ndarray::Array4;
use rayon::prelude::*;
use tracing::debug;

/// Converts arbitrary-sized color images into fixed-shape model inputs.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    input_size: u32,
    quantized: bool,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            quantized: false,
        }
    }
}

impl Preprocessor {
    /// Creates a preprocessor with the given target edge length and
    /// normalization policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Config`] if `input_size` is zero.
    pub fn new(input_size: u32, quantized: bool) -> Result<Self, ClassifyError> {
        if input_size == 0 {
            return Err(ClassifyError::config(
                "input size must be greater than 0",
            ));
        }
        Ok(Self {
            input_size,
            quantized,
        })
    }

    /// Switches the normalization policy, keeping the target size.
    pub fn with_quantized(mut self, quantized: bool) -> Self {
        self.quantized = quantized;
        self
    }

    /// Returns the target square edge length.
    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    /// Returns true when the quantized (native value range) policy is active.
    pub fn is_quantized(&self) -> bool {
        self.quantized
    }

    /// Converts an image to the canonical 4-channel RGBA format.
    ///
    /// Always copies, so the caller's image stays untouched. Alpha is
    /// carried through here and dropped during tensor conversion.
    pub fn to_canonical(&self, image: &DynamicImage) -> RgbaImage {
        image.to_rgba8()
    }

    /// Stretch-resizes to `input_size x input_size` with bilinear
    /// interpolation.
    ///
    /// The original aspect ratio is deliberately ignored; callers wanting
    /// aspect-preserving behavior crop or pad before classifying.
    pub fn resize(&self, image: &RgbaImage) -> RgbaImage {
        imageops::resize(image, self.input_size, self.input_size, FilterType::Triangle)
    }

    /// Converts a resized canonical image into the model input tensor.
    ///
    /// Layout is NHWC `[1, size, size, 3]`; alpha is dropped. Under the
    /// float policy every channel value is rescaled from `[0, 255]` to
    /// `[0, 1]`; under the quantized policy the native byte values pass
    /// through unchanged.
    pub fn tensorize(&self, image: &RgbaImage) -> TensorInput {
        let size = self.input_size as usize;
        if self.quantized {
            let mut tensor = Array4::<u8>::zeros((1, size, size, TENSOR_CHANNELS));
            for (x, y, pixel) in image.enumerate_pixels() {
                for channel in 0..TENSOR_CHANNELS {
                    tensor[[0, y as usize, x as usize, channel]] = pixel[channel];
                }
            }
            TensorInput::Uint8(tensor)
        } else {
            let mut tensor = Array4::<f32>::zeros((1, size, size, TENSOR_CHANNELS));
            for (x, y, pixel) in image.enumerate_pixels() {
                for channel in 0..TENSOR_CHANNELS {
                    tensor[[0, y as usize, x as usize, channel]] =
                        pixel[channel] as f32 / 255.0;
                }
            }
            TensorInput::Float32(tensor)
        }
    }

    /// Runs the full preprocessing chain on one image.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidInput`] for zero-sized images.
    pub fn process(&self, image: &DynamicImage) -> Result<TensorInput, ClassifyError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ClassifyError::invalid_input(format!(
                "image has degenerate dimensions {}x{}",
                image.width(),
                image.height()
            )));
        }
        debug!(
            width = image.width(),
            height = image.height(),
            target = self.input_size,
            quantized = self.quantized,
            "preprocessing image"
        );
        let canonical = self.to_canonical(image);
        let resized = self.resize(&canonical);
        Ok(self.tensorize(&resized))
    }

    /// Preprocesses a batch of images in parallel.
    pub fn process_batch(
        &self,
        images: &[DynamicImage],
    ) -> Result<Vec<TensorInput>, ClassifyError> {
        images.par_iter().map(|image| self.process(image)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn uniform_image(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([value, value, value, 255]),
        ))
    }

    #[test]
    fn any_resolution_maps_to_fixed_shape() {
        let pre = Preprocessor::new(224, false).unwrap();
        for (w, h) in [(1, 1), (300, 300), (640, 480), (64, 1024)] {
            let tensor = pre.process(&uniform_image(w, h, 128)).unwrap();
            assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        }
    }

    #[test]
    fn float_policy_rescales_into_unit_range() {
        let pre = Preprocessor::new(32, false).unwrap();
        let tensor = pre.process(&uniform_image(48, 48, 255)).unwrap();
        match tensor {
            TensorInput::Float32(arr) => {
                for &v in arr.iter() {
                    assert!((0.0..=1.0).contains(&v));
                }
                assert!((arr[[0, 0, 0, 0]] - 1.0).abs() < f32::EPSILON);
            }
            TensorInput::Uint8(_) => panic!("float policy produced a quantized tensor"),
        }
    }

    #[test]
    fn quantized_policy_keeps_native_range() {
        let pre = Preprocessor::new(32, true).unwrap();
        let tensor = pre.process(&uniform_image(48, 48, 200)).unwrap();
        match tensor {
            TensorInput::Uint8(arr) => {
                for &v in arr.iter() {
                    assert_eq!(v, 200);
                }
            }
            TensorInput::Float32(_) => panic!("quantized policy produced a float tensor"),
        }
    }

    #[test]
    fn resize_is_idempotent_on_square_input() {
        let pre = Preprocessor::new(16, false).unwrap();
        let canonical = pre.to_canonical(&uniform_image(16, 16, 77));
        let resized = pre.resize(&canonical);
        assert_eq!(canonical.as_raw(), resized.as_raw());
    }

    #[test]
    fn preprocessing_does_not_mutate_the_source() {
        let pre = Preprocessor::new(8, false).unwrap();
        let image = uniform_image(10, 20, 50);
        let before = image.clone();
        let _ = pre.process(&image).unwrap();
        assert_eq!(image.to_rgba8().as_raw(), before.to_rgba8().as_raw());
    }

    #[test]
    fn zero_sized_image_rejected() {
        let pre = Preprocessor::new(8, false).unwrap();
        let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert!(matches!(
            pre.process(&empty),
            Err(ClassifyError::InvalidInput { .. })
        ));
    }

    #[test]
    fn zero_input_size_rejected() {
        assert!(matches!(
            Preprocessor::new(0, false),
            Err(ClassifyError::Config { .. })
        ));
    }
}
