//! Utility functions for loading images from files.

use crate::core::errors::ClassifyError;
use image::DynamicImage;
use std::path::Path;

/// Loads an image from a file path.
///
/// Handles any format the `image` crate decodes; the pixel layout is
/// normalized later by the classifier's preprocessing.
///
/// # Errors
///
/// Returns [`ClassifyError::ImageLoad`] if the file cannot be opened or
/// decoded as an image.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, ClassifyError> {
    image::open(path.as_ref()).map_err(ClassifyError::ImageLoad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn round_trips_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        RgbImage::from_pixel(12, 8, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!((image.width(), image.height()), (12, 8));
    }

    #[test]
    fn missing_file_is_an_image_load_error() {
        let err = load_image("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, ClassifyError::ImageLoad(_)));
    }
}
