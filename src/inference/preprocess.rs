//! Image loading and tensor preparation.

use crate::error::{Error, Result};
use image::DynamicImage;
use image::imageops::FilterType;
use std::path::Path;

/// Open an image file, guessing the format from its contents.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let decode_err = |source| Error::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    image::io::Reader::open(path)
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)
}

/// Resize to `size`×`size` RGB and lay out as normalized NCHW `f32` data.
///
/// Pixel values are scaled to `[0, 1]`, matching the export preprocessing
/// of the trained network.
pub fn to_nchw(image: &DynamicImage, size: u32) -> Vec<f32> {
    let rgb = image
        .resize_exact(size, size, FilterType::Triangle)
        .to_rgb8();

    let plane = (size as usize) * (size as usize);
    let mut data = vec![0.0_f32; 3 * plane];

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let offset = (y as usize) * (size as usize) + x as usize;
        for (channel, value) in pixel.0.iter().enumerate() {
            data[channel * plane + offset] = f32::from(*value) / 255.0;
        }
    }

    data
}
