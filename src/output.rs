//! # Output Module
//!
//! Converts f32 HDR renders to standard u8 PNG files:
//! - Clamps values to [0.0, 1.0] range
//! - sRGB gamma correction
//! - Error handling for file I/O operations

use image::{ImageBuffer, Rgb};
use log::{info, warn};

/// sRGB transfer curve with linear portion for very dark values
fn linear_to_gamma(linear: f32) -> f32 {
    if linear <= 0.0 {
        0.0
    } else if linear <= 0.0031308 {
        12.92 * linear
    } else {
        // Gamma curve: 1.055 * linear^(1/2.4) - 0.055
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert an f32 RGB image to 8-bit sRGB.
pub fn to_srgb8(image: &ImageBuffer<Rgb<f32>, Vec<f32>>) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([
            (linear_to_gamma(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
        ])
    })
}

/// Save an f32 RGB image as PNG with HDR to LDR tone mapping and gamma correction
///
/// # Errors
///
/// Logs warnings for I/O errors but does not panic. Common error causes:
/// - Invalid file path or insufficient permissions
/// - Disk space issues
pub fn save_image_as_png(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    match to_srgb8(image).save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_and_encodes() {
        let image = ImageBuffer::from_fn(3, 1, |x, _| match x {
            0 => Rgb([-1.0, 0.0, 0.0]),
            1 => Rgb([1.0, 2.0, 0.5]),
            _ => Rgb([0.001, 0.001, 0.001]),
        });
        let encoded = to_srgb8(&image);
        assert_eq!(encoded.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert!(encoded.get_pixel(1, 0)[0] >= 254);
        assert_eq!(encoded.get_pixel(1, 0)[0], encoded.get_pixel(1, 0)[1]);
        assert_eq!(encoded.get_pixel(1, 0)[2], 187);
        assert_eq!(encoded.get_pixel(2, 0)[0], 3);
    }
}
