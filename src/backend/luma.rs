//! Fixed-weight backend with no optional dependencies.
//!
//! Grayscale reduction uses the standard luma weights (0.299 red,
//! 0.587 green, 0.114 blue) in integer arithmetic. Edge extraction
//! applies a 3x3 find-edges kernel (8-connected Laplacian), producing a
//! raw magnitude map rather than the thinned binary map a hysteresis
//! detector gives.

use image::{DynamicImage, GrayImage, Luma, RgbImage, imageops};

use super::{BackendError, FilterBackend};
use crate::params::EdgeThresholds;

/// 8-connected Laplacian: each pixel times 8, minus its neighborhood.
/// Flat regions cancel to zero; discontinuities spike.
const FIND_EDGES_KERNEL: [f32; 9] = [
    -1.0, -1.0, -1.0, //
    -1.0, 8.0, -1.0, //
    -1.0, -1.0, -1.0,
];

/// Integer rendition of the 0.299/0.587/0.114 luma weights.
///
/// `(299*R + 587*G + 114*B) / 1000` truncates the fractional part
/// exactly, matching the floating-point formula cast to an integer.
/// The weights sum to 1000, so pure white stays 255 and pure black 0.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

fn rgb_to_gray(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luma(r, g, b)])
    })
}

pub struct LumaBackend;

impl LumaBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LumaBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterBackend for LumaBackend {
    fn name(&self) -> &'static str {
        "luma"
    }

    fn to_grayscale(&self, image: &DynamicImage) -> GrayImage {
        match image {
            DynamicImage::ImageLuma8(gray) => gray.clone(),
            DynamicImage::ImageRgb8(rgb) => rgb_to_gray(rgb),
            DynamicImage::ImageRgba8(rgba) => GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
                let [r, g, b, _] = rgba.get_pixel(x, y).0;
                Luma([luma(r, g, b)])
            }),
            // 16-bit, float, and luma+alpha layouts go through 8-bit RGB.
            other => rgb_to_gray(&other.to_rgb8()),
        }
    }

    /// Thresholds are a hysteresis concept; the kernel has no use for
    /// them.
    fn detect_edges(
        &self,
        gray: &GrayImage,
        _thresholds: EdgeThresholds,
    ) -> Result<GrayImage, BackendError> {
        Ok(imageops::filter3x3(gray, &FIND_EDGES_KERNEL))
    }
}
