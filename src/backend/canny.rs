//! Hysteresis edge-detection backend, built on `imageproc`.

use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;

use super::{BackendError, FilterBackend};
use crate::params::EdgeThresholds;

/// Full-capability backend: codec native grayscale reduction and a
/// double-threshold hysteresis (Canny) edge detector.
///
/// The detector blurs, takes gradient magnitudes, thins ridges, then
/// keeps weak edges only where they connect to strong ones. Output is
/// binary: 255 on edges, 0 elsewhere.
pub struct CannyBackend;

impl CannyBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CannyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterBackend for CannyBackend {
    fn name(&self) -> &'static str {
        "canny"
    }

    /// Codec-native conversion. Handles any decoded layout directly, so
    /// single-channel input comes back as-is and nothing needs
    /// normalizing first.
    fn to_grayscale(&self, image: &DynamicImage) -> GrayImage {
        image.to_luma8()
    }

    fn detect_edges(
        &self,
        gray: &GrayImage,
        thresholds: EdgeThresholds,
    ) -> Result<GrayImage, BackendError> {
        Ok(canny(gray, thresholds.low, thresholds.high))
    }
}
