//! Bounded downscaling with aspect-ratio preservation.
//!
//! Resizing only ever shrinks. Images already within the bound pass
//! through untouched, and upscaling never happens. The target geometry
//! comes from [`fit_within`], a pure function kept separate from the
//! pixel work so the arithmetic can be tested exhaustively without
//! touching an image.

use image::DynamicImage;
use image::imageops::FilterType;

/// Default bound on the longer edge, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 800;

/// Compute target dimensions for an image that may exceed
/// `max_dimension` on its longer edge.
///
/// Returns `None` when both edges already fit (no resize needed).
/// Otherwise the longer edge lands on `max_dimension` exactly and the
/// shorter edge is scaled by the same ratio, truncated toward zero
/// (never rounded) and floored at 1 so degenerate aspect ratios cannot
/// produce a zero-pixel edge.
///
/// ```
/// use b64filter::resize::fit_within;
///
/// // Landscape: width pinned to the bound, height follows the ratio.
/// assert_eq!(fit_within(1000, 500, 800), Some((800, 400)));
/// // Already within the bound: nothing to do.
/// assert_eq!(fit_within(800, 600, 800), None);
/// ```
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    if width <= max_dimension && height <= max_dimension {
        return None;
    }
    // Ties go to the width branch; for a square both give the same answer.
    if width >= height {
        let scaled = (height as f64 * max_dimension as f64 / width as f64) as u32;
        Some((max_dimension, scaled.max(1)))
    } else {
        let scaled = (width as f64 * max_dimension as f64 / height as f64) as u32;
        Some((scaled.max(1), max_dimension))
    }
}

/// Downscale `image` when either edge exceeds `max_dimension`,
/// resampling with Lanczos3 at exactly the dimensions [`fit_within`]
/// computes. Within-bounds images come back unchanged, same allocation.
pub fn resize_if_oversized(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    match fit_within(width, height, max_dimension) {
        Some((w, h)) => {
            log::debug!("downscaling {width}x{height} to {w}x{h} (max dimension {max_dimension})");
            image.resize_exact(w, h, FilterType::Lanczos3)
        }
        None => image,
    }
}
