//! Filter backends: the pixel operations that vary by capability.
//!
//! Grayscale reduction and edge extraction are the two stages with real
//! implementation freedom, so they live behind the [`FilterBackend`]
//! trait and the rest of the pipeline stays capability-agnostic. Two
//! implementations ship:
//!
//! - [`CannyBackend`] (cargo feature `canny`, on by default): codec
//!   native grayscale plus a double-threshold hysteresis edge detector.
//! - [`LumaBackend`]: fixed-weight luma reduction plus a 3x3 find-edges
//!   kernel. Always compiled, and the fallback when `canny` is off.
//!
//! Which backend a default pipeline gets is settled at compile time via
//! [`DefaultBackend`]. Running without the hysteresis detector is a
//! quality degradation, not an error: construction logs a warning once
//! per process and proceeds. Nothing in this crate fails because a
//! capability is missing.

use image::{DynamicImage, GrayImage};
use thiserror::Error;

use crate::params::EdgeThresholds;

#[cfg(feature = "canny")]
pub mod canny;
pub mod luma;

#[cfg(feature = "canny")]
pub use canny::CannyBackend;
pub use luma::LumaBackend;

#[derive(Error, Debug)]
pub enum BackendError {
    /// A backend declined an operation instead of degrading.
    ///
    /// Both shipped backends implement every operation, with
    /// [`FilterBackend::detect_edges`] documented to return its input
    /// rather than fail, so this error surfacing means a backend has
    /// broken that contract.
    #[error("Backend '{backend}' has no implementation for {operation}")]
    UnavailableCapability {
        backend: &'static str,
        operation: &'static str,
    },
}

/// A set of pixel operations the pipeline can be run on.
pub trait FilterBackend {
    /// Short name for logs and the CLI capability display.
    fn name(&self) -> &'static str;

    /// Reduce an image to a single 8-bit channel.
    ///
    /// Single-channel input must come back unchanged. Color input is
    /// reduced with whatever weighting the backend provides; alpha, if
    /// present, is ignored rather than composited.
    fn to_grayscale(&self, image: &DynamicImage) -> GrayImage;

    /// Extract an edge map from a grayscale image, same dimensions out
    /// as in.
    ///
    /// A backend with no edge filter must return the input unchanged,
    /// degrading the operation to plain grayscale instead of failing.
    /// [`BackendError::UnavailableCapability`] exists for backends that
    /// break that contract, not for routine use.
    fn detect_edges(
        &self,
        gray: &GrayImage,
        thresholds: EdgeThresholds,
    ) -> Result<GrayImage, BackendError>;
}

/// Whether the hysteresis edge detector was compiled in.
///
/// Settled at build time. Absence is never an error anywhere in the
/// crate; edge detection falls back to [`LumaBackend`]'s kernel.
pub const fn canny_available() -> bool {
    cfg!(feature = "canny")
}

/// The backend a default pipeline runs on: [`CannyBackend`] when the
/// `canny` feature is compiled in, [`LumaBackend`] otherwise.
#[cfg(feature = "canny")]
pub type DefaultBackend = CannyBackend;

/// The backend a default pipeline runs on: [`CannyBackend`] when the
/// `canny` feature is compiled in, [`LumaBackend`] otherwise.
#[cfg(not(feature = "canny"))]
pub type DefaultBackend = LumaBackend;

/// Construct the default backend, warning once per process when the
/// build runs degraded.
pub(crate) fn select_default() -> DefaultBackend {
    #[cfg(not(feature = "canny"))]
    {
        use std::sync::Once;

        static DEGRADED_WARNING: Once = Once::new();
        DEGRADED_WARNING.call_once(|| {
            log::warn!(
                "hysteresis edge detection not compiled in (feature `canny` disabled); \
                 edge detection uses the 3x3 find-edges kernel instead"
            );
        });
    }
    DefaultBackend::default()
}
