//! Parameter types for filter operations.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the [`pipeline`](crate::pipeline) module (which
//! decides the processing steps) and the [`backend`](crate::backend)
//! (which does the actual pixel work), so backends can be swapped
//! without touching operation logic.
//!
//! ## Types
//!
//! - [`Quality`]: lossy JPEG encoding quality (1-100, default 90). Clamped on construction.
//! - [`EdgeThresholds`]: low/high threshold pair for gradient-magnitude edge detection.

/// Quality setting for lossy JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Threshold pair for gradient-magnitude edge detection, on the 0-255
/// intensity scale.
///
/// Pixels with gradient magnitude above `high` are strong edges; pixels
/// between `low` and `high` survive only when connected to a strong
/// edge. The constructor keeps the pair ordered (`low <= high`), which
/// the detector requires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeThresholds {
    pub low: f32,
    pub high: f32,
}

impl EdgeThresholds {
    pub fn new(low: f32, high: f32) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self { low: high, high: low }
        }
    }
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            low: 100.0,
            high: 200.0,
        }
    }
}
