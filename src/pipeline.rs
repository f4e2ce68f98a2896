//! Pipeline orchestration: decode, process, re-encode.
//!
//! The pipeline owns sequencing and the codec boundary; every pixel
//! decision with implementation freedom is delegated to the injected
//! [`FilterBackend`]. Pipelines are stateless across calls: each
//! operation decodes one payload, processes it, and re-encodes it with
//! no retained pixel data, so one pipeline can serve any number of
//! unrelated payloads.
//!
//! The two operations differ deliberately:
//!
//! - [`grayscale_filter`](Pipeline::grayscale_filter) bounds output
//!   size, downscaling anything whose longer edge exceeds the
//!   configured maximum.
//! - [`edge_detection_filter`](Pipeline::edge_detection_filter) never
//!   resizes; an edge map is only useful at the resolution it was
//!   extracted at.

use image::DynamicImage;
use thiserror::Error;

use crate::backend::{self, BackendError, DefaultBackend, FilterBackend};
use crate::codec::{self, DecodeError, EncodeError};
use crate::params::{EdgeThresholds, Quality};
use crate::resize;

/// Errors from running a filter operation end to end.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Backend failed: {0}")]
    Backend(#[from] BackendError),
}

/// Settings shared by both operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Bound on the longer edge for the grayscale operation, in pixels.
    pub max_dimension: u32,
    /// JPEG quality of the output payload.
    pub quality: Quality,
    /// Thresholds for gradient-magnitude edge detection.
    pub thresholds: EdgeThresholds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_dimension: resize::DEFAULT_MAX_DIMENSION,
            quality: Quality::default(),
            thresholds: EdgeThresholds::default(),
        }
    }
}

/// A filter pipeline: an injected backend plus settings.
pub struct Pipeline<B = DefaultBackend> {
    backend: B,
    config: PipelineConfig,
}

impl Pipeline {
    /// Pipeline on the default backend with default settings.
    ///
    /// When built without the hysteresis edge detector this logs a
    /// warning (once per process) and proceeds degraded; construction
    /// itself never fails.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Pipeline on the default backend with custom settings.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self::with_backend(backend::select_default(), config)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Bring a decoded image into a layout every backend handles: 8-bit
/// grayscale, RGB, and RGBA pass through, anything else becomes 8-bit
/// RGB.
fn normalize_color_type(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

impl<B: FilterBackend> Pipeline<B> {
    /// Pipeline on an explicitly chosen backend.
    pub fn with_backend(backend: B, config: PipelineConfig) -> Self {
        Self { backend, config }
    }

    /// Which backend this pipeline runs on.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Convert a payload to grayscale, downscaling oversized images
    /// first.
    ///
    /// Steps: decode, normalize the color layout, downscale if either
    /// edge exceeds `max_dimension`, reduce to one channel, encode as
    /// JPEG. Returns bare base64 text.
    pub fn grayscale_filter(&self, payload: &str) -> Result<String, FilterError> {
        let image = codec::decode_image(payload)?;
        let image = normalize_color_type(image);
        let image = resize::resize_if_oversized(image, self.config.max_dimension);
        let gray = self.backend.to_grayscale(&image);
        Ok(codec::encode_jpeg(
            &DynamicImage::ImageLuma8(gray),
            self.config.quality,
        )?)
    }

    /// Extract an edge map from a payload.
    ///
    /// Steps: decode, reduce to one channel, detect edges, encode as
    /// JPEG. No resize: output dimensions always match the input. On a
    /// backend without an edge filter this degrades to plain grayscale.
    pub fn edge_detection_filter(&self, payload: &str) -> Result<String, FilterError> {
        let image = codec::decode_image(payload)?;
        let gray = self.backend.to_grayscale(&image);
        let edges = self.backend.detect_edges(&gray, self.config.thresholds)?;
        Ok(codec::encode_jpeg(
            &DynamicImage::ImageLuma8(edges),
            self.config.quality,
        )?)
    }
}

/// Convert a base64 image payload to grayscale, downscaling so neither
/// edge exceeds `max_dimension`. One-shot form of
/// [`Pipeline::grayscale_filter`] on the default backend.
pub fn apply_grayscale_filter(payload: &str, max_dimension: u32) -> Result<String, FilterError> {
    let config = PipelineConfig {
        max_dimension,
        ..PipelineConfig::default()
    };
    Pipeline::with_config(config).grayscale_filter(payload)
}

/// Extract an edge map from a base64 image payload at its original
/// size. One-shot form of [`Pipeline::edge_detection_filter`] on the
/// default backend.
pub fn apply_edge_detection_filter(payload: &str) -> Result<String, FilterError> {
    Pipeline::new().edge_detection_filter(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::{MockBackend, RecordedOp};
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn rgb_payload(width: u32, height: u32) -> String {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 120, 60])));
        codec::encode_jpeg(&image, Quality::default()).expect("fixture should encode")
    }

    fn run_grayscale(pipeline: &Pipeline<MockBackend>, payload: &str) -> Vec<RecordedOp> {
        pipeline.grayscale_filter(payload).expect("operation should succeed");
        pipeline.backend.recorded()
    }

    #[test]
    fn grayscale_calls_exactly_one_backend_operation() {
        let pipeline = Pipeline::with_backend(MockBackend::new(), PipelineConfig::default());
        let ops = run_grayscale(&pipeline, &rgb_payload(64, 48));
        assert_eq!(
            ops,
            vec![RecordedOp::ToGrayscale {
                width: 64,
                height: 48
            }]
        );
    }

    #[test]
    fn grayscale_resizes_before_the_backend_sees_pixels() {
        // The recorded dimensions prove the resize stage ran first.
        let pipeline = Pipeline::with_backend(MockBackend::new(), PipelineConfig::default());
        let ops = run_grayscale(&pipeline, &rgb_payload(1000, 500));
        assert_eq!(
            ops,
            vec![RecordedOp::ToGrayscale {
                width: 800,
                height: 400
            }]
        );
    }

    #[test]
    fn grayscale_respects_a_custom_bound() {
        let config = PipelineConfig {
            max_dimension: 100,
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::with_backend(MockBackend::new(), config);
        let ops = run_grayscale(&pipeline, &rgb_payload(300, 200));
        assert_eq!(
            ops,
            vec![RecordedOp::ToGrayscale {
                width: 100,
                height: 66
            }]
        );
    }

    #[test]
    fn edge_detection_runs_grayscale_then_edges_at_full_size() {
        let pipeline = Pipeline::with_backend(MockBackend::new(), PipelineConfig::default());
        pipeline
            .edge_detection_filter(&rgb_payload(1000, 500))
            .expect("operation should succeed");
        // No resize stage: the backend sees original dimensions, and the
        // default thresholds arrive as passed.
        assert_eq!(
            pipeline.backend.recorded(),
            vec![
                RecordedOp::ToGrayscale {
                    width: 1000,
                    height: 500
                },
                RecordedOp::DetectEdges {
                    width: 1000,
                    height: 500,
                    low: 100.0,
                    high: 200.0
                },
            ]
        );
    }

    #[test]
    fn custom_thresholds_reach_the_backend() {
        let config = PipelineConfig {
            thresholds: EdgeThresholds::new(30.0, 90.0),
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::with_backend(MockBackend::new(), config);
        pipeline
            .edge_detection_filter(&rgb_payload(16, 16))
            .expect("operation should succeed");
        assert!(matches!(
            pipeline.backend.recorded().as_slice(),
            [
                RecordedOp::ToGrayscale { .. },
                RecordedOp::DetectEdges {
                    low: 30.0,
                    high: 90.0,
                    ..
                }
            ]
        ));
    }

    #[test]
    fn malformed_payload_fails_before_any_backend_call() {
        let pipeline = Pipeline::with_backend(MockBackend::new(), PipelineConfig::default());
        let err = pipeline.grayscale_filter("not-base64!!").unwrap_err();
        assert!(matches!(err, FilterError::Decode(_)));
        assert!(pipeline.backend.recorded().is_empty());
    }

    #[test]
    fn missing_edge_filter_degrades_to_grayscale_output() {
        // Same payload through both operations; with no edge filter the
        // edge path collapses to the grayscale path exactly, down to
        // identical bytes.
        let payload = rgb_payload(60, 40);
        let degraded = Pipeline::with_backend(MockBackend::without_edge_filter(), PipelineConfig::default());
        let plain = Pipeline::with_backend(MockBackend::new(), PipelineConfig::default());
        assert_eq!(
            degraded.edge_detection_filter(&payload).unwrap(),
            plain.grayscale_filter(&payload).unwrap()
        );
    }

    #[test]
    fn normalize_passes_supported_layouts_through() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([7])));
        assert!(matches!(
            normalize_color_type(gray),
            DynamicImage::ImageLuma8(_)
        ));
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])));
        assert!(matches!(
            normalize_color_type(rgb),
            DynamicImage::ImageRgb8(_)
        ));
    }

    #[test]
    fn normalize_converts_exotic_layouts_to_rgb() {
        let luma16 = DynamicImage::ImageLuma16(
            image::ImageBuffer::from_pixel(4, 4, Luma([1000u16])),
        );
        assert!(matches!(
            normalize_color_type(luma16),
            DynamicImage::ImageRgb8(_)
        ));
    }

    #[test]
    fn one_shot_helpers_produce_decodable_output() {
        let payload = rgb_payload(32, 32);
        let gray = apply_grayscale_filter(&payload, 800).unwrap();
        let edges = apply_edge_detection_filter(&payload).unwrap();
        assert!(codec::decode_image(&gray).is_ok());
        assert!(codec::decode_image(&edges).is_ok());
    }
}
