//! # b64filter
//!
//! Base64-in, base64-out image filters. Payloads arrive as base64 text,
//! bare or framed as a data URI, in any compiled-in format (JPEG, PNG,
//! WebP); results leave as bare base64 JPEG. Two operations: grayscale
//! conversion with bounded output size, and edge detection.
//!
//! # Architecture: Decode, Filter, Encode
//!
//! Every operation is the same three-stage trip through
//! [`pipeline::Pipeline`]:
//!
//! ```text
//! 1. Decode   base64 text   →  pixel grid      (codec)
//! 2. Filter   pixel grid    →  grayscale map   (backend, plus resize for grayscale)
//! 3. Encode   grayscale map →  base64 JPEG     (codec)
//! ```
//!
//! The pipeline is stateless: each call decodes, processes, and encodes
//! one payload with nothing retained between calls, so a single
//! pipeline can serve any number of unrelated payloads.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`codec`] | Transport boundary: data-URI stripping, base64, image decode, JPEG encode |
//! | [`resize`] | Bounded downscaling: pure dimension math plus Lanczos3 resampling |
//! | [`backend`] | The [`backend::FilterBackend`] trait and both implementations |
//! | [`params`] | Operation parameters: JPEG quality, edge-detection thresholds |
//! | [`pipeline`] | Orchestration: the two public operations and their error type |
//!
//! # Design Decisions
//!
//! ## Capability-Selected Backend
//!
//! Grayscale reduction and edge extraction live behind
//! [`backend::FilterBackend`]. The full backend (cargo feature `canny`,
//! on by default) adds a hysteresis edge detector via `imageproc`; the
//! fallback backend is always compiled and uses fixed luma weights and
//! a 3x3 find-edges kernel. The choice is settled at compile time, and
//! a build without the detector still serves every operation: edge
//! detection degrades in quality, logs a warning once per process, and
//! a missing capability never turns into an error.
//!
//! ## JPEG-Only Output
//!
//! Whatever comes in, JPEG at quality 90 goes out. Filter output is a
//! single-channel image, which JPEG carries compactly and universally;
//! per-request output formats would complicate the API for no benefit
//! to a filter whose product is a grayscale map.
//!
//! ## Downscale Only the Grayscale Path
//!
//! The grayscale operation bounds its output at 800 pixels on the
//! longer edge (aspect preserved, never upscaled). Edge detection runs
//! at full resolution: resampling before detection shifts and smears
//! the very gradients the detector is looking for, and resampling the
//! binary map afterwards would turn crisp edges gray.
//!
//! ## Truncating Arithmetic
//!
//! The scaled shorter edge and the fallback luma weights both truncate
//! rather than round, in integer arithmetic. Interoperating services
//! compare output dimensions and pixel values against these exact
//! formulas, so a half-pixel of rounding drift is a wire-visible
//! difference.

pub mod backend;
pub mod codec;
pub mod params;
pub mod pipeline;
pub mod resize;
