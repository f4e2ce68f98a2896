//! Transport codec: base64 framing and image encode/decode.
//!
//! Payloads travel as base64 text, optionally framed as a data URI
//! (`data:image/png;base64,...`). This module converts between that
//! text form and in-memory pixel grids. It knows nothing about filters;
//! the [`pipeline`](crate::pipeline) module decides what happens
//! between decode and encode.
//!
//! Output is always JPEG. Input format is whatever
//! [`image::load_from_memory`] can sniff from the decoded bytes (JPEG,
//! PNG, and WebP are compiled in).

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;

use crate::params::Quality;

/// Errors from turning payload text into pixels.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Unrecognized or corrupt image data: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors from turning pixels back into payload text.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Strip a data-URI header from a payload, returning the bare base64
/// text.
///
/// Everything up to and including the first comma is treated as the
/// header, whatever it says. Payloads without a comma pass through
/// unchanged.
pub fn strip_data_uri(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((_header, body)) => body,
        None => payload,
    }
}

/// Decode a base64 payload, optionally data-URI framed, into pixels.
///
/// Surrounding whitespace is trimmed before decoding. Fails before any
/// pixel work when the base64 text is malformed or the decoded bytes
/// are not a recognized image format.
pub fn decode_image(payload: &str) -> Result<DynamicImage, DecodeError> {
    let bytes = BASE64.decode(strip_data_uri(payload).trim())?;
    let image = image::load_from_memory(&bytes)?;
    log::debug!(
        "decoded {}x{} image from {} compressed bytes",
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(image)
}

/// Encode pixels as JPEG at the given quality and return bare base64
/// text (no data-URI framing).
///
/// Channel layouts JPEG cannot represent, RGBA among them, are rejected
/// by the encoder rather than silently converted. The pipeline drops
/// alpha before encoding, so hitting that rejection means a filter
/// stage produced something it should not have.
pub fn encode_jpeg(image: &DynamicImage, quality: Quality) -> Result<String, EncodeError> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality.value() as u8);
    image.write_with_encoder(encoder)?;
    Ok(BASE64.encode(&bytes))
}
