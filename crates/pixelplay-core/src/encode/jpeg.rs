//! JPEG encoding for downloads.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! JPEG is lossy and has no alpha channel, so it is only offered as a
//! download format; the collection store always uses PNG.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::EncodeError;
use crate::decode::{ColorLayout, PixelBuffer};

/// Default JPEG quality for downloads.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode a pixel buffer to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Source image (gray, RGB or RGBA)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
///
/// Gray images are written as single-channel JPEGs. RGBA images lose their
/// alpha channel.
pub fn encode_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    let result = match image.layout() {
        ColorLayout::Gray => encoder.write_image(
            image.pixels(),
            image.width(),
            image.height(),
            ExtendedColorType::L8,
        ),
        ColorLayout::Rgb => encoder.write_image(
            image.pixels(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        ),
        ColorLayout::Rgba => {
            let rgb = strip_alpha(image.pixels());
            encoder.write_image(&rgb, image.width(), image.height(), ExtendedColorType::Rgb8)
        }
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
