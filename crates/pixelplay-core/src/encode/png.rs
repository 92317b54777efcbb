//! Lossless PNG encoding.
//!
//! PNG is the storage format of the collection store and the default
//! download format. The encoder writes the buffer's own color type (L8,
//! Rgb8 or Rgba8) so decoding restores the exact same layout and samples.

use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;
use crate::decode::PixelBuffer;

/// Encode a pixel buffer to PNG bytes.
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());

    PngEncoder::new(&mut buffer)
        .write_image(
            image.pixels(),
            image.width(),
            image.height(),
            image.layout().extended_color_type(),
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_png, ColorLayout};

    #[test]
    fn test_encode_png_signature() {
        let img = PixelBuffer::filled(3, 3, ColorLayout::Rgb, 0).unwrap();
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_png_round_trip_each_layout() {
        for layout in [ColorLayout::Gray, ColorLayout::Rgb, ColorLayout::Rgba] {
            let len = 5 * 4 * layout.channels();
            let pixels: Vec<u8> = (0..len).map(|i| (i * 31 % 256) as u8).collect();
            let img = PixelBuffer::new(5, 4, layout, pixels).unwrap();

            let decoded = decode_png(&encode_png(&img).unwrap()).unwrap();
            assert_eq!(decoded, img, "layout {:?} should round-trip", layout);
        }
    }

    #[test]
    fn test_png_round_trip_transparent_pixels() {
        // Fully transparent pixels keep their color samples
        let pixels = vec![255, 0, 0, 0, 0, 255, 0, 0];
        let img = PixelBuffer::new(2, 1, ColorLayout::Rgba, pixels).unwrap();

        let decoded = decode_png(&encode_png(&img).unwrap()).unwrap();
        assert_eq!(decoded.pixels(), img.pixels());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
