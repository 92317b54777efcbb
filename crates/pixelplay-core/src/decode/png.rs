//! Lossless PNG decoding for the collection store.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, PixelBuffer};

/// PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decode PNG bytes into a pixel buffer.
///
/// 8-bit gray, RGB and RGBA PNGs decode to the same layout they were written
/// with, so `decode_png(encode_png(img)) == img` for every buffer.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes lack the PNG signature.
/// Returns `DecodeError::CorruptedData` if the PNG stream is damaged.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(DecodeError::InvalidFormat);
    }

    let img = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png)
        .decode()
        .map_err(|e| DecodeError::CorruptedData(e.to_string()))?;

    Ok(PixelBuffer::from_dynamic(img)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorLayout;
    use image::{DynamicImage, GrayAlphaImage, RgbImage};

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_valid_png() {
        let src = RgbImage::from_fn(5, 3, |x, y| image::Rgb([x as u8, y as u8, 200]));
        let bytes = png_bytes(&DynamicImage::ImageRgb8(src));

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.width(), 5);
        assert_eq!(img.height(), 3);
        assert_eq!(img.layout(), ColorLayout::Rgb);
        assert_eq!(img.pixel(4, 2), &[4, 2, 200]);
    }

    #[test]
    fn test_decode_gray_alpha_widens_to_rgba() {
        let src = GrayAlphaImage::from_pixel(2, 2, image::LumaA([10, 128]));
        let bytes = png_bytes(&DynamicImage::ImageLumaA8(src));

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.layout(), ColorLayout::Rgba);
        assert_eq!(img.pixel(0, 0), &[10, 10, 10, 128]);
    }

    #[test]
    fn test_decode_empty_bytes() {
        let result = decode_png(&[]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_not_png() {
        let result = decode_png(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let src = RgbImage::from_pixel(16, 16, image::Rgb([1, 2, 3]));
        let bytes = png_bytes(&DynamicImage::ImageRgb8(src));

        let truncated = &bytes[..bytes.len() / 2];
        let result = decode_png(truncated);
        assert!(matches!(result, Err(DecodeError::CorruptedData(_))));
    }
}
