//! Decoding of uploaded files (PNG or JPEG).

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, PixelBuffer};

/// Formats accepted on upload.
const UPLOAD_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

/// Decode an uploaded image, guessing its format from the leading bytes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized or
/// is not PNG or JPEG.
/// Returns `DecodeError::CorruptedData` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    if !UPLOAD_FORMATS.contains(&format) {
        return Err(DecodeError::InvalidFormat);
    }

    let img = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| DecodeError::CorruptedData(e.to_string()))?;

    Ok(PixelBuffer::from_dynamic(img)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorLayout;
    use image::{DynamicImage, GrayImage, RgbImage};

    fn encoded(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png_upload() {
        let src = GrayImage::from_pixel(7, 4, image::Luma([99]));
        let bytes = encoded(&DynamicImage::ImageLuma8(src), ImageFormat::Png);

        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.layout(), ColorLayout::Gray);
        assert_eq!((img.width(), img.height()), (7, 4));
        assert!(img.pixels().iter().all(|&v| v == 99));
    }

    #[test]
    fn test_decode_jpeg_upload() {
        let src = RgbImage::from_pixel(8, 8, image::Rgb([128, 128, 128]));
        let bytes = encoded(&DynamicImage::ImageRgb8(src), ImageFormat::Jpeg);

        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.layout(), ColorLayout::Rgb);
        assert_eq!((img.width(), img.height()), (8, 8));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        // SOI marker followed by garbage
        let result = decode_image(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
        assert!(matches!(result, Err(DecodeError::CorruptedData(_))));
    }
}
