//! Core types for in-memory images.

use image::{DynamicImage, ExtendedColorType, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not in a recognized or supported format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image data: {0}")]
    CorruptedData(String),

    /// The decoded image does not form a valid pixel buffer.
    #[error("Decoded image is not a valid pixel buffer: {0}")]
    InvalidBuffer(#[from] PixelBufferError),
}

/// Violations of the [`PixelBuffer`] invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PixelBufferError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    EmptyDimensions { width: u32, height: u32 },

    /// Sample count doesn't match width * height * channels.
    #[error("Invalid pixel data: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Channel layout of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorLayout {
    /// Single channel, shape (H, W).
    Gray,
    /// Three channels, shape (H, W, 3).
    Rgb,
    /// Four channels, shape (H, W, 4).
    Rgba,
}

impl ColorLayout {
    /// Number of samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorLayout::Gray => 1,
            ColorLayout::Rgb => 3,
            ColorLayout::Rgba => 4,
        }
    }

    /// The matching `image` crate color type, used by the encoders.
    pub fn extended_color_type(self) -> ExtendedColorType {
        match self {
            ColorLayout::Gray => ExtendedColorType::L8,
            ColorLayout::Rgb => ExtendedColorType::Rgb8,
            ColorLayout::Rgba => ExtendedColorType::Rgba8,
        }
    }
}

/// A dense 8-bit image held in memory.
///
/// Samples are stored row-major, interleaved by channel: the sample for
/// channel `c` of the pixel at row `y`, column `x` lives at
/// `(y * width + x) * channels + c`.
///
/// Construction validates the shape, so every `PixelBuffer` has
/// `width >= 1`, `height >= 1` and exactly `width * height * channels`
/// samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ColorLayout,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a pixel buffer, validating dimensions and sample count.
    pub fn new(
        width: u32,
        height: u32,
        layout: ColorLayout,
        pixels: Vec<u8>,
    ) -> Result<Self, PixelBufferError> {
        if width == 0 || height == 0 {
            return Err(PixelBufferError::EmptyDimensions { width, height });
        }
        let expected = width as usize * height as usize * layout.channels();
        if pixels.len() != expected {
            return Err(PixelBufferError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            pixels,
        })
    }

    /// Create a buffer with every sample set to `value`.
    pub fn filled(
        width: u32,
        height: u32,
        layout: ColorLayout,
        value: u8,
    ) -> Result<Self, PixelBufferError> {
        let len = width as usize * height as usize * layout.channels();
        Self::new(width, height, layout, vec![value; len])
    }

    /// Build a buffer whose dimensions have already been checked by a transform.
    pub(crate) fn from_parts_unchecked(
        width: u32,
        height: u32,
        layout: ColorLayout,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> ColorLayout {
        self.layout
    }

    /// Samples per pixel (1, 3 or 4).
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Raw samples in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its samples.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of samples in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let len = self.row_len();
        let start = y as usize * len;
        &self.pixels[start..start + len]
    }

    /// Samples of the pixel at (`x`, `y`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * c;
        &self.pixels[start..start + c]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Convert from a decoded `image` crate image.
    ///
    /// 8-bit gray, RGB and RGBA map directly. Gray+alpha is widened to RGBA
    /// and higher bit depths are reduced to 8 bits per sample.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self, PixelBufferError> {
        let (layout, width, height, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => {
                let (w, h) = buf.dimensions();
                (ColorLayout::Gray, w, h, buf.into_raw())
            }
            DynamicImage::ImageRgb8(buf) => {
                let (w, h) = buf.dimensions();
                (ColorLayout::Rgb, w, h, buf.into_raw())
            }
            DynamicImage::ImageRgba8(buf) => {
                let (w, h) = buf.dimensions();
                (ColorLayout::Rgba, w, h, buf.into_raw())
            }
            DynamicImage::ImageLuma16(buf) => {
                let buf = DynamicImage::ImageLuma16(buf).to_luma8();
                let (w, h) = buf.dimensions();
                (ColorLayout::Gray, w, h, buf.into_raw())
            }
            other if other.color().has_alpha() => {
                let buf = other.to_rgba8();
                let (w, h) = buf.dimensions();
                (ColorLayout::Rgba, w, h, buf.into_raw())
            }
            other => {
                let buf = other.to_rgb8();
                let (w, h) = buf.dimensions();
                (ColorLayout::Rgb, w, h, buf.into_raw())
            }
        };
        Self::new(width, height, layout, pixels)
    }

    /// Convert to an `image` crate image for further processing.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let (w, h, data) = (self.width, self.height, self.pixels.clone());
        match self.layout {
            ColorLayout::Gray => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            ColorLayout::Rgb => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            ColorLayout::Rgba => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        }
    }
}
