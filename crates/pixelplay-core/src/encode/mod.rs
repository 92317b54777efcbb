//! Image encoding for persistence and downloads.
//!
//! This module provides functionality for:
//! - Lossless PNG encoding (collection storage and default downloads)
//! - JPEG encoding with configurable quality (downloads only)
//!
//! [`encode`] picks the encoder from an [`OutputFormat`] identifier.
//!
//! # Examples
//!
//! ```ignore
//! use pixelplay_core::encode::{encode, OutputFormat};
//!
//! let bytes = encode(&image, "png".parse().unwrap()).unwrap();
//! std::fs::write("download.png", bytes).unwrap();
//! ```

mod jpeg;
mod png;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::PixelBuffer;

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The underlying encoder failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The requested output format is not known.
    #[error("Unknown output format: {0:?} (expected \"png\" or \"jpeg\")")]
    UnknownFormat(String),
}

/// Target format for an encoded image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossy JPEG with the given quality (1-100).
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg { .. } => "jpg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Png => f.write_str("PNG"),
            OutputFormat::Jpeg { quality } => write!(f, "JPEG (quality {quality})"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = EncodeError;

    /// Parse a format name. JPEG gets [`DEFAULT_JPEG_QUALITY`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            }),
            _ => Err(EncodeError::UnknownFormat(s.to_string())),
        }
    }
}

/// Encode an image in the requested format.
pub fn encode(image: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(image),
        OutputFormat::Jpeg { quality } => encode_jpeg(image, quality),
    }
}
