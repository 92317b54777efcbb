//! Image decoding and the in-memory pixel buffer.
//!
//! This module provides:
//! - [`PixelBuffer`], the dense 8-bit image every transform works on
//! - Strict PNG decoding used when reading the collection store
//! - Upload decoding for PNG and JPEG files
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use pixelplay_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod load;
mod png;
mod types;

pub use load::decode_image;
pub use png::decode_png;
pub use types::{ColorLayout, DecodeError, PixelBuffer, PixelBufferError};
