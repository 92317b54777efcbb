//! Pixelplay Core - lossless image transforms and a saved-image collection
//!
//! This crate provides the core functionality behind pixelplay:
//! - [`transform`]: stretch, quarter-turn rotation and flips on in-memory
//!   images, each returning a new image with the exact same samples
//! - [`store`]: a SQLite collection of captioned images, stored as PNG
//! - [`decode`] / [`encode`]: the pixel buffer type and its codecs
//!
//! The transform functions and the store are independent; a caller moves a
//! [`PixelBuffer`] between them.

pub mod decode;
pub mod encode;
pub mod store;
pub mod transform;

pub use decode::{decode_image, decode_png, ColorLayout, PixelBuffer};
pub use encode::{encode, encode_png, OutputFormat};
pub use store::{CollectionEntry, CollectionStore, StoreError};
pub use transform::{
    flip_horizontal, flip_vertical, rotate90, stretch_horizontal, stretch_vertical,
    RotationDirection, TransformError, TransformOp,
};
